//! The host boundary: everything the engine is allowed to do to a real tree.

use crate::element::Handler;
use std::fmt;
use thiserror::Error;

/// Failure surfaced by a host adapter.
///
/// The engine never retries a failed host operation; a failure during a
/// render tick discards the in-flight generation and a failure during commit
/// leaves the previously committed generation current. See [`crate::sched`].
#[derive(Debug, Error)]
pub enum HostError {
    /// A handle did not resolve to a live host node.
    #[error("unknown host node {0}")]
    UnknownNode(String),

    /// An operation targeted a node kind that cannot carry it.
    #[error("{operation} is not supported on {node}")]
    KindMismatch {
        /// Debug rendering of the offending handle.
        node: String,
        /// The rejected operation.
        operation: &'static str,
    },

    /// A structural removal named a child the parent does not hold.
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// Debug rendering of the named parent.
        parent: String,
        /// Debug rendering of the named child.
        child: String,
    },

    /// An attach named a child that already sits in the tree.
    #[error("node {0} is already attached")]
    AlreadyAttached(String),

    /// An attach would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle {
        /// Debug rendering of the would-be parent.
        parent: String,
        /// Debug rendering of the would-be child.
        child: String,
    },
}

impl HostError {
    /// An unknown-node error for the given handle.
    pub fn unknown(node: impl fmt::Debug) -> Self {
        Self::UnknownNode(format!("{node:?}"))
    }

    /// A kind-mismatch error for the given handle and operation.
    pub fn kind_mismatch(node: impl fmt::Debug, operation: &'static str) -> Self {
        Self::KindMismatch {
            node: format!("{node:?}"),
            operation,
        }
    }

    /// A not-a-child error for the given pair.
    pub fn not_a_child(parent: impl fmt::Debug, child: impl fmt::Debug) -> Self {
        Self::NotAChild {
            parent: format!("{parent:?}"),
            child: format!("{child:?}"),
        }
    }
}

/// Specialized result for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// The mutation surface of a concrete host tree.
///
/// The engine creates nodes during the render phase but attaches, detaches,
/// and re-diffs them only during commit, so an adapter first sees creations
/// of detached nodes and only later the structural operations that make them
/// visible. Handles are plain copyable values; the adapter owns all node
/// storage and is free to reuse handle values after a node is removed.
pub trait HostAdapter {
    /// Copyable handle identifying one live host node.
    type Node: Copy + Eq + fmt::Debug;

    /// Create a detached element node with the given tag.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Create a detached, empty text node.
    ///
    /// The literal arrives separately through [`HostAdapter::set_text`] when
    /// props are applied.
    fn create_text(&mut self) -> Self::Node;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> HostResult<()>;

    /// Detach `child` from `parent`, removing its whole subtree.
    fn remove_child(&mut self, parent: Self::Node, child: Self::Node) -> HostResult<()>;

    /// Assign a plain attribute on an element node.
    fn set_attribute(&mut self, node: Self::Node, key: &str, value: &str) -> HostResult<()>;

    /// Clear a previously assigned attribute. Clearing the class attribute
    /// empties the class list.
    fn remove_attribute(&mut self, node: Self::Node, key: &str) -> HostResult<()>;

    /// Replace the literal of a text node.
    fn set_text(&mut self, node: Self::Node, text: &str) -> HostResult<()>;

    /// Append a class name to an element's class list. Appending a name the
    /// list already holds is a no-op, not an error.
    fn add_class(&mut self, node: Self::Node, class: &str) -> HostResult<()>;

    /// Bind `handler` for `event` on the node, replacing any existing
    /// binding under the same event name.
    fn add_listener(&mut self, node: Self::Node, event: &str, handler: Handler) -> HostResult<()>;

    /// Unbind the handler for `event`. Unbinding an event with no handler is
    /// a no-op.
    fn remove_listener(&mut self, node: Self::Node, event: &str) -> HostResult<()>;

    /// Hand back a detached node created for a generation that will never
    /// commit. Implementations may reclaim it; the default keeps it.
    fn release_node(&mut self, node: Self::Node) {
        let _ = node;
    }
}
