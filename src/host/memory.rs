//! In-memory host: the reference adapter and test harness.
//!
//! Holds a DOM-shaped node arena, records every adapter call in an ordered
//! journal, and can dispatch events into bound listeners. It is strict by
//! design: handle misuse a browser would silently tolerate is an error here,
//! so engine bugs surface at the boundary instead of as quiet tree
//! corruption.

use super::adapter::{HostAdapter, HostError, HostResult};
use crate::element::{Event, Handler, CLASS_PROP};
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;
use std::fmt::Write;

new_key_type! {
    /// Handle to one node held by a [`MemoryHost`].
    pub struct NodeId;
}

/// One successful adapter call, recorded in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// A detached element node was created.
    CreateElement {
        /// The new node.
        node: NodeId,
        /// Its tag.
        tag: String,
    },
    /// A detached, empty text node was created.
    CreateText {
        /// The new node.
        node: NodeId,
    },
    /// `child` became the last child of `parent`.
    AppendChild {
        /// The receiving parent.
        parent: NodeId,
        /// The attached child.
        child: NodeId,
    },
    /// `child` and its subtree were detached and dropped.
    RemoveChild {
        /// The former parent.
        parent: NodeId,
        /// The removed child.
        child: NodeId,
    },
    /// A plain attribute was assigned.
    SetAttribute {
        /// The target node.
        node: NodeId,
        /// Attribute key.
        key: String,
        /// Assigned value.
        value: String,
    },
    /// A plain attribute was cleared.
    RemoveAttribute {
        /// The target node.
        node: NodeId,
        /// Attribute key.
        key: String,
    },
    /// A text node's literal was replaced.
    SetText {
        /// The target node.
        node: NodeId,
        /// The new literal.
        text: String,
    },
    /// A class name was appended.
    AddClass {
        /// The target node.
        node: NodeId,
        /// The appended class.
        class: String,
    },
    /// A listener was bound.
    AddListener {
        /// The target node.
        node: NodeId,
        /// Host event name.
        event: String,
    },
    /// A listener binding was removed.
    RemoveListener {
        /// The target node.
        node: NodeId,
        /// Host event name.
        event: String,
    },
    /// A never-attached node was handed back and reclaimed.
    Release {
        /// The reclaimed node.
        node: NodeId,
    },
}

impl Mutation {
    /// Whether this mutation changes tree structure.
    ///
    /// Structural mutations are the only ones visible from the attached tree
    /// the moment they land; everything else targets nodes that are either
    /// detached or changes only their local state.
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::AppendChild { .. } | Self::RemoveChild { .. })
    }
}

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        classes: Vec<String>,
    },
    Text {
        text: String,
    },
}

#[derive(Debug)]
struct MemoryNode {
    kind: NodeKind,
    listeners: BTreeMap<String, Handler>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl MemoryNode {
    fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_string(),
                attributes: BTreeMap::new(),
                classes: Vec::new(),
            },
            listeners: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn text() -> Self {
        Self {
            kind: NodeKind::Text {
                text: String::new(),
            },
            listeners: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An in-memory host tree with a mutation journal.
///
/// Use [`MemoryHost::create_root`] for the container an engine renders into,
/// then hand the host to the engine as its adapter. Assertions go through
/// the accessors, [`MemoryHost::journal`], and [`MemoryHost::snapshot`].
#[derive(Debug)]
pub struct MemoryHost {
    nodes: SlotMap<NodeId, MemoryNode>,
    journal: Vec<Mutation>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            journal: Vec::new(),
        }
    }

    /// Create a detached container node for an engine to render into.
    ///
    /// The container predates the engine's output, so it is not journaled.
    pub fn create_root(&mut self) -> NodeId {
        self.nodes.insert(MemoryNode::element("#root"))
    }

    /// Whether the handle resolves to a live node.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of live nodes, attached or not, containers included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The tag of an element node.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    /// The literal of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node)?.kind {
            NodeKind::Text { text } => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    /// An attribute value on an element node.
    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        match &self.nodes.get(node)?.kind {
            NodeKind::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            NodeKind::Text { .. } => None,
        }
    }

    /// The class list of an element node, in append order.
    pub fn classes(&self, node: NodeId) -> Option<&[String]> {
        match &self.nodes.get(node)?.kind {
            NodeKind::Element { classes, .. } => Some(classes),
            NodeKind::Text { .. } => None,
        }
    }

    /// The ordered children of a node; empty for unknown handles.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether a listener is bound for `event` on the node.
    pub fn has_listener(&self, node: NodeId, event: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.listeners.contains_key(event))
    }

    /// Invoke the listener bound for `event` on the node, if any.
    ///
    /// Returns whether a listener fired.
    pub fn dispatch(&self, node: NodeId, event: &str) -> bool {
        let Some(handler) = self
            .nodes
            .get(node)
            .and_then(|n| n.listeners.get(event))
        else {
            return false;
        };
        handler.call(&Event::new(event));
        true
    }

    /// Every successful adapter call so far, in call order.
    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    /// Drain the journal, leaving it empty.
    pub fn take_journal(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    /// Serialize the contents of `root` to a compact HTML-like string.
    ///
    /// Renders the node's children in order, not the node itself, so the
    /// snapshot of a container is exactly what was rendered into it. Class
    /// lists render in append order, attributes in sorted order, childless
    /// elements self-close.
    pub fn snapshot(&self, root: NodeId) -> String {
        let mut out = String::new();
        if let Some(node) = self.nodes.get(root) {
            for &child in &node.children {
                self.write_node(&mut out, child);
            }
        }
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text { text } => out.push_str(text),
            NodeKind::Element {
                tag,
                attributes,
                classes,
            } => {
                let _ = write!(out, "<{tag}");
                if !classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", classes.join(" "));
                }
                for (key, value) in attributes {
                    let _ = write!(out, " {key}=\"{value}\"");
                }
                if node.children.is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    for &child in &node.children {
                        self.write_node(out, child);
                    }
                    let _ = write!(out, "</{tag}>");
                }
            }
        }
    }

    fn node(&self, id: NodeId) -> HostResult<&MemoryNode> {
        self.nodes.get(id).ok_or_else(|| HostError::unknown(id))
    }

    fn node_mut(&mut self, id: NodeId) -> HostResult<&mut MemoryNode> {
        self.nodes.get_mut(id).ok_or_else(|| HostError::unknown(id))
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }
}

impl HostAdapter for MemoryHost {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        let node = self.nodes.insert(MemoryNode::element(tag));
        self.journal.push(Mutation::CreateElement {
            node,
            tag: tag.to_string(),
        });
        node
    }

    fn create_text(&mut self) -> NodeId {
        let node = self.nodes.insert(MemoryNode::text());
        self.journal.push(Mutation::CreateText { node });
        node
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> HostResult<()> {
        if !matches!(self.node(parent)?.kind, NodeKind::Element { .. }) {
            return Err(HostError::kind_mismatch(parent, "append_child"));
        }
        if self.node(child)?.parent.is_some() {
            return Err(HostError::AlreadyAttached(format!("{child:?}")));
        }
        if self.is_ancestor(child, parent) {
            return Err(HostError::WouldCycle {
                parent: format!("{parent:?}"),
                child: format!("{child:?}"),
            });
        }

        log::trace!(target: "weft.host", "append {child:?} under {parent:?}");
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        self.journal.push(Mutation::AppendChild { parent, child });
        Ok(())
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> HostResult<()> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(HostError::not_a_child(parent, child));
        }

        log::trace!(target: "weft.host", "remove {child:?} from {parent:?}");
        let siblings = &mut self.node_mut(parent)?.children;
        if let Some(position) = siblings.iter().position(|&c| c == child) {
            siblings.remove(position);
        }
        self.remove_subtree(child);
        self.journal.push(Mutation::RemoveChild { parent, child });
        Ok(())
    }

    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> HostResult<()> {
        match &mut self.node_mut(node)?.kind {
            NodeKind::Element { attributes, .. } => {
                attributes.insert(key.to_string(), value.to_string());
            }
            NodeKind::Text { .. } => {
                return Err(HostError::kind_mismatch(node, "set_attribute"));
            }
        }
        self.journal.push(Mutation::SetAttribute {
            node,
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn remove_attribute(&mut self, node: NodeId, key: &str) -> HostResult<()> {
        match &mut self.node_mut(node)?.kind {
            NodeKind::Element {
                attributes,
                classes,
                ..
            } => {
                // Clearing the class prop empties the whole class list.
                if key == CLASS_PROP {
                    classes.clear();
                } else {
                    attributes.remove(key);
                }
            }
            NodeKind::Text { .. } => {
                return Err(HostError::kind_mismatch(node, "remove_attribute"));
            }
        }
        self.journal.push(Mutation::RemoveAttribute {
            node,
            key: key.to_string(),
        });
        Ok(())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> HostResult<()> {
        match &mut self.node_mut(node)?.kind {
            NodeKind::Text { text: slot } => {
                slot.clear();
                slot.push_str(text);
            }
            NodeKind::Element { .. } => {
                return Err(HostError::kind_mismatch(node, "set_text"));
            }
        }
        self.journal.push(Mutation::SetText {
            node,
            text: text.to_string(),
        });
        Ok(())
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> HostResult<()> {
        match &mut self.node_mut(node)?.kind {
            NodeKind::Element { classes, .. } => {
                if !classes.iter().any(|c| c == class) {
                    classes.push(class.to_string());
                }
            }
            NodeKind::Text { .. } => {
                return Err(HostError::kind_mismatch(node, "add_class"));
            }
        }
        self.journal.push(Mutation::AddClass {
            node,
            class: class.to_string(),
        });
        Ok(())
    }

    fn add_listener(&mut self, node: NodeId, event: &str, handler: Handler) -> HostResult<()> {
        self.node_mut(node)?
            .listeners
            .insert(event.to_string(), handler);
        self.journal.push(Mutation::AddListener {
            node,
            event: event.to_string(),
        });
        Ok(())
    }

    fn remove_listener(&mut self, node: NodeId, event: &str) -> HostResult<()> {
        self.node_mut(node)?.listeners.remove(event);
        self.journal.push(Mutation::RemoveListener {
            node,
            event: event.to_string(),
        });
        Ok(())
    }

    fn release_node(&mut self, node: NodeId) {
        match self.nodes.get(node) {
            Some(n) if n.parent.is_none() => {
                self.remove_subtree(node);
                self.journal.push(Mutation::Release { node });
            }
            Some(_) => {
                log::debug!(target: "weft.host", "refusing to release attached node {node:?}");
            }
            None => {}
        }
    }
}
