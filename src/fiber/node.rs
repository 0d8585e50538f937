//! Fiber: the unit-of-work node.
//!
//! A fiber mirrors one element position for one generation. It owns at most
//! one host node, carries the diff bookkeeping the commit phase consumes, and
//! links to its previous-generation counterpart for diffing. All traversal
//! state lives in the structural links, which is what makes the render loop
//! interruptible without an explicit stack.

use super::tree::FiberKey;
use crate::element::{Element, ElementKind, Props};

/// The mutation a fiber requires at commit time.
///
/// Set during reconciliation, consumed and cleared during commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EffectTag {
    /// No host mutation required.
    #[default]
    None,
    /// Created this generation; its host node must be attached.
    Placement,
    /// Reuses the previous generation's host node; props must be re-diffed.
    Update,
    /// Superseded; its host node must be removed from the host tree.
    Deletion,
}

/// One mutable, generation-scoped unit-of-work node.
///
/// `parent`/`child`/`sibling` form a first-child/next-sibling tree: depth-first
/// traversal needs only these local links plus an O(1) "return to parent when
/// no sibling" rule, so an interrupted walk resumes from a single saved key.
#[derive(Debug)]
pub struct Fiber<N> {
    /// The element kind this fiber mirrors. `None` only for the synthetic
    /// root fiber that wraps the render container.
    pub kind: Option<ElementKind>,
    /// Resolved props for this generation.
    pub props: Props,
    /// Child element descriptors awaiting reconciliation; drained by the
    /// unit of work that processes this fiber.
    pub pending_children: Vec<Element>,
    /// Handle of the host node this fiber owns, once materialized. Fragments
    /// and the not-yet-visited never own one.
    pub node: Option<N>,
    /// Owning parent. Every fiber except the root has exactly one.
    pub parent: Option<FiberKey>,
    /// First child in the sibling chain.
    pub child: Option<FiberKey>,
    /// Next sibling under the same parent.
    pub sibling: Option<FiberKey>,
    /// The fiber at the same logical position in the previously committed
    /// generation. Keys point into that generation's arena and are only
    /// meaningful while this fiber's generation is in flight; they are used
    /// for diffing, never for host-node ownership.
    pub alternate: Option<FiberKey>,
    /// Mutation required at commit.
    pub effect: EffectTag,
}

impl<N> Fiber<N> {
    /// Build an unlinked fiber from an element's parts.
    pub fn from_element(element: Element) -> Self {
        let (kind, props, pending_children) = element.into_parts();
        Self {
            kind: Some(kind),
            props,
            pending_children,
            node: None,
            parent: None,
            child: None,
            sibling: None,
            alternate: None,
            effect: EffectTag::None,
        }
    }

    /// Build the synthetic root fiber that wraps the render container.
    ///
    /// The root is already materialized (its node is the container), carries
    /// no effect, and links to the previous generation's root for diffing.
    pub fn root(container: N, children: Vec<Element>, alternate: Option<FiberKey>) -> Self {
        Self {
            kind: None,
            props: Props::new(),
            pending_children: children,
            node: Some(container),
            parent: None,
            child: None,
            sibling: None,
            alternate,
            effect: EffectTag::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    #[test]
    fn test_fiber_from_element_is_unlinked() {
        let fiber: Fiber<u32> = Fiber::from_element(Element::node("div").with_child("hi"));

        assert_eq!(fiber.kind, Some(ElementKind::Host("div".to_string())));
        assert_eq!(fiber.pending_children.len(), 1);
        assert!(fiber.node.is_none());
        assert!(fiber.parent.is_none() && fiber.child.is_none() && fiber.sibling.is_none());
        assert_eq!(fiber.effect, EffectTag::None);
    }

    #[test]
    fn test_root_fiber_is_materialized_with_no_effect() {
        let fiber: Fiber<u32> = Fiber::root(7, vec![Element::node("div")], None);

        assert!(fiber.kind.is_none());
        assert_eq!(fiber.node, Some(7));
        assert_eq!(fiber.effect, EffectTag::None);
        assert_eq!(fiber.pending_children.len(), 1);
    }
}
