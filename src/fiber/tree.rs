//! Arena storage and traversal for one generation's fiber tree.
//!
//! Fibers live in a slotmap keyed by stable [`FiberKey`] handles; structural
//! links hold keys, not references, so `alternate` links across generations
//! never create ownership cycles and abandoning a superseded generation is
//! just dropping its arena.

use super::node::Fiber;
use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Stable handle addressing a fiber within one generation's arena.
    pub struct FiberKey;
}

/// The arena holding every fiber of one generation.
#[derive(Debug)]
pub struct FiberTree<N> {
    fibers: SlotMap<FiberKey, Fiber<N>>,
}

impl<N> Default for FiberTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> FiberTree<N> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            fibers: SlotMap::with_key(),
        }
    }

    /// Insert an unlinked fiber, returning its key.
    pub fn insert(&mut self, fiber: Fiber<N>) -> FiberKey {
        self.fibers.insert(fiber)
    }

    /// Look up a fiber.
    pub fn get(&self, key: FiberKey) -> Option<&Fiber<N>> {
        self.fibers.get(key)
    }

    /// Look up a fiber mutably.
    pub fn get_mut(&mut self, key: FiberKey) -> Option<&mut Fiber<N>> {
        self.fibers.get_mut(key)
    }

    /// Whether the arena still holds the given key.
    pub fn contains(&self, key: FiberKey) -> bool {
        self.fibers.contains_key(key)
    }

    /// Number of fibers in this generation.
    pub fn len(&self) -> usize {
        self.fibers.len()
    }

    /// Whether the arena holds no fibers.
    pub fn is_empty(&self) -> bool {
        self.fibers.is_empty()
    }

    /// Iterate all fibers in arena order.
    ///
    /// Arena order is not tree order; use [`FiberTree::dfs_next`] for the
    /// traversal the scheduler and commit phase follow.
    pub fn iter(&self) -> impl Iterator<Item = (FiberKey, &Fiber<N>)> {
        self.fibers.iter()
    }

    /// The depth-first successor of `from`: its child if present, otherwise
    /// its sibling, otherwise the sibling of the nearest ancestor that has
    /// one. Returns `None` once the walk regains the root, which is how the
    /// scheduler detects that a generation's work is exhausted.
    pub fn dfs_next(&self, from: FiberKey) -> Option<FiberKey> {
        let fiber = self.get(from)?;
        if let Some(child) = fiber.child {
            return Some(child);
        }
        let mut cursor = fiber;
        loop {
            if let Some(sibling) = cursor.sibling {
                return Some(sibling);
            }
            cursor = self.get(cursor.parent?)?;
        }
    }
}

impl<N: Copy> FiberTree<N> {
    /// The host node of the nearest ancestor that owns one.
    ///
    /// Fragments own no host node, so attaching or detaching a fiber's node
    /// must skip over them to the closest materialized ancestor.
    pub fn host_parent(&self, of: FiberKey) -> Option<N> {
        let mut cursor = self.get(of)?.parent;
        while let Some(key) = cursor {
            let fiber = self.get(key)?;
            if let Some(node) = fiber.node {
                return Some(node);
            }
            cursor = fiber.parent;
        }
        None
    }
}

impl<N> Index<FiberKey> for FiberTree<N> {
    type Output = Fiber<N>;

    fn index(&self, key: FiberKey) -> &Self::Output {
        &self.fibers[key]
    }
}

impl<N> IndexMut<FiberKey> for FiberTree<N> {
    fn index_mut(&mut self, key: FiberKey) -> &mut Self::Output {
        &mut self.fibers[key]
    }
}

/// One render/commit cycle's fiber tree, identified by its root fiber.
///
/// While pending this is the work-in-progress generation; after a successful
/// commit it becomes the current one.
#[derive(Debug)]
pub struct Generation<N> {
    /// The arena holding this generation's fibers.
    pub tree: FiberTree<N>,
    /// The synthetic root fiber wrapping the render container.
    pub root: FiberKey,
}

#[cfg(test)]
mod tests {
    use super::super::node::Fiber;
    use super::*;
    use crate::element::Element;

    fn leaf(tree: &mut FiberTree<u32>) -> FiberKey {
        tree.insert(Fiber::from_element(Element::node("div")))
    }

    /// Link `children` under `parent` in order, mirroring what the
    /// reconciler produces.
    fn link(tree: &mut FiberTree<u32>, parent: FiberKey, children: &[FiberKey]) {
        let mut previous: Option<FiberKey> = None;
        for &child in children {
            tree[child].parent = Some(parent);
            match previous {
                None => tree[parent].child = Some(child),
                Some(prev) => tree[prev].sibling = Some(child),
            }
            previous = Some(child);
        }
    }

    #[test]
    fn test_dfs_visits_every_fiber_exactly_once() {
        // root -> (a -> (b, c), d -> (e))
        let mut tree = FiberTree::new();
        let root = tree.insert(Fiber::root(0, Vec::new(), None));
        let a = leaf(&mut tree);
        let b = leaf(&mut tree);
        let c = leaf(&mut tree);
        let d = leaf(&mut tree);
        let e = leaf(&mut tree);
        link(&mut tree, root, &[a, d]);
        link(&mut tree, a, &[b, c]);
        link(&mut tree, d, &[e]);

        let mut visited = vec![root];
        let mut cursor = root;
        while let Some(next) = tree.dfs_next(cursor) {
            assert!(!visited.contains(&next), "fiber visited twice");
            visited.push(next);
            cursor = next;
        }

        assert_eq!(visited, vec![root, a, b, c, d, e]);
        assert_eq!(visited.len(), tree.len());
    }

    #[test]
    fn test_dfs_terminates_on_single_fiber() {
        let mut tree = FiberTree::new();
        let root = tree.insert(Fiber::root(0u32, Vec::new(), None));
        assert_eq!(tree.dfs_next(root), None);
    }

    #[test]
    fn test_dfs_returns_to_ancestor_sibling() {
        // root -> (a -> (b), c): after b the walk must climb to c.
        let mut tree = FiberTree::new();
        let root = tree.insert(Fiber::root(0u32, Vec::new(), None));
        let a = leaf(&mut tree);
        let b = leaf(&mut tree);
        let c = leaf(&mut tree);
        link(&mut tree, root, &[a, c]);
        link(&mut tree, a, &[b]);

        assert_eq!(tree.dfs_next(b), Some(c));
        assert_eq!(tree.dfs_next(c), None);
    }

    #[test]
    fn test_host_parent_skips_unmaterialized_fibers() {
        let mut tree = FiberTree::new();
        let root = tree.insert(Fiber::root(42u32, Vec::new(), None));
        let fragment = tree.insert(Fiber::from_element(Element::fragment([])));
        let inner = leaf(&mut tree);
        link(&mut tree, root, &[fragment]);
        link(&mut tree, fragment, &[inner]);

        // The fragment owns no node, so the nearest materialized ancestor of
        // `inner` is the container itself.
        assert_eq!(tree.host_parent(inner), Some(42));
        assert_eq!(tree.host_parent(root), None);
    }
}
