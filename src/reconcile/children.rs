//! Positional child diff: line up fresh elements against committed children.
//!
//! This implements the reuse decision at the heart of the engine:
//! 1. Walk the new element list and the committed child chain in lockstep
//! 2. Same kind at the same position: reuse the host node, tag `Update`
//! 3. Kind mismatch or surplus element: fresh fiber, tag `Placement`
//! 4. Kind mismatch or surplus committed child: record a deletion
//!
//! Matching is strictly positional. The `key` hint on elements is carried but
//! never consulted, so reordering same-kinded children produces an update
//! cascade rather than a minimal move script.

use crate::element::Element;
use crate::fiber::{EffectTag, Fiber, FiberKey, FiberTree};

/// Counters describing one reconciliation pass.
///
/// Accumulated across units of work by the scheduler and surfaced in the
/// commit summary for debugging and profiling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Fibers created this pass with no committed counterpart.
    pub placements: usize,
    /// Fibers created this pass that reuse a committed host node.
    pub updates: usize,
    /// Committed fibers recorded for removal at commit.
    pub removals: usize,
}

impl ReconcileStats {
    /// Whether the pass produced any effect at all.
    pub const fn any_work(&self) -> bool {
        self.placements > 0 || self.updates > 0 || self.removals > 0
    }

    /// Fold another pass's counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.placements += other.placements;
        self.updates += other.updates;
        self.removals += other.removals;
    }
}

/// Reconcile `elements` as the children of `parent`, creating linked child
/// fibers in the work-in-progress arena.
///
/// The committed counterparts are found through `parent`'s alternate in the
/// `committed` arena; a first render passes `None` and every child becomes a
/// placement. Committed fibers with no surviving counterpart are pushed onto
/// `deletions` (keys into the committed arena) rather than tagged in place,
/// so the committed tree stays untouched until commit.
///
/// # Returns
///
/// Counters for the placements, updates, and removals this pass decided.
pub fn reconcile_children<N: Copy>(
    wip: &mut FiberTree<N>,
    committed: Option<&FiberTree<N>>,
    parent: FiberKey,
    elements: Vec<Element>,
    deletions: &mut Vec<FiberKey>,
) -> ReconcileStats {
    let mut stats = ReconcileStats::default();

    // First committed child at this position, reached through the alternate.
    let mut old_cursor = wip
        .get(parent)
        .and_then(|fiber| fiber.alternate)
        .and_then(|alt| committed.and_then(|tree| tree.get(alt)))
        .and_then(|old| old.child);

    let mut elements = elements.into_iter();
    let mut next_element = elements.next();
    let mut last_linked: Option<FiberKey> = None;

    while next_element.is_some() || old_cursor.is_some() {
        let old_key = old_cursor;
        let old = old_key.and_then(|key| committed.and_then(|tree| tree.get(key)));

        let same_kind = matches!(
            (&next_element, old),
            (Some(element), Some(old_fiber)) if old_fiber.kind.as_ref() == Some(element.kind())
        );

        let mut created: Option<FiberKey> = None;

        if same_kind {
            if let (Some(element), Some(old_fiber), Some(key)) =
                (next_element.take(), old, old_key)
            {
                // Same kind at the same position: keep the host node, diff
                // props at commit.
                let mut fiber = Fiber::from_element(element);
                fiber.node = old_fiber.node;
                fiber.parent = Some(parent);
                fiber.alternate = Some(key);
                fiber.effect = EffectTag::Update;
                created = Some(wip.insert(fiber));
                stats.updates += 1;
            }
        } else {
            if let Some(element) = next_element.take() {
                let mut fiber = Fiber::from_element(element);
                fiber.parent = Some(parent);
                fiber.effect = EffectTag::Placement;
                created = Some(wip.insert(fiber));
                stats.placements += 1;
            }
            if let Some(key) = old_key {
                deletions.push(key);
                stats.removals += 1;
            }
        }

        if let Some(key) = created {
            match last_linked {
                None => wip[parent].child = Some(key),
                Some(prev) => wip[prev].sibling = Some(key),
            }
            last_linked = Some(key);
        }

        old_cursor = old.and_then(|fiber| fiber.sibling);
        next_element = elements.next();
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::fiber::Generation;

    /// Build a committed generation by reconciling `elements` under a fresh
    /// root with no predecessor, then faking materialized nodes.
    fn committed_generation(elements: Vec<Element>) -> Generation<u32> {
        let mut tree = FiberTree::new();
        let root = tree.insert(Fiber::root(0, Vec::new(), None));
        let mut deletions = Vec::new();
        reconcile_children(&mut tree, None, root, elements, &mut deletions);
        assert!(deletions.is_empty());

        // Materialize every non-root fiber as the commit phase would.
        let mut next_node = 1u32;
        let mut cursor = root;
        while let Some(key) = tree.dfs_next(cursor) {
            tree[key].node = Some(next_node);
            tree[key].effect = EffectTag::None;
            next_node += 1;
            cursor = key;
        }
        Generation { tree, root }
    }

    /// Start a work-in-progress generation whose root aliases `current`.
    fn wip_over(current: &Generation<u32>) -> (FiberTree<u32>, FiberKey) {
        let mut tree = FiberTree::new();
        let root = tree.insert(Fiber::root(0, Vec::new(), Some(current.root)));
        (tree, root)
    }

    fn child_kinds(tree: &FiberTree<u32>, parent: FiberKey) -> Vec<(ElementKind, EffectTag)> {
        let mut out = Vec::new();
        let mut cursor = tree[parent].child;
        while let Some(key) = cursor {
            let fiber = &tree[key];
            out.push((
                fiber.kind.clone().unwrap_or(ElementKind::Fragment),
                fiber.effect,
            ));
            cursor = fiber.sibling;
        }
        out
    }

    #[test]
    fn test_first_render_places_every_child() {
        let mut tree = FiberTree::new();
        let root = tree.insert(Fiber::root(0u32, Vec::new(), None));
        let mut deletions = Vec::new();

        let stats = reconcile_children(
            &mut tree,
            None,
            root,
            vec![Element::node("div"), Element::text("hi")],
            &mut deletions,
        );

        assert_eq!(stats.placements, 2);
        assert_eq!(stats.updates, 0);
        assert_eq!(stats.removals, 0);
        assert!(deletions.is_empty());
        assert_eq!(
            child_kinds(&tree, root),
            vec![
                (ElementKind::Host("div".to_string()), EffectTag::Placement),
                (ElementKind::Text, EffectTag::Placement),
            ]
        );
    }

    #[test]
    fn test_same_kind_reuses_node_as_update() {
        let current = committed_generation(vec![Element::node("div")]);
        let old_child = current.tree[current.root].child;
        let reused_node = old_child.and_then(|key| current.tree[key].node);
        assert!(reused_node.is_some());

        let (mut wip, root) = wip_over(&current);
        let mut deletions = Vec::new();
        let stats = reconcile_children(
            &mut wip,
            Some(&current.tree),
            root,
            vec![Element::node("div").with_class("active")],
            &mut deletions,
        );

        assert_eq!(stats.updates, 1);
        assert_eq!(stats.placements, 0);
        assert!(deletions.is_empty());

        let new_child = wip[root].child.map(|key| &wip[key]);
        let new_child = new_child.unwrap();
        assert_eq!(new_child.effect, EffectTag::Update);
        assert_eq!(new_child.node, reused_node);
        assert_eq!(new_child.alternate, old_child);
    }

    #[test]
    fn test_kind_change_replaces_at_position() {
        let current = committed_generation(vec![Element::node("span")]);
        let old_child = current.tree[current.root].child;

        let (mut wip, root) = wip_over(&current);
        let mut deletions = Vec::new();
        let stats = reconcile_children(
            &mut wip,
            Some(&current.tree),
            root,
            vec![Element::node("div")],
            &mut deletions,
        );

        // One position, two effects: the old node goes, a new one arrives.
        assert_eq!(stats.placements, 1);
        assert_eq!(stats.removals, 1);
        assert_eq!(stats.updates, 0);
        assert_eq!(deletions, vec![old_child.unwrap()]);

        let new_child = &wip[wip[root].child.unwrap()];
        assert_eq!(new_child.effect, EffectTag::Placement);
        assert!(new_child.node.is_none());
        assert!(new_child.alternate.is_none());
    }

    #[test]
    fn test_growth_appends_placements_after_updates() {
        let current = committed_generation(vec![Element::node("li")]);

        let (mut wip, root) = wip_over(&current);
        let mut deletions = Vec::new();
        let stats = reconcile_children(
            &mut wip,
            Some(&current.tree),
            root,
            vec![Element::node("li"), Element::node("li"), Element::node("li")],
            &mut deletions,
        );

        assert_eq!(stats.updates, 1);
        assert_eq!(stats.placements, 2);
        assert!(deletions.is_empty());
        assert_eq!(
            child_kinds(&wip, root)
                .iter()
                .map(|(_, effect)| *effect)
                .collect::<Vec<_>>(),
            vec![EffectTag::Update, EffectTag::Placement, EffectTag::Placement]
        );
    }

    #[test]
    fn test_shrink_records_surplus_as_deletions() {
        let current = committed_generation(vec![
            Element::node("li"),
            Element::node("li"),
            Element::node("li"),
        ]);

        let (mut wip, root) = wip_over(&current);
        let mut deletions = Vec::new();
        let stats = reconcile_children(
            &mut wip,
            Some(&current.tree),
            root,
            vec![Element::node("li")],
            &mut deletions,
        );

        assert_eq!(stats.updates, 1);
        assert_eq!(stats.removals, 2);
        assert_eq!(deletions.len(), 2);
        assert_eq!(child_kinds(&wip, root).len(), 1);

        // The surviving chain must not link to removed positions.
        let only = wip[root].child.unwrap();
        assert!(wip[only].sibling.is_none());
    }

    #[test]
    fn test_empty_element_list_deletes_all_children() {
        let current = committed_generation(vec![Element::node("a"), Element::node("b")]);

        let (mut wip, root) = wip_over(&current);
        let mut deletions = Vec::new();
        let stats =
            reconcile_children(&mut wip, Some(&current.tree), root, Vec::new(), &mut deletions);

        assert_eq!(stats.removals, 2);
        assert!(wip[root].child.is_none());
    }

    #[test]
    fn test_text_kind_matches_text_regardless_of_literal() {
        let current = committed_generation(vec![Element::text("one")]);

        let (mut wip, root) = wip_over(&current);
        let mut deletions = Vec::new();
        let stats = reconcile_children(
            &mut wip,
            Some(&current.tree),
            root,
            vec![Element::text("two")],
            &mut deletions,
        );

        // The literal is a prop; changing it is an update, not a replacement.
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.placements, 0);
    }

    #[test]
    fn test_stats_merge_accumulates() {
        let mut total = ReconcileStats::default();
        total.merge(&ReconcileStats {
            placements: 2,
            updates: 1,
            removals: 0,
        });
        total.merge(&ReconcileStats {
            placements: 0,
            updates: 3,
            removals: 1,
        });
        assert_eq!(total.placements, 2);
        assert_eq!(total.updates, 4);
        assert_eq!(total.removals, 1);
        assert!(total.any_work());
        assert!(!ReconcileStats::default().any_work());
    }
}
