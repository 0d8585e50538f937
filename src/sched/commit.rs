//! Commit: flush a completed generation's effects to the host tree.
//!
//! Runs exactly once per generation, never interleaved with units of work,
//! and never yields. Order matters:
//! 1. Remove every fiber on the deletions list from its host parent
//! 2. Walk the new tree depth-first, attaching placements and re-diffing
//!    updated props
//!
//! Node-less fibers (the synthetic root, fragments) emit no mutation of
//! their own; placements beneath them attach to the nearest materialized
//! ancestor, and deleting one removes every materialized child it covers.

use crate::element::Props;
use crate::fiber::{EffectTag, FiberKey, FiberTree, Generation};
use crate::host::{apply_props, HostAdapter, HostResult};

/// Apply all effects of the completed `wip` generation.
///
/// `deletions` keys point into the `current` arena, the generation being
/// superseded. The pass stops at the first host failure; the caller decides
/// what to do with the abandoned generation.
pub(crate) fn commit_generation<H: HostAdapter>(
    host: &mut H,
    wip: &mut Generation<H::Node>,
    current: Option<&Generation<H::Node>>,
    deletions: &[FiberKey],
) -> HostResult<()> {
    if let Some(current) = current {
        for &key in deletions {
            let Some(parent) = current.tree.host_parent(key) else {
                log::debug!(target: "weft.sched", "deletion with no host parent, skipping");
                continue;
            };
            commit_deletion(host, &current.tree, key, parent)?;
        }
    }

    let mut cursor = Some(wip.root);
    while let Some(key) = cursor {
        commit_fiber(host, wip, current, key)?;
        wip.tree[key].effect = EffectTag::None;
        cursor = wip.tree.dfs_next(key);
    }
    Ok(())
}

/// Apply one fiber's effect.
fn commit_fiber<H: HostAdapter>(
    host: &mut H,
    wip: &Generation<H::Node>,
    current: Option<&Generation<H::Node>>,
    key: FiberKey,
) -> HostResult<()> {
    let fiber = &wip.tree[key];
    let Some(node) = fiber.node else {
        // Nothing materialized here; descendants carry their own effects.
        return Ok(());
    };

    match fiber.effect {
        EffectTag::Placement => {
            let Some(parent) = wip.tree.host_parent(key) else {
                log::debug!(target: "weft.sched", "placement with no host parent, skipping");
                return Ok(());
            };
            host.append_child(parent, node)?;
        }
        EffectTag::Update => {
            let prev = fiber
                .alternate
                .and_then(|alt| current.and_then(|generation| generation.tree.get(alt)))
                .map(|old| &old.props);
            let empty = Props::new();
            apply_props(host, node, prev.unwrap_or(&empty), &fiber.props)?;
        }
        EffectTag::None | EffectTag::Deletion => {}
    }
    Ok(())
}

/// Remove a superseded fiber's host material from `host_parent`.
///
/// A fiber that owns a node is detached in one call, taking its whole host
/// subtree with it. A node-less fiber covers several materialized children;
/// each child in its sibling chain is removed from the same host parent.
fn commit_deletion<H: HostAdapter>(
    host: &mut H,
    tree: &FiberTree<H::Node>,
    key: FiberKey,
    host_parent: H::Node,
) -> HostResult<()> {
    let Some(fiber) = tree.get(key) else {
        return Ok(());
    };

    if let Some(node) = fiber.node {
        host.remove_child(host_parent, node)?;
        return Ok(());
    }

    let mut cursor = fiber.child;
    while let Some(child) = cursor {
        commit_deletion(host, tree, child, host_parent)?;
        cursor = tree.get(child).and_then(|fiber| fiber.sibling);
    }
    Ok(())
}
