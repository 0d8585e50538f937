//! One-shot rendering: build and attach a whole element tree synchronously.
//!
//! This is the non-incremental counterpart of [`crate::sched::Engine`]. It
//! creates fresh host nodes for every element on every call, performs no
//! diffing, and keeps no state between calls. Each subtree is assembled
//! while detached and attaches to its parent only once complete, so a
//! partially built tree is never visible through the container.
//!
//! Prefer the engine for anything that re-renders; `mount` suits static
//! trees and is the reference the engine's first render is measured against.

use crate::element::Element;
use crate::host::{materialize, HostAdapter, HostResult};

/// Render `element` into `container`, creating all host material anew.
///
/// Children of node-less groupings attach to `container` directly, exactly
/// as the engine places them.
///
/// # Errors
///
/// The first failed host operation aborts the mount. Nodes created before
/// the failure stay detached in the host; there is no rollback.
pub fn mount<H: HostAdapter>(
    host: &mut H,
    element: &Element,
    container: H::Node,
) -> HostResult<()> {
    match materialize(host, element.kind(), element.props())? {
        Some(node) => {
            for child in element.children() {
                mount(host, child, node)?;
            }
            host.append_child(container, node)?;
        }
        None => {
            for child in element.children() {
                mount(host, child, container)?;
            }
        }
    }
    Ok(())
}
