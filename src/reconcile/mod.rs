//! Child reconciliation.
//!
//! Decides, position by position, whether a committed fiber's host node can
//! be reused for a fresh element or must be replaced. Produces effect-tagged
//! work-in-progress fibers and a deletion list; it never touches the host
//! itself. The commit phase in [`crate::sched`] turns those tags into host
//! mutations.

mod children;

pub use children::{reconcile_children, ReconcileStats};
