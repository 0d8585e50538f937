//! Host boundary: the adapter trait, the prop differ, and a reference host.
//!
//! The engine core never names a concrete tree technology. Everything it
//! does to real nodes goes through [`HostAdapter`], props land through
//! [`apply_props`], and [`MemoryHost`] is the adapter used by tests, demos,
//! and benchmarks.

mod adapter;
mod apply;
mod memory;

pub use adapter::{HostAdapter, HostError, HostResult};
pub use apply::{apply_props, materialize};
pub use memory::{MemoryHost, Mutation, NodeId};
