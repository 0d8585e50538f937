//! # Weft
//!
//! An incremental, interruptible UI reconciler over a pluggable host tree.
//!
//! Weft turns declarative element trees into minimal host mutations. Render
//! work is split into per-fiber units that pause and resume on a deadline,
//! so reconciling a large tree never blocks the thread driving it, while
//! every structural mutation lands in one atomic commit pass.
//!
//! ## Core Concepts
//!
//! - **Elements**: Cheap immutable descriptions of the desired tree
//! - **Fibers**: Per-generation work nodes linked for resumable traversal
//! - **Two-phase rendering**: Interruptible reconcile, atomic commit
//! - **Host adapters**: Any tree can be the target behind [`HostAdapter`]
//!
//! ## Example
//!
//! ```rust
//! use weft::{Element, Engine, MemoryHost};
//!
//! let mut host = MemoryHost::new();
//! let container = host.create_root();
//!
//! let mut engine = Engine::new(host, container);
//! engine.render(Element::node("div").with_class("app").with_child("Hello"));
//! engine.flush().unwrap();
//!
//! assert_eq!(
//!     engine.host().snapshot(container),
//!     "<div class=\"app\">Hello</div>"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod element;
pub mod fiber;
pub mod reconcile;
pub mod host;
pub mod sched;
pub mod mount;

// Re-exports for convenience
pub use element::{Element, ElementKind, Event, Handler, PropValue, Props};
pub use host::{HostAdapter, HostError, HostResult, MemoryHost};
pub use mount::mount;
pub use sched::{CommitSummary, Engine, EngineConfig, Progress, RenderDriver};
