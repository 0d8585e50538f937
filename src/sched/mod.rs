//! Scheduler: time-sliced rendering and atomic commits.
//!
//! This module turns element trees into host mutations in two phases:
//! - **Render phase**: interruptible. The engine performs one unit of work
//!   per fiber, yielding between units whenever the deadline runs low.
//! - **Commit phase**: atomic. Once the whole tree is reconciled, every
//!   removal, attachment, and prop diff lands in one uninterrupted pass.
//!
//! # Architecture
//!
//! ```text
//! render(element)                tick(deadline)              commit
//! ┌──────────────┐   cursor    ┌──────────────┐   effects  ┌─────────┐
//! │ arm new      │ ──────────▶ │ unit of work │ ─────────▶ │ host    │
//! │ generation   │             │ (resumable)  │            │ adapter │
//! └──────────────┘             └──────────────┘            └─────────┘
//!                                │        ▲
//!                                └────────┘
//!                             yield when the
//!                             slice runs out
//! ```
//!
//! [`Engine`] is the synchronous core; [`RenderDriver`] wraps it in a
//! dedicated thread for callers that want fire-and-forget rendering.

mod commit;
mod deadline;
mod driver;
mod engine;

pub use deadline::{Countdown, Deadline, TimeSlice, Unbounded};
pub use driver::{DriverCommand, DriverConfig, DriverEvent, RenderDriver};
pub use engine::{CommitSummary, Engine, EngineConfig, Progress};
