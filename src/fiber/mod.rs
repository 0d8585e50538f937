//! Fiber tree primitives.
//!
//! A fiber is one unit of render work: a node of the work-in-progress tree
//! holding its element description, its structural links, and the effect the
//! commit phase must apply for it. Fibers are stored in a per-generation
//! arena ([`FiberTree`]) and addressed by [`FiberKey`] handles, so links
//! between fibers and across generations are plain copyable keys.

mod node;
mod tree;

pub use node::{EffectTag, Fiber};
pub use tree::{FiberKey, FiberTree, Generation};
