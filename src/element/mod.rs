//! Element module: Declarative descriptors consumed by the reconciler.
//!
//! This module contains:
//! - [`Element`]: One desired node with its kind, props, and children
//! - [`ElementKind`]: Closed tag set (host element, text leaf, fragment)
//! - [`Props`] / [`PropValue`]: Deterministic prop map with typed values
//! - [`Handler`] / [`Event`]: Shared event callbacks compared by identity

#[allow(clippy::module_inception)]
mod element;
mod props;

pub use element::{Element, ElementKind};
pub use props::{
    event_key, event_name, Event, Handler, PropValue, Props, CLASS_PROP, NODE_VALUE_PROP,
};
