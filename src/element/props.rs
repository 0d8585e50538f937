//! Typed prop values, prop maps, and event handlers.
//!
//! Props are decided at construction time: a prop is either plain data
//! (string, number, bool) or an event handler. The reconciler and the prop
//! differ dispatch on the variant, never on runtime inspection of the value.
//!
//! Two key conventions carry over from the element wire format:
//! - Event props use `on<Event>` keys (`onClick` binds the host `click` event).
//! - Class-list props use the `className` key and append rather than overwrite.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Prop key that routes to the host's class list instead of a plain attribute.
pub const CLASS_PROP: &str = "className";

/// Prop key that carries the literal text of a text leaf.
pub const NODE_VALUE_PROP: &str = "nodeValue";

/// Payload delivered to an event listener when the host dispatches an event.
#[derive(Debug, Clone)]
pub struct Event {
    /// Host event name, e.g. `"click"` or `"input"`.
    pub name: String,
}

impl Event {
    /// Create an event payload for the given host event name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A shared event callback.
///
/// Handlers compare by allocation identity, not by behavior: unbinding "the
/// listener bound to f" is only meaningful if f can be recognized again, so
/// two clones of one handler are equal and two separately-created handlers
/// with identical bodies are not.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&Event) + Send + Sync>);

impl Handler {
    /// Wrap a callback in a shareable handler.
    pub fn new(f: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the callback.
    #[inline]
    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.0))
    }
}

/// A single prop value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// String data, including text-leaf `nodeValue` payloads.
    Str(String),
    /// Numeric data.
    Number(f64),
    /// Boolean data.
    Bool(bool),
    /// An event listener; the prop key names the event.
    Handler(Handler),
}

impl PropValue {
    /// View this value as a handler, if it is one.
    pub const fn as_handler(&self) -> Option<&Handler> {
        match self {
            Self::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Whether this value is an event handler.
    pub const fn is_handler(&self) -> bool {
        matches!(self, Self::Handler(_))
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Number(n) => {
                // Integer-valued numbers print without a trailing ".0".
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Bool(b) => write!(f, "{b}"),
            Self::Handler(h) => write!(f, "{h:?}"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Handler> for PropValue {
    fn from(h: Handler) -> Self {
        Self::Handler(h)
    }
}

/// An ordered prop map with deterministic iteration.
///
/// Children are structurally absent: they live on the element itself, so the
/// map never needs a reserved `children` key excluded from host assignment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: BTreeMap<String, PropValue>,
}

impl Props {
    /// Create an empty prop map.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or replace a prop.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a prop by key.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    /// Whether a prop with the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate props in deterministic (sorted-key) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of props.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no props.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derive the host event name from an `on<Event>` prop key.
///
/// `onClick` becomes `click`. Keys without the `on` prefix fall back to their
/// lowercased form, so a handler stored under an unconventional key still
/// binds a well-defined event.
pub fn event_name(key: &str) -> String {
    key.strip_prefix("on").unwrap_or(key).to_lowercase()
}

/// Build the `on<Event>` prop key for a host event name.
///
/// `click` becomes `onClick`, so [`event_name`] round-trips it.
pub fn event_key(event: &str) -> String {
    let mut key = String::with_capacity(event.len() + 2);
    key.push_str("on");
    let mut chars = event.chars();
    if let Some(first) = chars.next() {
        key.extend(first.to_uppercase());
        key.push_str(chars.as_str());
    }
    key
}
