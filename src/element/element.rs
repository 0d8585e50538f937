//! Element: the immutable, declarative description of a desired node.
//!
//! Elements are cheap descriptors built fresh for every render; the engine
//! consumes them and never hands them back. A text leaf is a reserved element
//! kind whose literal lives in the `nodeValue` prop, and bare strings convert
//! into text leaves at construction time so the reconciler never inspects
//! value shapes at runtime.

use super::props::{event_key, Handler, Props, CLASS_PROP, NODE_VALUE_PROP};
use std::fmt;

/// The category of host material an element describes.
///
/// The kind is fixed at construction. Reconciliation compares kinds to decide
/// between updating a host node in place and replacing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// A host element with the given tag, e.g. `div`.
    Host(String),
    /// A text leaf carrying its literal in the `nodeValue` prop.
    Text,
    /// A node-less grouping; its children attach to the nearest materialized
    /// ancestor in the host tree.
    Fragment,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(tag) => f.write_str(tag),
            Self::Text => f.write_str("#text"),
            Self::Fragment => f.write_str("#fragment"),
        }
    }
}

/// An immutable description of one desired node: kind, props, ordered
/// children, and an optional identity hint.
///
/// # Example
///
/// ```
/// use weft::Element;
///
/// let tree = Element::node("section").with_child(
///     Element::node("h1")
///         .with_attr("title", "foo")
///         .with_class("app")
///         .with_child("Hello"),
/// );
/// assert_eq!(tree.children().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    kind: ElementKind,
    props: Props,
    children: Vec<Element>,
    key: Option<String>,
}

impl Element {
    /// Describe a host element with the given tag.
    pub fn node(tag: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Host(tag.into()),
            props: Props::new(),
            children: Vec::new(),
            key: None,
        }
    }

    /// Describe a text leaf holding the given literal.
    pub fn text(value: impl Into<String>) -> Self {
        let mut props = Props::new();
        props.insert(NODE_VALUE_PROP, value.into());
        Self {
            kind: ElementKind::Text,
            props,
            children: Vec::new(),
            key: None,
        }
    }

    /// Describe a node-less grouping of children.
    pub fn fragment(children: impl IntoIterator<Item = Self>) -> Self {
        Self {
            kind: ElementKind::Fragment,
            props: Props::new(),
            children: children.into_iter().collect(),
            key: None,
        }
    }

    /// Set a plain attribute prop.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<super::PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Set the class-list prop (`className`).
    ///
    /// The host applies class names additively; see the prop-diff contract in
    /// [`crate::host`].
    #[must_use]
    pub fn with_class(mut self, name: impl Into<String>) -> Self {
        self.props.insert(CLASS_PROP, name.into());
        self
    }

    /// Bind an event listener under the conventional `on<Event>` prop key.
    #[must_use]
    pub fn with_listener(mut self, event: &str, handler: Handler) -> Self {
        self.props.insert(event_key(event), handler);
        self
    }

    /// Attach an identity hint.
    ///
    /// The hint is carried through to the fiber but the child matcher is
    /// positional and does not consult it; see [`crate::reconcile`].
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Append one child. Bare strings become text leaves.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Self>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children. Bare strings become text leaves.
    #[must_use]
    pub fn with_children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Self>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// The element's kind.
    pub const fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// The element's props.
    pub const fn props(&self) -> &Props {
        &self.props
    }

    /// The element's ordered children.
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// The element's identity hint, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Decompose into the parts a fiber takes ownership of.
    pub(crate) fn into_parts(self) -> (ElementKind, Props, Vec<Self>) {
        (self.kind, self.props, self.children)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::props::{PropValue, NODE_VALUE_PROP};
    use super::*;

    #[test]
    fn test_text_leaf_carries_node_value() {
        let leaf = Element::text("Hello");
        assert_eq!(*leaf.kind(), ElementKind::Text);
        assert_eq!(
            leaf.props().get(NODE_VALUE_PROP),
            Some(&PropValue::Str("Hello".to_string()))
        );
        assert!(leaf.children().is_empty());
    }

    #[test]
    fn test_bare_strings_become_text_leaves() {
        let parent = Element::node("p").with_child("Hello").with_child("World");
        assert_eq!(parent.children().len(), 2);
        for child in parent.children() {
            assert_eq!(*child.kind(), ElementKind::Text);
        }
    }

    #[test]
    fn test_builder_props() {
        let el = Element::node("a")
            .with_attr("href", "https://example.com")
            .with_class("link")
            .with_listener("click", Handler::new(|_| {}));

        assert_eq!(
            el.props().get("href"),
            Some(&PropValue::Str("https://example.com".to_string()))
        );
        assert_eq!(
            el.props().get(CLASS_PROP),
            Some(&PropValue::Str("link".to_string()))
        );
        assert!(el.props().get("onClick").is_some_and(PropValue::is_handler));
    }

    #[test]
    fn test_fragment_has_no_props() {
        let frag = Element::fragment([Element::node("li"), Element::node("li")]);
        assert_eq!(*frag.kind(), ElementKind::Fragment);
        assert!(frag.props().is_empty());
        assert_eq!(frag.children().len(), 2);
    }

    #[test]
    fn test_key_is_stored() {
        let el = Element::node("li").with_key("row-3");
        assert_eq!(el.key(), Some("row-3"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ElementKind::Host("div".to_string()).to_string(), "div");
        assert_eq!(ElementKind::Text.to_string(), "#text");
        assert_eq!(ElementKind::Fragment.to_string(), "#fragment");
    }
}
