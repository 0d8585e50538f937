//! Prop diffing against a live host node.
//!
//! One function carries the whole update contract:
//! 1. Unbind listeners that are gone or rebound to a different handler
//! 2. Clear plain props with no successor in the next mapping
//! 3. Assign new or changed plain props
//! 4. Bind new or changed listeners
//!
//! Teardown always completes before any new prop is applied, so a key that
//! changes meaning between generations never sees its old and new forms
//! collide on the node.

use super::adapter::{HostAdapter, HostResult};
use crate::element::{event_name, ElementKind, PropValue, Props, CLASS_PROP, NODE_VALUE_PROP};

/// Create the host node a fiber kind calls for, with `props` already applied.
///
/// Fragments own no host material and yield `None`; text kinds yield an empty
/// text node whose literal is carried in by the `nodeValue` prop. Applying
/// props to a fresh node is a plain diff against an empty previous mapping.
pub fn materialize<H: HostAdapter>(
    host: &mut H,
    kind: &ElementKind,
    props: &Props,
) -> HostResult<Option<H::Node>> {
    let node = match kind {
        ElementKind::Host(tag) => host.create_element(tag),
        ElementKind::Text => host.create_text(),
        ElementKind::Fragment => return Ok(None),
    };
    apply_props(host, node, &Props::new(), props)?;
    Ok(Some(node))
}

/// Diff `prev` against `next` and mutate the host node to match.
///
/// Routing depends on the prop key and value variant:
/// - handler values bind and unbind host listeners under the event name
///   derived from their `on<Event>` key, compared by handler identity
/// - `nodeValue` routes to the text channel; clearing it sets empty text
/// - `className` routes to the class list and is append-only: a changed
///   class name is added without removing its predecessor, and only the
///   key's disappearance clears the list
/// - everything else is assigned as a plain attribute
///
/// # Errors
///
/// The first failed host operation aborts the diff; earlier mutations are
/// not rolled back. The caller decides what to do with the half-updated
/// generation (see [`crate::sched`]).
pub fn apply_props<H: HostAdapter>(
    host: &mut H,
    node: H::Node,
    prev: &Props,
    next: &Props,
) -> HostResult<()> {
    // Unbind listeners that are gone or rebound to a different handler.
    for (key, value) in prev.iter() {
        if let Some(old) = value.as_handler() {
            let survives = next
                .get(key)
                .and_then(PropValue::as_handler)
                .is_some_and(|new| new == old);
            if !survives {
                host.remove_listener(node, &event_name(key))?;
            }
        }
    }

    // Clear plain props with no successor.
    for (key, value) in prev.iter() {
        if value.is_handler() || next.contains(key) {
            continue;
        }
        if key == NODE_VALUE_PROP {
            host.set_text(node, "")?;
        } else {
            host.remove_attribute(node, key)?;
        }
    }

    // Assign new or changed plain props, bind new or changed listeners.
    for (key, value) in next.iter() {
        if prev.get(key) == Some(value) {
            continue;
        }
        match value {
            PropValue::Handler(handler) => {
                host.add_listener(node, &event_name(key), handler.clone())?;
            }
            plain => {
                let rendered = plain.to_string();
                if key == NODE_VALUE_PROP {
                    host.set_text(node, &rendered)?;
                } else if key == CLASS_PROP {
                    host.add_class(node, &rendered)?;
                } else {
                    host.set_attribute(node, key, &rendered)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::memory::{MemoryHost, Mutation};
    use super::*;
    use crate::element::Handler;

    fn props(entries: &[(&str, PropValue)]) -> Props {
        let mut props = Props::new();
        for (key, value) in entries {
            props.insert(*key, value.clone());
        }
        props
    }

    #[test]
    fn test_removed_listener_and_changed_attribute() {
        let mut host = MemoryHost::new();
        let node = host.create_element("button");
        let f = Handler::new(|_| {});

        let prev = props(&[("a", 1.into()), ("onClick", f.into())]);
        let next = props(&[("a", 2.into())]);
        apply_props(&mut host, node, &prev, &next).unwrap();

        // The stale listener goes, the surviving attribute is reassigned,
        // and nothing tries to remove "a".
        assert_eq!(
            &host.journal()[1..],
            &[
                Mutation::RemoveListener {
                    node,
                    event: "click".to_string(),
                },
                Mutation::SetAttribute {
                    node,
                    key: "a".to_string(),
                    value: "2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_identical_props_emit_nothing() {
        let mut host = MemoryHost::new();
        let node = host.create_element("div");
        let f = Handler::new(|_| {});

        let prev = props(&[("id", "x".into()), ("onInput", PropValue::from(f.clone()))]);
        let next = props(&[("id", "x".into()), ("onInput", PropValue::from(f))]);

        let before = host.journal().len();
        apply_props(&mut host, node, &prev, &next).unwrap();
        assert_eq!(host.journal().len(), before);
    }

    #[test]
    fn test_rebound_handler_is_replaced_by_identity() {
        let mut host = MemoryHost::new();
        let node = host.create_element("div");
        let old = Handler::new(|_| {});
        let new = Handler::new(|_| {});

        let prev = props(&[("onClick", old.into())]);
        let next = props(&[("onClick", new.into())]);
        apply_props(&mut host, node, &prev, &next).unwrap();

        assert_eq!(
            &host.journal()[1..],
            &[
                Mutation::RemoveListener {
                    node,
                    event: "click".to_string(),
                },
                Mutation::AddListener {
                    node,
                    event: "click".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_teardown_precedes_apply() {
        let mut host = MemoryHost::new();
        let node = host.create_element("div");

        let prev = props(&[("title", "old".into())]);
        let next = props(&[("alt", "new".into())]);
        apply_props(&mut host, node, &prev, &next).unwrap();

        assert_eq!(
            &host.journal()[1..],
            &[
                Mutation::RemoveAttribute {
                    node,
                    key: "title".to_string(),
                },
                Mutation::SetAttribute {
                    node,
                    key: "alt".to_string(),
                    value: "new".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_class_appends_then_clears() {
        let mut host = MemoryHost::new();
        let node = host.create_element("div");

        let first = props(&[(CLASS_PROP, "app".into())]);
        apply_props(&mut host, node, &Props::new(), &first).unwrap();
        assert_eq!(host.classes(node), Some(&["app".to_string()][..]));

        // A changed class name appends; the old name lingers.
        let second = props(&[(CLASS_PROP, "active".into())]);
        apply_props(&mut host, node, &first, &second).unwrap();
        assert_eq!(
            host.classes(node),
            Some(&["app".to_string(), "active".to_string()][..])
        );

        // Only dropping the key clears the list.
        apply_props(&mut host, node, &second, &Props::new()).unwrap();
        assert_eq!(host.classes(node), Some(&[][..]));
    }

    #[test]
    fn test_materialize_text_carries_literal() {
        let mut host = MemoryHost::new();
        let node = materialize(&mut host, &ElementKind::Text, &props(&[(NODE_VALUE_PROP, "hi".into())]))
            .unwrap()
            .unwrap();
        assert_eq!(host.text(node), Some("hi"));
    }

    #[test]
    fn test_materialize_fragment_yields_no_node() {
        let mut host = MemoryHost::new();
        let slot = materialize(&mut host, &ElementKind::Fragment, &Props::new()).unwrap();
        assert!(slot.is_none());
        assert!(host.journal().is_empty());
    }

    #[test]
    fn test_node_value_removal_clears_text() {
        let mut host = MemoryHost::new();
        let node = host.create_text();

        let prev = props(&[(NODE_VALUE_PROP, "gone".into())]);
        apply_props(&mut host, node, &Props::new(), &prev).unwrap();
        assert_eq!(host.text(node), Some("gone"));

        apply_props(&mut host, node, &prev, &Props::new()).unwrap();
        assert_eq!(host.text(node), Some(""));
    }
}
