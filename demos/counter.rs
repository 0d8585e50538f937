//! Counter Demo: Event-driven re-rendering against the in-memory host.
//!
//! Builds a tiny counter view, dispatches synthetic click events, and
//! re-renders after each one. Watch the commit summaries: after the first
//! render every generation is pure updates, because positional matching
//! reuses every host node in place.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use weft::{Element, Engine, Handler, HostError, MemoryHost};

fn view(count: usize, on_click: &Handler) -> Element {
    Element::node("div").with_class("counter").with_children([
        Element::node("button")
            .with_listener("click", on_click.clone())
            .with_child("+1"),
        Element::node("h2").with_child(format!("Count: {count}")),
    ])
}

fn main() -> Result<(), HostError> {
    println!("Weft Counter Demo");
    println!("=================\n");

    let mut host = MemoryHost::new();
    let container = host.create_root();
    let mut engine = Engine::new(host, container);

    let count = Arc::new(AtomicUsize::new(0));
    let clicks = count.clone();
    let on_click = Handler::new(move |_| {
        clicks.fetch_add(1, Ordering::SeqCst);
    });

    engine.render(view(0, &on_click));
    if let Some(summary) = engine.flush()? {
        println!("mounted: {}", engine.host().snapshot(container));
        println!(
            "         ({} placements, {} updates)\n",
            summary.placements, summary.updates
        );
    }

    // Node handles stay stable across generations, so resolving the button
    // once is enough.
    let app = engine.host().children(container)[0];
    let button = engine.host().children(app)[0];

    for round in 1..=3 {
        engine.host().dispatch(button, "click");
        engine.render(view(count.load(Ordering::SeqCst), &on_click));

        if let Some(summary) = engine.flush()? {
            println!("click {round}: {}", engine.host().snapshot(container));
            println!(
                "         ({} placements, {} updates)",
                summary.placements, summary.updates
            );
        }
    }

    println!(
        "\n{} generations committed, {} host mutations journaled",
        engine.generation(),
        engine.host().journal().len()
    );
    Ok(())
}
