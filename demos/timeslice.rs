//! Time-slice Demo: Cooperative rendering of a large tree.
//!
//! Renders a few thousand rows under a 1ms per-tick budget, counting how
//! often the engine yields, then interrupts a second render mid-flight to
//! show that only the latest tree ever reaches the host.

use std::time::Duration;
use weft::host::Mutation;
use weft::sched::TimeSlice;
use weft::{Element, Engine, HostError, MemoryHost, Progress};

const SLICE: Duration = Duration::from_millis(1);

fn rows(n: usize, label: &str) -> Element {
    Element::node("ul")
        .with_children((0..n).map(|i| Element::node("li").with_child(format!("{label} {i}"))))
}

fn main() -> Result<(), HostError> {
    println!("Weft Time-slice Demo");
    println!("====================\n");

    let mut host = MemoryHost::new();
    let container = host.create_root();
    let mut engine = Engine::new(host, container);

    // Phase 1: a large first render, advanced one slice at a time. The
    // driving thread regains control between slices.
    engine.render(rows(5000, "row"));
    let mut slices = 0usize;
    let summary = loop {
        slices += 1;
        match engine.tick(&TimeSlice::new(SLICE))? {
            Progress::Yielded => {}
            Progress::Committed(summary) => break summary,
            Progress::Idle => return Ok(()),
        }
    };
    println!(
        "committed {} units over {} slices ({} placements)",
        summary.units, slices, summary.placements
    );

    // Phase 2: start a big re-render, then supersede it after one slice.
    // The superseded generation's nodes are handed back, never attached.
    engine.render(rows(5000, "draft"));
    let _ = engine.tick(&TimeSlice::new(SLICE))?;
    engine.render(rows(10, "final"));

    if let Some(summary) = engine.flush()? {
        println!(
            "superseding render committed generation {} with {} updates, {} removals",
            summary.generation, summary.updates, summary.removals
        );
    }

    let released = engine
        .host()
        .journal()
        .iter()
        .filter(|mutation| matches!(mutation, Mutation::Release { .. }))
        .count();
    println!(
        "{} abandoned nodes released, {} live nodes remain",
        released,
        engine.host().node_count()
    );
    Ok(())
}
