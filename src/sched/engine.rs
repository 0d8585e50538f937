//! Engine: generation lifecycle and the time-sliced work loop.
//!
//! The engine owns the host adapter, the committed generation, and whatever
//! generation is in flight. `render` arms work, `tick` advances it one
//! deadline-bounded slice at a time, and a tick that exhausts the work also
//! runs the commit. All traversal state is a single fiber cursor, so an
//! interrupted render resumes exactly where it yielded.

use super::commit::commit_generation;
use super::deadline::{Deadline, Unbounded};
use crate::element::{Element, ElementKind, Props};
use crate::fiber::{EffectTag, Fiber, FiberKey, FiberTree, Generation};
use crate::host::{apply_props, HostAdapter, HostResult};
use crate::reconcile::{reconcile_children, ReconcileStats};
use std::time::Duration;

/// Configuration for the engine's work loop.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// A tick yields once the deadline's remaining budget drops below this
    /// floor. The check runs between units, never before the first, so a
    /// tick advances even on a spent deadline.
    pub yield_floor: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            yield_floor: Duration::from_millis(1),
        }
    }
}

/// Outcome of one scheduling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// No generation is in flight.
    Idle,
    /// The slice budget ran out with units still pending.
    Yielded,
    /// The in-flight generation completed and its effects landed.
    Committed(CommitSummary),
}

/// What a committed generation did, for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// Committed generation number, starting at 1.
    pub generation: u64,
    /// Fibers that entered the tree for the first time.
    pub placements: usize,
    /// Fibers that reused a committed host node.
    pub updates: usize,
    /// Superseded fibers removed from the host tree.
    pub removals: usize,
    /// Units of work the generation took.
    pub units: usize,
}

/// The reconciliation engine for one container.
///
/// Owns the host adapter and exactly one committed tree. Starting a render
/// while another is in flight discards the unfinished one; nothing of a
/// discarded generation ever reaches the host tree.
#[derive(Debug)]
pub struct Engine<H: HostAdapter> {
    /// Host adapter; sole channel to the real tree.
    host: H,
    /// The container node renders attach into.
    container: H::Node,
    /// Last committed generation, if any.
    current: Option<Generation<H::Node>>,
    /// Generation being built, if any.
    wip: Option<Generation<H::Node>>,
    /// Next unit of work, a key into the in-flight arena.
    cursor: Option<FiberKey>,
    /// Superseded fibers (keys into the committed arena) awaiting removal.
    deletions: Vec<FiberKey>,
    /// Effect counters accumulated for the in-flight generation.
    stats: ReconcileStats,
    /// Units of work performed for the in-flight generation.
    units: usize,
    /// Committed generation count.
    generation: u64,
    config: EngineConfig,
}

impl<H: HostAdapter> Engine<H> {
    /// Create an engine rendering into `container` with default config.
    pub fn new(host: H, container: H::Node) -> Self {
        Self::with_config(host, container, EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(host: H, container: H::Node, config: EngineConfig) -> Self {
        Self {
            host,
            container,
            current: None,
            wip: None,
            cursor: None,
            deletions: Vec::new(),
            stats: ReconcileStats::default(),
            units: 0,
            generation: 0,
            config,
        }
    }

    /// Arm a new generation for `element`.
    ///
    /// Last writer wins: a generation still in flight is discarded, its
    /// never-attached nodes handed back to the host, and work restarts
    /// against the committed baseline. Nothing touches the attached tree
    /// until the new generation commits.
    pub fn render(&mut self, element: Element) {
        self.discard_wip(true);

        let alternate = self.current.as_ref().map(|generation| generation.root);
        let mut tree = FiberTree::new();
        let root = tree.insert(Fiber::root(self.container, vec![element], alternate));
        self.wip = Some(Generation { tree, root });
        self.cursor = Some(root);
        log::debug!(
            target: "weft.sched",
            "armed generation {} (alternate: {})",
            self.generation + 1,
            alternate.is_some(),
        );
    }

    /// Advance the in-flight generation within one time slice.
    ///
    /// Performs at least one unit of work, then continues until the
    /// deadline's budget drops below the configured floor, so every tick
    /// makes progress. A tick that exhausts the work also runs the commit;
    /// the commit itself never yields.
    ///
    /// # Errors
    ///
    /// A host failure during the render phase discards the in-flight
    /// generation and releases its never-attached nodes. A host failure
    /// during commit abandons the generation without promoting it; the
    /// previously committed generation stays current, though host mutations
    /// already applied by the partial commit are not rolled back. Either
    /// way the engine is idle afterwards and the next `render` starts clean.
    pub fn tick(&mut self, deadline: &impl Deadline) -> HostResult<Progress> {
        if self.wip.is_none() {
            return Ok(Progress::Idle);
        }

        while self.cursor.is_some() {
            if let Err(error) = self.perform_unit() {
                self.discard_wip(true);
                return Err(error);
            }
            if self.cursor.is_some() && deadline.time_remaining() < self.config.yield_floor {
                log::trace!(target: "weft.sched", "yielding after {} units", self.units);
                return Ok(Progress::Yielded);
            }
        }

        let Some(wip) = self.wip.take() else {
            return Ok(Progress::Idle);
        };
        match self.commit(wip) {
            Ok(summary) => Ok(Progress::Committed(summary)),
            Err(error) => {
                // The partial commit may have attached nodes already, so
                // they are not releasable; drop the bookkeeping only.
                self.clear_pending();
                Err(error)
            }
        }
    }

    /// Run the in-flight generation to completion and commit it.
    ///
    /// Returns the commit summary, or `None` when nothing was in flight.
    ///
    /// # Errors
    ///
    /// Same failure handling as [`Engine::tick`].
    pub fn flush(&mut self) -> HostResult<Option<CommitSummary>> {
        loop {
            match self.tick(&Unbounded)? {
                Progress::Idle => return Ok(None),
                Progress::Yielded => {}
                Progress::Committed(summary) => return Ok(Some(summary)),
            }
        }
    }

    /// Whether units of work are still pending.
    pub const fn is_working(&self) -> bool {
        self.cursor.is_some()
    }

    /// Number of committed generations.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The container node this engine renders into.
    pub const fn container(&self) -> H::Node {
        self.container
    }

    /// Borrow the host adapter.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Borrow the host adapter mutably.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Process one fiber: materialize its host node on first visit,
    /// reconcile its children, and advance the cursor depth-first.
    fn perform_unit(&mut self) -> HostResult<()> {
        let Some(key) = self.cursor else {
            return Ok(());
        };
        let Some(wip) = self.wip.as_mut() else {
            self.cursor = None;
            return Ok(());
        };

        if wip.tree[key].node.is_none() {
            let created = match &wip.tree[key].kind {
                Some(ElementKind::Host(tag)) => Some(self.host.create_element(tag)),
                Some(ElementKind::Text) => Some(self.host.create_text()),
                Some(ElementKind::Fragment) | None => None,
            };
            if let Some(node) = created {
                // Record the node before props land, so a failed prop
                // application still leaves it releasable with its
                // generation.
                wip.tree[key].node = Some(node);
                apply_props(&mut self.host, node, &Props::new(), &wip.tree[key].props)?;
            }
        }

        let elements = std::mem::take(&mut wip.tree[key].pending_children);
        let committed = self.current.as_ref().map(|generation| &generation.tree);
        let stats = reconcile_children(&mut wip.tree, committed, key, elements, &mut self.deletions);
        self.stats.merge(&stats);
        self.units += 1;

        self.cursor = wip.tree.dfs_next(key);
        Ok(())
    }

    /// Flush effects and promote `wip` to the current generation.
    fn commit(&mut self, mut wip: Generation<H::Node>) -> HostResult<CommitSummary> {
        commit_generation(&mut self.host, &mut wip, self.current.as_ref(), &self.deletions)?;

        self.current = Some(wip);
        self.generation += 1;
        let summary = CommitSummary {
            generation: self.generation,
            placements: self.stats.placements,
            updates: self.stats.updates,
            removals: self.stats.removals,
            units: self.units,
        };
        self.clear_pending();
        log::debug!(
            target: "weft.sched",
            "committed generation {}: {} placements, {} updates, {} removals over {} units",
            summary.generation,
            summary.placements,
            summary.updates,
            summary.removals,
            summary.units,
        );
        Ok(summary)
    }

    /// Drop the in-flight generation, if any.
    ///
    /// With `release_nodes`, nodes created for never-attached placements are
    /// handed back to the host; pass `false` when a partial commit may have
    /// attached some of them already.
    fn discard_wip(&mut self, release_nodes: bool) {
        if let Some(wip) = self.wip.take() {
            if release_nodes {
                for (_, fiber) in wip.tree.iter() {
                    if fiber.effect == EffectTag::Placement {
                        if let Some(node) = fiber.node {
                            self.host.release_node(node);
                        }
                    }
                }
            }
            log::debug!(target: "weft.sched", "discarded in-flight generation");
        }
        self.clear_pending();
    }

    /// Reset all per-generation bookkeeping.
    fn clear_pending(&mut self) {
        self.cursor = None;
        self.deletions.clear();
        self.stats = ReconcileStats::default();
        self.units = 0;
    }
}
