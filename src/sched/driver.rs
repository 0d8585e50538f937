//! Render driver: a dedicated thread that owns the engine.
//!
//! The driver decouples callers from render pacing. Callers hand over
//! elements through a channel and the thread advances the engine one time
//! slice per iteration, so a large tree never blocks the sender. Commit and
//! failure notifications flow back on an event channel.

use super::deadline::TimeSlice;
use super::engine::{CommitSummary, Engine, EngineConfig, Progress};
use crate::element::Element;
use crate::host::{HostAdapter, HostError};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Configuration for the render driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Budget for one engine tick before yielding back to the loop.
    pub slice_budget: Duration,
    /// How long the loop blocks waiting for commands while idle.
    pub poll_timeout: Duration,
    /// Configuration handed to the owned engine.
    pub engine: EngineConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            slice_budget: Duration::from_millis(8),
            poll_timeout: Duration::from_millis(10),
            engine: EngineConfig::default(),
        }
    }
}

/// Command sent to the driver thread.
#[derive(Debug, Clone)]
pub enum DriverCommand {
    /// Reconcile the host tree toward this element.
    Render(Element),
    /// Stop the loop after the current iteration.
    Shutdown,
}

/// Notification sent back from the driver thread.
#[derive(Debug)]
pub enum DriverEvent {
    /// A generation committed.
    Committed(CommitSummary),
    /// A render or commit failed; the engine is idle again.
    Failed(HostError),
}

/// Driver actor that renders on a dedicated thread.
///
/// Dropping the driver signals shutdown; [`RenderDriver::join`] additionally
/// waits for the thread and hands back the engine so the final host state
/// can be inspected.
pub struct RenderDriver<H: HostAdapter> {
    /// Handle to the driver thread; returns the engine on join.
    handle: Option<JoinHandle<Engine<H>>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Sender for render commands.
    command_tx: Sender<DriverCommand>,
    /// Receiver for commit and failure events.
    event_rx: Receiver<DriverEvent>,
}

impl<H> RenderDriver<H>
where
    H: HostAdapter + Send + 'static,
    H::Node: Send,
{
    /// Spawn a driver rendering into `container` with default config.
    pub fn spawn(host: H, container: H::Node) -> Self {
        Self::spawn_with_config(host, container, DriverConfig::default())
    }

    /// Spawn a driver with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the driver thread.
    pub fn spawn_with_config(host: H, container: H::Node, config: DriverConfig) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let (command_tx, command_rx) = bounded::<DriverCommand>(16);
        // Events are advisory; when the buffer is full the new event is
        // dropped rather than blocking the render loop.
        let (event_tx, event_rx) = bounded::<DriverEvent>(16);

        let engine = Engine::with_config(host, container, config.engine.clone());
        let handle = thread::Builder::new()
            .name("weft-driver".to_string())
            .spawn(move || Self::run_loop(engine, &command_rx, &event_tx, &shutdown_clone, &config))
            .expect("Failed to spawn render driver thread");

        Self {
            handle: Some(handle),
            shutdown,
            command_tx,
            event_rx,
        }
    }

    /// Queue an element for rendering. Latest render wins.
    pub fn render(&self, element: Element) {
        let _ = self.command_tx.send(DriverCommand::Render(element));
    }

    /// Get a reference to the event receiver.
    ///
    /// Use this with `select!` or `recv_timeout` to observe commits:
    ///
    /// ```ignore
    /// driver.render(view());
    /// if let Ok(DriverEvent::Committed(summary)) = driver.events().recv_timeout(wait) {
    ///     println!("committed generation {}", summary.generation);
    /// }
    /// ```
    #[inline]
    pub const fn events(&self) -> &Receiver<DriverEvent> {
        &self.event_rx
    }

    /// Signal the driver to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let _ = self.command_tx.try_send(DriverCommand::Shutdown);
    }

    /// Wait for the driver thread to finish and reclaim the engine.
    pub fn join(mut self) -> Option<Engine<H>> {
        self.shutdown();
        self.handle
            .take()
            .and_then(|handle| handle.join().ok())
    }

    /// Main driver loop.
    fn run_loop(
        mut engine: Engine<H>,
        commands: &Receiver<DriverCommand>,
        events: &Sender<DriverEvent>,
        shutdown: &Arc<AtomicBool>,
        config: &DriverConfig,
    ) -> Engine<H> {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Block for commands only while idle, then drain everything
            // queued so a burst of renders arms only the newest before the
            // next slice.
            let timeout = if engine.is_working() {
                Duration::ZERO
            } else {
                config.poll_timeout
            };
            match commands.recv_timeout(timeout) {
                Ok(mut command) => loop {
                    match command {
                        DriverCommand::Render(element) => engine.render(element),
                        DriverCommand::Shutdown => return engine,
                    }
                    match commands.try_recv() {
                        Ok(next) => command = next,
                        Err(_) => break,
                    }
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if engine.is_working() {
                match engine.tick(&TimeSlice::new(config.slice_budget)) {
                    Ok(Progress::Committed(summary)) => {
                        let _ = events.try_send(DriverEvent::Committed(summary));
                    }
                    Ok(_) => {}
                    Err(error) => {
                        log::warn!(target: "weft.driver", "render failed: {error}");
                        let _ = events.try_send(DriverEvent::Failed(error));
                    }
                }
            }
        }

        engine
    }
}

impl<H: HostAdapter> Drop for RenderDriver<H> {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
