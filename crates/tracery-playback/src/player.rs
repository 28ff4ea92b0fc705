//! Timer-driven playback against a shared surface.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{sleep_until, Instant};

use tracery_graph::GraphSurface;
use tracery_trace::SimulationResult;

use crate::clock::CommandQueue;
use crate::sequence::{build_sequences, Sequence};
use crate::timeline::{execute, schedule, Command, PlaybackConfig, Timeline};

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The run played through its completion marker.
    Completed,
    /// A newer run started; this one stopped without touching the surface
    /// again.
    Superseded,
}

/// Drives styling commands against a shared surface on tokio timers.
///
/// Each run captures a fresh generation number and every timer callback
/// re-checks it before mutating the surface, so starting a new run while an
/// old one still has pending commands silences the old run
/// deterministically instead of letting the two race.
///
/// The future returned by [`play`](Player::play) is the completion signal:
/// it resolves exactly once, when the completion marker fires. That happens
/// after the terminal element's style has been applied, not after its
/// delayed removal; removals still pending at completion are drained by a
/// background task under the same generation check, so the final transient
/// highlight of a rejecting run still clears.
#[derive(Debug, Default)]
pub struct Player {
    config: PlaybackConfig,
    generation: Arc<AtomicU64>,
}

impl Player {
    /// Create a player with the given timing configuration.
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The timing configuration.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Build sequences for a trace and play them.
    ///
    /// The caller contract in one call: convert the routes against the
    /// current surface, then play with the trace's verdict.
    pub async fn run<S>(&self, result: &SimulationResult, surface: Arc<RwLock<S>>) -> PlayOutcome
    where
        S: GraphSurface + Send + Sync + 'static,
    {
        let sequences = {
            let guard = surface.read().await;
            build_sequences(&result.routes, &*guard)
        };
        self.play(&sequences, result.accept, surface).await
    }

    /// Schedule sequences and play them.
    pub async fn play<S>(
        &self,
        sequences: &[Sequence],
        accept: bool,
        surface: Arc<RwLock<S>>,
    ) -> PlayOutcome
    where
        S: GraphSurface + Send + Sync + 'static,
    {
        let timeline = schedule(sequences, accept, &self.config);
        self.play_timeline(timeline, surface).await
    }

    /// Play an already scheduled timeline.
    pub async fn play_timeline<S>(&self, timeline: Timeline, surface: Arc<RwLock<S>>) -> PlayOutcome
    where
        S: GraphSurface + Send + Sync + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let start = Instant::now();
        let mut queue = CommandQueue::from_timeline(&timeline);

        tracing::debug!(
            generation,
            commands = queue.len(),
            completion_at = ?timeline.completion_at(),
            "starting playback run"
        );

        while let Some(scheduled) = queue.pop_next() {
            sleep_until(start + scheduled.at()).await;

            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "superseded by a newer run, stopping");
                return PlayOutcome::Superseded;
            }

            if matches!(scheduled.command, Command::Finish) {
                // Completion fires with the terminal apply already issued.
                // Whatever is still queued is the removal tail of the run.
                self.spawn_tail(queue, generation, start, surface);
                tracing::debug!(generation, "playback run complete");
                return PlayOutcome::Completed;
            }

            let mut guard = surface.write().await;
            execute(&scheduled.command, &mut *guard);
        }

        PlayOutcome::Completed
    }

    fn spawn_tail<S>(
        &self,
        mut queue: CommandQueue,
        generation: u64,
        start: Instant,
        surface: Arc<RwLock<S>>,
    ) where
        S: GraphSurface + Send + Sync + 'static,
    {
        if queue.is_empty() {
            return;
        }

        let current = Arc::clone(&self.generation);
        tokio::spawn(async move {
            while let Some(scheduled) = queue.pop_next() {
                sleep_until(start + scheduled.at()).await;

                if current.load(Ordering::SeqCst) != generation {
                    tracing::trace!(generation, "tail superseded, dropping pending removals");
                    return;
                }

                let mut guard = surface.write().await;
                execute(&scheduled.command, &mut *guard);
            }
        });
    }
}
