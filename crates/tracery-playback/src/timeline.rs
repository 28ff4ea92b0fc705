//! Timestamped styling commands for one playback run.
//!
//! The scheduler is a pure function from sequences to a [`Timeline`]: an
//! ordered, timestamped command list. Timing logic lives entirely here,
//! fully testable without timers or rendering; executing the commands
//! against a surface is someone else's job (the async
//! [`Player`](crate::Player), or [`Timeline::apply_all`] for virtual
//! playback).

use std::cmp::Ordering;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use tracery_graph::{ElementRef, GraphSurface, Style};

use crate::sequence::Sequence;

/// Timing constants for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Time slot allotted to each element on the global timeline.
    pub quantum: Duration,
    /// Ramp used when pulsing an element into its active highlight.
    /// Shorter than the quantum.
    pub pulse: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            quantum: Duration::from_millis(500),
            pulse: Duration::from_millis(100),
        }
    }
}

/// A single styling instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Clear every style left by earlier runs. Issued once, first.
    Reset,
    /// Apply `style` to `element`, ramping in over `ramp`.
    Apply {
        /// The element to style.
        element: ElementRef,
        /// The style to apply.
        style: Style,
        /// Animation ramp for renderers that animate; zero for the
        /// permanent success application.
        ramp: Duration,
    },
    /// Remove the transient style from `element`.
    Remove {
        /// The element to unstyle.
        element: ElementRef,
    },
    /// The run's completion marker.
    Finish,
}

/// Rank among commands sharing a timestamp.
///
/// At a slot boundary the incoming element's apply fires before the
/// outgoing element's removal, and the terminal apply fires before the
/// completion marker, which still precedes removals due at that instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CommandClass {
    /// The global reset.
    Reset,
    /// Style application.
    Apply,
    /// Completion marker.
    Finish,
    /// Delayed style removal.
    Remove,
}

/// Key giving every scheduled command a unique position on the timeline.
///
/// Commands are ordered by:
/// 1. Timestamp (earlier first)
/// 2. Class (reset before apply before finish before remove)
/// 3. Emission sequence (FIFO for same time and class)
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommandKey {
    /// When the command fires, relative to the start of the run.
    pub at: Duration,
    /// Rank among commands sharing the timestamp.
    pub class: CommandClass,
    /// Emission order, for deterministic FIFO within time and class.
    pub seq: u64,
}

impl Ord for CommandKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Order by time first
        match self.at.cmp(&other.at) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Then by class (Reset < Apply < Finish < Remove)
        match self.class.cmp(&other.class) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Finally by emission sequence (FIFO)
        self.seq.cmp(&other.seq)
    }
}

impl PartialOrd for CommandKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A command with its position on the timeline.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scheduled {
    /// Position on the timeline.
    pub key: CommandKey,
    /// The instruction itself.
    pub command: Command,
}

impl Scheduled {
    fn new(at: Duration, seq: u64, command: Command) -> Self {
        let class = match &command {
            Command::Reset => CommandClass::Reset,
            Command::Apply { .. } => CommandClass::Apply,
            Command::Finish => CommandClass::Finish,
            Command::Remove { .. } => CommandClass::Remove,
        };
        Self {
            key: CommandKey { at, class, seq },
            command,
        }
    }

    /// When the command fires, relative to the start of the run.
    pub fn at(&self) -> Duration {
        self.key.at
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The fully scheduled styling program for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    commands: Vec<Scheduled>,
    completion_at: Duration,
}

impl Timeline {
    /// Scheduled commands in firing order.
    pub fn commands(&self) -> &[Scheduled] {
        &self.commands
    }

    /// When the completion marker fires.
    pub fn completion_at(&self) -> Duration {
        self.completion_at
    }

    /// Number of scheduled commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the timeline holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Apply every command in firing order, ignoring timestamps.
    ///
    /// Virtual playback for tests and headless embeddings; the real-time
    /// rendition is [`Player`](crate::Player).
    pub fn apply_all<S: GraphSurface>(&self, surface: &mut S) {
        for scheduled in &self.commands {
            execute(&scheduled.command, surface);
        }
    }
}

/// Execute one command against a surface.
///
/// An element that no longer resolves is reported and dropped; the rest of
/// the run keeps playing.
pub(crate) fn execute<S: GraphSurface>(command: &Command, surface: &mut S) {
    match command {
        Command::Reset => surface.clear_styles(),
        Command::Apply { element, style, .. } => {
            if !surface.apply_style(element, *style) {
                tracing::warn!(%element, ?style, "element not on the surface, apply dropped");
            }
        }
        Command::Remove { element } => {
            if !surface.remove_style(element) {
                tracing::warn!(%element, "element not on the surface, removal dropped");
            }
        }
        Command::Finish => {}
    }
}

/// Lay out flattened sequences on the global timeline.
///
/// All elements of sequence 0 precede all elements of sequence 1, and so
/// on; element k of the flattened list fires at `k * quantum`. Every
/// element gets a transient active pulse plus a removal one quantum later,
/// except the terminal element of an accepting run, which keeps a permanent
/// success style with no removal. The completion marker fires with the
/// terminal apply, or immediately when there is nothing to play.
pub fn schedule(sequences: &[Sequence], accept: bool, config: &PlaybackConfig) -> Timeline {
    let total: usize = sequences.iter().map(Vec::len).sum();

    let mut commands = Vec::with_capacity(total * 2 + 2);
    commands.push(Scheduled::new(Duration::ZERO, 0, Command::Reset));
    let mut seq = 1u64;

    let mut slot = 0u32;
    for sequence in sequences {
        for element in sequence {
            let at = config.quantum * slot;
            let terminal = slot as usize + 1 == total;

            if terminal && accept {
                commands.push(Scheduled::new(
                    at,
                    seq,
                    Command::Apply {
                        element: element.clone(),
                        style: Style::Success,
                        ramp: Duration::ZERO,
                    },
                ));
                seq += 1;
            } else {
                commands.push(Scheduled::new(
                    at,
                    seq,
                    Command::Apply {
                        element: element.clone(),
                        style: Style::Active,
                        ramp: config.pulse,
                    },
                ));
                seq += 1;
                commands.push(Scheduled::new(
                    at + config.quantum,
                    seq,
                    Command::Remove {
                        element: element.clone(),
                    },
                ));
                seq += 1;
            }

            slot += 1;
        }
    }

    let completion_at = match total {
        0 => Duration::ZERO,
        n => config.quantum * (n as u32 - 1),
    };
    commands.push(Scheduled::new(completion_at, seq, Command::Finish));

    commands.sort();

    Timeline {
        commands,
        completion_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracery_graph::{GraphModel, StyleEvent};

    fn elements(n: usize) -> Sequence {
        (0..n).map(|i| ElementRef::node(format!("q{i}"))).collect()
    }

    fn applies(timeline: &Timeline) -> Vec<&Scheduled> {
        timeline
            .commands()
            .iter()
            .filter(|s| matches!(s.command, Command::Apply { .. }))
            .collect()
    }

    #[test]
    fn key_orders_by_time_then_class() {
        let earlier = CommandKey {
            at: Duration::from_millis(500),
            class: CommandClass::Remove,
            seq: 9,
        };
        let later = CommandKey {
            at: Duration::from_millis(1000),
            class: CommandClass::Apply,
            seq: 1,
        };
        assert!(earlier < later);

        let apply = CommandKey {
            at: Duration::from_millis(500),
            class: CommandClass::Apply,
            seq: 9,
        };
        let remove = CommandKey {
            at: Duration::from_millis(500),
            class: CommandClass::Remove,
            seq: 1,
        };
        assert!(
            apply < remove,
            "the incoming apply fires before the outgoing removal"
        );
    }

    #[test]
    fn slots_are_strictly_increasing() {
        let timeline = schedule(
            &[elements(2), elements(3)],
            false,
            &PlaybackConfig::default(),
        );

        let apply_times: Vec<Duration> = applies(&timeline).iter().map(|s| s.at()).collect();
        let expected: Vec<Duration> = (0..5u32).map(|k| Duration::from_millis(500) * k).collect();
        assert_eq!(apply_times, expected);
    }

    #[test]
    fn accepting_terminal_keeps_success_and_no_removal() {
        let timeline = schedule(&[elements(3)], true, &PlaybackConfig::default());

        let last_apply = applies(&timeline).pop().cloned().unwrap();
        assert_eq!(
            last_apply.command,
            Command::Apply {
                element: ElementRef::node("q2"),
                style: Style::Success,
                ramp: Duration::ZERO,
            }
        );

        let terminal_removed = timeline.commands().iter().any(|s| {
            matches!(&s.command, Command::Remove { element } if *element == ElementRef::node("q2"))
        });
        assert!(!terminal_removed);
    }

    #[test]
    fn rejecting_terminal_gets_pulse_and_removal() {
        let config = PlaybackConfig::default();
        let timeline = schedule(&[elements(3)], false, &config);

        let last_apply = applies(&timeline).pop().cloned().unwrap();
        assert_eq!(
            last_apply.command,
            Command::Apply {
                element: ElementRef::node("q2"),
                style: Style::Active,
                ramp: config.pulse,
            }
        );

        let removal = timeline
            .commands()
            .iter()
            .find(|s| {
                matches!(&s.command, Command::Remove { element } if *element == ElementRef::node("q2"))
            })
            .cloned()
            .unwrap();
        assert_eq!(removal.at(), timeline.completion_at() + config.quantum);
    }

    #[test]
    fn boundary_orders_apply_before_removal() {
        let timeline = schedule(&[elements(3)], false, &PlaybackConfig::default());
        let boundary = Duration::from_millis(500);

        let at_boundary: Vec<&Scheduled> = timeline
            .commands()
            .iter()
            .filter(|s| s.at() == boundary)
            .collect();

        assert_eq!(at_boundary.len(), 2);
        assert!(matches!(
            &at_boundary[0].command,
            Command::Apply { element, .. } if *element == ElementRef::node("q1")
        ));
        assert!(matches!(
            &at_boundary[1].command,
            Command::Remove { element } if *element == ElementRef::node("q0")
        ));
    }

    #[test]
    fn completion_follows_terminal_apply() {
        let timeline = schedule(&[elements(2)], true, &PlaybackConfig::default());

        let finishes = timeline
            .commands()
            .iter()
            .filter(|s| matches!(s.command, Command::Finish))
            .count();
        assert_eq!(finishes, 1);

        let finish_index = timeline
            .commands()
            .iter()
            .position(|s| matches!(s.command, Command::Finish))
            .unwrap();
        let last_apply_index = timeline
            .commands()
            .iter()
            .rposition(|s| matches!(s.command, Command::Apply { .. }))
            .unwrap();
        assert!(finish_index > last_apply_index);
        assert_eq!(timeline.completion_at(), Duration::from_millis(500));
    }

    #[test]
    fn empty_input_completes_immediately() {
        let timeline = schedule(&[], true, &PlaybackConfig::default());

        assert_eq!(timeline.completion_at(), Duration::ZERO);
        assert_eq!(timeline.len(), 2);
        assert!(matches!(timeline.commands()[0].command, Command::Reset));
        assert!(matches!(timeline.commands()[1].command, Command::Finish));
    }

    #[test]
    fn reset_precedes_first_apply() {
        let timeline = schedule(&[elements(1)], false, &PlaybackConfig::default());

        assert!(matches!(timeline.commands()[0].command, Command::Reset));
        assert_eq!(timeline.commands()[0].at(), Duration::ZERO);
        assert!(matches!(
            timeline.commands()[1].command,
            Command::Apply { .. }
        ));
        assert_eq!(timeline.commands()[1].at(), Duration::ZERO);
    }

    #[test]
    fn revisited_elements_get_independent_events() {
        // A loop visits q0 twice; both slots schedule their own commands.
        let sequence = vec![ElementRef::node("q0"), ElementRef::node("q0")];
        let timeline = schedule(&[sequence], false, &PlaybackConfig::default());

        let q0_applies = timeline
            .commands()
            .iter()
            .filter(|s| {
                matches!(&s.command, Command::Apply { element, .. } if *element == ElementRef::node("q0"))
            })
            .count();
        let q0_removals = timeline
            .commands()
            .iter()
            .filter(|s| {
                matches!(&s.command, Command::Remove { element } if *element == ElementRef::node("q0"))
            })
            .count();

        assert_eq!(q0_applies, 2);
        assert_eq!(q0_removals, 2);
    }

    #[test]
    fn apply_all_drains_against_a_surface() {
        let mut graph = GraphModel::new();
        graph.add_node("q0");
        graph.add_node("q1");

        let sequence = vec![ElementRef::node("q0"), ElementRef::node("q1")];
        let timeline = schedule(&[sequence], true, &PlaybackConfig::default());
        timeline.apply_all(&mut graph);

        assert_eq!(
            graph.journal(),
            &[
                StyleEvent::Cleared,
                StyleEvent::Applied {
                    element: ElementRef::node("q0"),
                    style: Style::Active,
                },
                StyleEvent::Applied {
                    element: ElementRef::node("q1"),
                    style: Style::Success,
                },
                StyleEvent::Removed {
                    element: ElementRef::node("q0"),
                },
            ]
        );
        assert_eq!(
            graph.style_of(&ElementRef::node("q1")),
            Some(Style::Success)
        );
    }

    #[test]
    fn timeline_serialization() {
        let timeline = schedule(&[elements(1)], true, &PlaybackConfig::default());

        let json = serde_json::to_string(&timeline).unwrap();
        assert!(json.contains("\"type\":\"Reset\""));

        let parsed: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.commands(), timeline.commands());
    }
}
