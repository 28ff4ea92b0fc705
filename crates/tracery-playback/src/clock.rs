//! Deterministic command queue.
//!
//! A priority queue of scheduled commands drained in key order by a single
//! loop. The queue has no notion of real time; callers decide how now
//! advances. The async [`Player`](crate::Player) sleeps until
//! [`next_deadline`](CommandQueue::next_deadline), tests just advance a
//! virtual now through [`pop_due`](CommandQueue::pop_due).

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::timeline::{Scheduled, Timeline};

/// Priority queue of scheduled commands, drained in key order.
#[derive(Debug, Default)]
pub struct CommandQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
}

impl CommandQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every command of a timeline.
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let mut queue = Self::new();
        for scheduled in timeline.commands() {
            queue.push(scheduled.clone());
        }
        queue
    }

    /// Add a command.
    pub fn push(&mut self, scheduled: Scheduled) {
        self.heap.push(Reverse(scheduled));
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is drained.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Timestamp of the next command, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(scheduled)| scheduled.at())
    }

    /// Remove and return the next command in key order.
    pub fn pop_next(&mut self) -> Option<Scheduled> {
        self.heap.pop().map(|Reverse(scheduled)| scheduled)
    }

    /// Remove and return every command due at or before `now`, in key
    /// order.
    pub fn pop_due(&mut self, now: Duration) -> Vec<Scheduled> {
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.heap.peek() {
            if next.at() > now {
                break;
            }
            if let Some(Reverse(scheduled)) = self.heap.pop() {
                due.push(scheduled);
            }
        }
        due
    }
}
