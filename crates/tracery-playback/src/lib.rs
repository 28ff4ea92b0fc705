//! Tracery Playback Engine
//!
//! Turns a recorded automaton simulation into a deterministic, time-ordered
//! program of highlight commands over a node/edge graph, and resolves a
//! completion signal exactly once after every command has fired.
//!
//! # Architecture
//!
//! - **Sequences**: each candidate route becomes an ordered list of graph
//!   element references, edges disambiguated by where the route goes next
//! - **Timeline**: the sequences are flattened onto a global timeline, one
//!   quantum per element, as explicit styling commands
//! - **Queue**: commands drain from a priority queue in deterministic key
//!   order, on tokio timers or a virtual clock
//! - **Player**: drives the queue against a shared surface, with a
//!   generation counter so a newer run silences an older one
//!
//! # Usage
//!
//! ```ignore
//! let player = Player::default();
//! let outcome = player.run(&trace, surface).await;
//! ```

mod clock;
mod player;
mod sequence;
mod timeline;

pub use clock::CommandQueue;
pub use player::{PlayOutcome, Player};
pub use sequence::{build_sequences, Sequence};
pub use timeline::{
    schedule, Command, CommandClass, CommandKey, PlaybackConfig, Scheduled, Timeline,
};
