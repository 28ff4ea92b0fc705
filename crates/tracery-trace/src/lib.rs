//! Tracery Simulation Traces
//!
//! Data model for one automaton simulation run: the candidate routes a
//! nondeterministic search explored while testing an input string, plus the
//! overall accept/reject verdict.
//!
//! # Shape
//!
//! A [`SimulationResult`] is produced by the automaton collaborator per test
//! invocation (as JSON in the original deployment) and is immutable from
//! then on. Each [`Route`] is an ordered list of [`Transition`]s; a
//! transition names the state it leaves and, when it consumes a symbol, the
//! symbol consumed. The state it arrives at is never stored: it is implied
//! by the `from` of the next transition, or by the end of the route.
//!
//! # Verdict invariant
//!
//! When `accept` is true, the trace contains at least one route whose
//! `valid` flag is set (the path that reached an accept state with the
//! input fully consumed). When `accept` is false, no route is valid.
//! [`SimulationResult::verify`] checks this before playback trusts a trace.

mod error;
mod route;

pub use error::{Error, Result};
pub use route::{Route, SimulationResult, State, Transition};
