//! Routes and the simulation verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An automaton state, identified by its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    /// Label naming a vertex in the automaton graph.
    pub label: String,
}

impl State {
    /// Create a state from its label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// One step of a candidate route.
///
/// The target state is not stored; it is the `from` of the next transition
/// in the same route, or the end of the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this step leaves.
    pub from: State,
    /// The symbol consumed by this step. Absent (or empty, as some
    /// collaborators encode it) for epsilon movement and terminal steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Transition {
    /// A step that consumes `symbol` while leaving `from`.
    pub fn consuming(from: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            from: State::new(from),
            symbol: Some(symbol.into()),
        }
    }

    /// An epsilon movement or terminal step at `from`.
    pub fn epsilon(from: impl Into<String>) -> Self {
        Self {
            from: State::new(from),
            symbol: None,
        }
    }

    /// The symbol this step consumes, normalizing the empty-string encoding
    /// of epsilon to `None`.
    pub fn consumes(&self) -> Option<&str> {
        match self.symbol.as_deref() {
            None | Some("") => None,
            symbol => symbol,
        }
    }
}

/// One candidate path a nondeterministic search explored.
///
/// `valid` means the path ends in an accept state with the input fully
/// consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Ordered steps of the path.
    pub transitions: Vec<Transition>,
    /// Whether this path succeeded.
    pub valid: bool,
}

impl Route {
    /// Create a route from its steps and validity flag.
    pub fn new(transitions: Vec<Transition>, valid: bool) -> Self {
        Self { transitions, valid }
    }
}

/// The full record of one simulation run: every explored route plus the
/// overall verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Whether the automaton accepted the input string.
    pub accept: bool,
    /// Candidate routes in exploration order.
    pub routes: Vec<Route>,
}

impl SimulationResult {
    /// Check the verdict against the routes.
    ///
    /// An accepting trace must contain a valid route; a rejecting trace must
    /// contain none.
    pub fn verify(&self) -> Result<()> {
        let has_valid = self.routes.iter().any(|route| route.valid);
        if self.accept && !has_valid {
            return Err(Error::Inconsistent("accepting trace has no valid route"));
        }
        if !self.accept && has_valid {
            return Err(Error::Inconsistent("rejecting trace has a valid route"));
        }
        Ok(())
    }
}
