//! Element references and highlight styles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A visual highlight applied to a graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    /// Transient pulse while the playhead passes over an element.
    Active,
    /// Permanent highlight for the terminal element of an accepting run.
    Success,
}

/// A reference to a node or edge.
///
/// References are resolved against a surface only when a styling command
/// executes, never earlier. Edges are identified by source, label and
/// target; parallel edges sharing all three are indistinguishable to a
/// reference, and styling one styles them all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElementRef {
    /// A vertex, keyed by its label.
    Node {
        /// State label.
        label: String,
    },
    /// A transition edge, keyed by endpoints and label.
    Edge {
        /// Label of the state the edge leaves.
        source: String,
        /// Symbol labelling the edge.
        symbol: String,
        /// Label of the state the edge enters.
        target: String,
    },
}

impl ElementRef {
    /// Reference the node with the given label.
    pub fn node(label: impl Into<String>) -> Self {
        Self::Node {
            label: label.into(),
        }
    }

    /// Reference the edge `source -symbol-> target`.
    pub fn edge(
        source: impl Into<String>,
        symbol: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::Edge {
            source: source.into(),
            symbol: symbol.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRef::Node { label } => f.write_str(label),
            ElementRef::Edge {
                source,
                symbol,
                target,
            } => write!(f, "{source} -{symbol}-> {target}"),
        }
    }
}
