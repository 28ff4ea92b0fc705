//! In-memory graph surface with a styling journal.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ElementRef, GraphSurface, Style};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NodeEntry {
    style: Option<Style>,
}

/// Parallel edges are distinct entries, even when they agree on endpoints
/// and label.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeEntry {
    source: String,
    symbol: String,
    target: String,
    style: Option<Style>,
}

impl EdgeEntry {
    fn matches(&self, source: &str, symbol: &str, target: &str) -> bool {
        self.source == source && self.symbol == symbol && self.target == target
    }

    fn element(&self) -> ElementRef {
        ElementRef::edge(&*self.source, &*self.symbol, &*self.target)
    }
}

/// A styling mutation applied to a [`GraphModel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StyleEvent {
    /// A style was applied to an element.
    Applied {
        /// The styled element.
        element: ElementRef,
        /// The style applied.
        style: Style,
    },
    /// The style was removed from an element.
    Removed {
        /// The unstyled element.
        element: ElementRef,
    },
    /// Every style on the surface was cleared.
    Cleared,
}

/// In-memory reference surface.
///
/// Nodes are keyed by label; edges form a list so parallel edges survive.
/// Every styling mutation is journalled in application order. The journal
/// is runtime state and is not serialized with the graph description.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GraphModel {
    nodes: HashMap<String, NodeEntry>,
    edges: Vec<EdgeEntry>,
    #[serde(skip)]
    journal: Vec<StyleEvent>,
}

impl GraphModel {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Adding an existing label is a no-op.
    pub fn add_node(&mut self, label: impl Into<String>) {
        self.nodes.entry(label.into()).or_default();
    }

    /// Add an edge `source -symbol-> target`. Repeated calls add parallel
    /// edges.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        symbol: impl Into<String>,
        target: impl Into<String>,
    ) {
        self.edges.push(EdgeEntry {
            source: source.into(),
            symbol: symbol.into(),
            target: target.into(),
            style: None,
        });
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, parallel edges counted individually.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The current style of an element, if any.
    pub fn style_of(&self, element: &ElementRef) -> Option<Style> {
        match element {
            ElementRef::Node { label } => self.nodes.get(label).and_then(|node| node.style),
            ElementRef::Edge {
                source,
                symbol,
                target,
            } => self
                .edges
                .iter()
                .find(|edge| edge.matches(source, symbol, target))
                .and_then(|edge| edge.style),
        }
    }

    /// Styling mutations in application order.
    pub fn journal(&self) -> &[StyleEvent] {
        &self.journal
    }
}

impl GraphSurface for GraphModel {
    fn contains(&self, element: &ElementRef) -> bool {
        match element {
            ElementRef::Node { label } => self.nodes.contains_key(label),
            ElementRef::Edge {
                source,
                symbol,
                target,
            } => self
                .edges
                .iter()
                .any(|edge| edge.matches(source, symbol, target)),
        }
    }

    fn outgoing(&self, source: &str, symbol: &str) -> Vec<ElementRef> {
        self.edges
            .iter()
            .filter(|edge| edge.source == source && edge.symbol == symbol)
            .map(EdgeEntry::element)
            .collect()
    }

    fn apply_style(&mut self, element: &ElementRef, style: Style) -> bool {
        let resolved = match element {
            ElementRef::Node { label } => match self.nodes.get_mut(label) {
                Some(node) => {
                    node.style = Some(style);
                    true
                }
                None => false,
            },
            ElementRef::Edge {
                source,
                symbol,
                target,
            } => {
                // Parallel twins share the reference, so style them all.
                let mut resolved = false;
                for edge in &mut self.edges {
                    if edge.matches(source, symbol, target) {
                        edge.style = Some(style);
                        resolved = true;
                    }
                }
                resolved
            }
        };

        if resolved {
            self.journal.push(StyleEvent::Applied {
                element: element.clone(),
                style,
            });
        }
        resolved
    }

    fn remove_style(&mut self, element: &ElementRef) -> bool {
        let resolved = match element {
            ElementRef::Node { label } => match self.nodes.get_mut(label) {
                Some(node) => {
                    node.style = None;
                    true
                }
                None => false,
            },
            ElementRef::Edge {
                source,
                symbol,
                target,
            } => {
                let mut resolved = false;
                for edge in &mut self.edges {
                    if edge.matches(source, symbol, target) {
                        edge.style = None;
                        resolved = true;
                    }
                }
                resolved
            }
        };

        if resolved {
            self.journal.push(StyleEvent::Removed {
                element: element.clone(),
            });
        }
        resolved
    }

    fn clear_styles(&mut self) {
        for node in self.nodes.values_mut() {
            node.style = None;
        }
        for edge in &mut self.edges {
            edge.style = None;
        }
        self.journal.push(StyleEvent::Cleared);
    }
}
