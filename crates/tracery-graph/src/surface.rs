//! The surface capability consumed by playback.

use crate::{ElementRef, Style};

/// A mutable, queryable graph that can carry highlight styles.
///
/// Anything that can answer these five questions can play a timeline: the
/// in-memory [`GraphModel`](crate::GraphModel), a bridge to a browser
/// renderer, or a test double.
pub trait GraphSurface {
    /// Whether the referenced element exists on this surface.
    fn contains(&self, element: &ElementRef) -> bool;

    /// Every edge leaving `source` whose label equals `symbol`.
    ///
    /// Parallel edges are all returned, duplicates preserved, so callers
    /// can disambiguate by target and keep every match when targets tie.
    fn outgoing(&self, source: &str, symbol: &str) -> Vec<ElementRef>;

    /// Apply a style to an element.
    ///
    /// Returns false when the element cannot be resolved; the caller
    /// reports and moves on.
    fn apply_style(&mut self, element: &ElementRef, style: Style) -> bool;

    /// Remove any style from an element. Removing from an unstyled element
    /// is a no-op that still counts as resolved.
    fn remove_style(&mut self, element: &ElementRef) -> bool;

    /// Clear every style on the surface. Issued once at the start of each
    /// playback run so a fresh run never inherits leftover highlights.
    fn clear_styles(&mut self);
}
