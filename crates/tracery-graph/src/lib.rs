//! Tracery Graph Surface
//!
//! The mutable, queryable node/edge graph the playback engine styles.
//!
//! # Capability, not renderer
//!
//! Playback never draws anything. It asks a [`GraphSurface`] five things:
//! does this element exist, which edges leave this state under this symbol,
//! apply a style, remove a style, clear everything. Layout, zoom and node
//! positions belong to whatever implements the trait.
//!
//! [`GraphModel`] is the in-memory reference implementation. It supports
//! parallel edges (including edges that agree on endpoints and label) and
//! journals every styling mutation in application order, which is what the
//! engine's tests and any headless embedding assert against.

mod element;
mod model;
mod surface;

pub use element::{ElementRef, Style};
pub use model::{GraphModel, StyleEvent};
pub use surface::GraphSurface;
