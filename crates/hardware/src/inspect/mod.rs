//! State inspection for front-ends.
//!
//! Views of memory and registers are produced as lists of [`DiffEntry`]
//! values marked against the previous render, then formatted as HTML or
//! plain text.

/// Entry formatting.
pub mod render;

/// Previous-value storage.
mod shadow;

/// Differential snapshots of regions and register sets.
pub mod snapshot;

pub use render::{render_html, render_listing, render_plain};
pub use snapshot::{DiffEntry, StateSnapshotter};
