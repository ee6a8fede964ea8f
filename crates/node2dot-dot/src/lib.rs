//! Graph rendering module for producing DOT format output.
//!
//! This module transforms a parsed `NodeTree` into a DOT document in which
//! every node is a table and every nesting is an edge between table rows.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the statement builder
//! - [`palette`]: seeded edge colors
//! - [`render`]: header, labels, edges, footer

pub mod dot;
pub mod palette;
pub mod render;

pub use dot::DotBuilder;
pub use palette::{EDGE_COLORS, EdgePalette};
pub use render::{RenderConfig, Renderer, render_footer, render_header, table_label};
