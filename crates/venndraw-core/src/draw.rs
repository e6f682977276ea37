//! Drawable Components for Diagram Rendering
//!
//! This module provides drawable abstractions for the elements of a Venn
//! diagram. All drawable components implement the [`Drawable`] trait, which
//! provides a consistent interface for rendering to layered SVG output and
//! calculating bounds.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically
//! ordered during final SVG generation: region fills first, text on top.
mod layer;
mod region;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use region::{ArcSegment, RegionPath, RegionShape};
pub use text::{FontStyle, FontWeight, Text, TextDefinition, VerticalAlign};

use crate::geometry::{Bounds, Point};

/// Trait for drawable diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// # Arguments
    ///
    /// * `position` - The anchor position where this drawable should be rendered
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the area covered by this drawable when rendered at `position`.
    ///
    /// `None` means the drawable renders nothing.
    fn bounds_at(&self, position: Point) -> Option<Bounds>;
}
