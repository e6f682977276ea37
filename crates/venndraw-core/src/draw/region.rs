//! Filled region patches bounded by circular arcs.
//!
//! A [`RegionPath`] is a closed outline made of [`ArcSegment`]s, as produced
//! by tracing the circles of a Venn diagram. Alongside the exact arcs it keeps
//! a sampled polygon of the same outline, which is what bounds and centroid
//! queries use.
//!
//! [`RegionShape`] pairs a path with a fill color and renders it as a single
//! SVG `<path>` on the [`Region`](RenderLayer::Region) layer.

use std::fmt::Write;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point},
};

/// One circular arc of a region outline, in SVG elliptical-arc terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    radius: f32,
    end: Point,
    large_arc: bool,
    sweep: bool,
}

impl ArcSegment {
    /// Creates an arc ending at `end`.
    ///
    /// `sweep` follows the SVG flag: `true` walks towards increasing angles.
    pub fn new(radius: f32, end: Point, large_arc: bool, sweep: bool) -> Self {
        Self {
            radius,
            end,
            large_arc,
            sweep,
        }
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

/// A closed outline made of circular arcs.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPath {
    start: Point,
    segments: Vec<ArcSegment>,
    outline: Vec<Point>,
}

impl RegionPath {
    /// Creates a path from its start point, its arcs and a polygon sampled
    /// along the same outline.
    pub fn new(start: Point, segments: Vec<ArcSegment>, outline: Vec<Point>) -> Self {
        Self {
            start,
            segments,
            outline,
        }
    }

    pub fn segments(&self) -> &[ArcSegment] {
        &self.segments
    }

    /// SVG path data (`M ... A ... Z`) shifted by `offset`.
    pub fn to_path_data(&self, offset: Point) -> String {
        let start = self.start.add_point(offset);
        let mut data = format!("M {} {}", start.x(), start.y());
        for segment in &self.segments {
            let end = segment.end.add_point(offset);
            // Writing into a String cannot fail
            let _ = write!(
                data,
                " A {r} {r} 0 {large} {sweep} {x} {y}",
                r = segment.radius,
                large = u8::from(segment.large_arc),
                sweep = u8::from(segment.sweep),
                x = end.x(),
                y = end.y(),
            );
        }
        data.push_str(" Z");
        data
    }

    /// Bounds of the sampled outline.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.outline.iter().copied())
    }

    /// Signed area of the sampled outline (shoelace formula).
    pub fn area(&self) -> f32 {
        self.edges()
            .map(|(a, b)| a.x() * b.y() - b.x() * a.y())
            .sum::<f32>()
            / 2.0
    }

    /// Area-weighted centroid of the sampled outline.
    ///
    /// Returns `None` for degenerate outlines with (almost) no area.
    ///
    /// ```
    /// # use venndraw_core::draw::RegionPath;
    /// # use venndraw_core::geometry::Point;
    /// let square = vec![
    ///     Point::new(0.0, 0.0),
    ///     Point::new(2.0, 0.0),
    ///     Point::new(2.0, 2.0),
    ///     Point::new(0.0, 2.0),
    /// ];
    /// let path = RegionPath::new(Point::new(0.0, 0.0), Vec::new(), square);
    /// let centroid = path.centroid().unwrap();
    /// assert!((centroid.x() - 1.0).abs() < 1e-6);
    /// assert!((centroid.y() - 1.0).abs() < 1e-6);
    /// ```
    pub fn centroid(&self) -> Option<Point> {
        let area = self.area();
        if area.abs() <= f32::EPSILON {
            return None;
        }

        let (cx, cy) = self.edges().fold((0.0f32, 0.0f32), |(cx, cy), (a, b)| {
            let cross = a.x() * b.y() - b.x() * a.y();
            (cx + (a.x() + b.x()) * cross, cy + (a.y() + b.y()) * cross)
        });

        Some(Point::new(cx / (6.0 * area), cy / (6.0 * area)))
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let count = self.outline.len();
        (0..count).map(move |i| (self.outline[i], self.outline[(i + 1) % count]))
    }
}

/// A region patch: an outline plus its fill color.
///
/// The fill alpha becomes the SVG `fill-opacity`.
#[derive(Debug, Clone)]
pub struct RegionShape {
    path: RegionPath,
    fill: Color,
}

impl RegionShape {
    pub fn new(path: RegionPath, fill: Color) -> Self {
        Self { path, fill }
    }

    pub fn path(&self) -> &RegionPath {
        &self.path
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Replaces the fill color, keeping the current transparency.
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill = color.with_alpha(self.fill.alpha());
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.fill = self.fill.with_alpha(alpha);
    }
}

impl Drawable for RegionShape {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let path = svg::node::element::Path::new()
            .set("d", self.path.to_path_data(position))
            .set("fill", &self.fill)
            .set("fill-opacity", self.fill.alpha())
            .set("stroke", "none");
        output.add_to_layer(RenderLayer::Region, Box::new(path));
        output
    }

    fn bounds_at(&self, position: Point) -> Option<Bounds> {
        self.path.bounds().map(|bounds| bounds.translate(position))
    }
}
