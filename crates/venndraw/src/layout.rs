//! Venn layout engine.
//!
//! A [`LayoutEngine`] turns a [`LayoutRequest`] (circle count, subset sizes,
//! set labels and figure size) into a [`Canvas`] holding the circles, one
//! patch and one text handle per region, and one text handle per set.
//!
//! Regions are enumerated in the engine's canonical order: by membership
//! mask, with bit `i` standing for the `i`-th circle. For three circles that
//! is left, middle, left+middle, right, left+right, middle+right, all three.
//!
//! [`VennLayoutEngine`] draws equal circles whose pairwise overlap follows
//! the subset sizes of the first pair, fitted into the figure's axes area.

mod regions;

use std::f32::consts::PI;

use log::{debug, info, trace};

use venndraw_core::{
    color::Color,
    draw::{RegionPath, RegionShape, TextDefinition, VerticalAlign},
    geometry::{Bounds, Circle, Insets, Point, Size},
};

use crate::{
    VennError,
    canvas::{Canvas, TextHandle},
    request::CircleCount,
};

/// Axes rectangle of a figure as fractions of its size: left, right,
/// bottom and top edges measured from the bottom-left corner.
const AXES_FRACTIONS: (f32, f32, f32, f32) = (0.125, 0.9, 0.11, 0.88);

/// Iterations of the center distance bisection.
const BISECTION_STEPS: usize = 60;

/// Grid resolution of the label anchor fallback search.
const ANCHOR_GRID: usize = 48;

/// Input of a layout engine.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    circle_count: CircleCount,
    subset_sizes: &'a [f32],
    set_labels: &'a [String],
    figure_size: Size,
}

impl<'a> LayoutRequest<'a> {
    /// Creates a layout request.
    ///
    /// # Arguments
    ///
    /// * `circle_count` - Number of circles to draw.
    /// * `subset_sizes` - One size per region, in canonical region order.
    /// * `set_labels` - One label per circle.
    /// * `figure_size` - Figure size in points.
    pub fn new(
        circle_count: CircleCount,
        subset_sizes: &'a [f32],
        set_labels: &'a [String],
        figure_size: Size,
    ) -> Self {
        Self {
            circle_count,
            subset_sizes,
            set_labels,
            figure_size,
        }
    }

    pub fn circle_count(&self) -> CircleCount {
        self.circle_count
    }

    pub fn subset_sizes(&self) -> &'a [f32] {
        self.subset_sizes
    }

    pub fn set_labels(&self) -> &'a [String] {
        self.set_labels
    }

    pub fn figure_size(&self) -> Size {
        self.figure_size
    }

    /// Number of regions of the requested topology.
    pub fn region_count(&self) -> usize {
        (1 << self.circle_count.count()) - 1
    }

    /// Checks the arity of sizes and labels against the circle count.
    ///
    /// # Errors
    ///
    /// Returns [`VennError::Layout`] on any mismatch.
    pub fn validate(&self) -> Result<(), VennError> {
        if self.subset_sizes.len() != self.region_count() {
            return Err(VennError::Layout(format!(
                "{}-circle layout needs {} subset sizes, got {}",
                self.circle_count,
                self.region_count(),
                self.subset_sizes.len()
            )));
        }
        if self.set_labels.len() != self.circle_count.count() {
            return Err(VennError::Layout(format!(
                "{}-circle layout needs {} set labels, got {}",
                self.circle_count,
                self.circle_count.count(),
                self.set_labels.len()
            )));
        }
        if let Some(size) = self
            .subset_sizes
            .iter()
            .find(|size| !size.is_finite() || **size < 0.0)
        {
            return Err(VennError::Layout(format!(
                "subset sizes must be finite and non-negative, got {size}"
            )));
        }
        Ok(())
    }

    /// Fraction of the first circle covered by its overlap with the second.
    fn first_pair_overlap(&self) -> Result<f32, VennError> {
        let (total, shared) = self
            .subset_sizes
            .iter()
            .enumerate()
            .map(|(ordinal, size)| (ordinal + 1, *size))
            .filter(|(mask, _)| mask & 0b01 != 0)
            .fold((0.0f32, 0.0f32), |(total, shared), (mask, size)| {
                let shared_size = if mask & 0b10 != 0 { size } else { 0.0 };
                (total + size, shared + shared_size)
            });

        if total <= 0.0 {
            return Err(VennError::Layout(
                "first set has no members, cannot size the overlap".to_string(),
            ));
        }

        let overlap = shared / total;
        if overlap <= 0.0 || overlap >= 1.0 {
            return Err(VennError::Layout(format!(
                "overlap ratio {overlap} of the first two sets must lie strictly between 0 and 1"
            )));
        }
        Ok(overlap)
    }
}

/// Trait for engines that lay out a Venn diagram.
pub trait LayoutEngine {
    /// Lays out the diagram described by `request`.
    ///
    /// The canvas holds one patch slot and one region label slot per region
    /// in canonical order, and one set label slot per circle.
    fn layout(&self, request: &LayoutRequest<'_>) -> Result<Canvas, VennError>;
}

/// Equal-radius circle layout with arc-traced regions.
#[derive(Debug, Clone)]
pub struct VennLayoutEngine {
    default_fill: Color,
    margin: f32,
    region_font_size: u16,
    set_font_size: u16,
}

impl VennLayoutEngine {
    /// Creates an engine with grey region fills, a 5% margin around the
    /// circles and 10pt region / 12pt set labels.
    pub fn new() -> Self {
        Self {
            default_fill: Color::new("#808080")
                .map(|color| color.with_alpha(0.4))
                .unwrap_or_default(),
            margin: 0.05,
            region_font_size: 10,
            set_font_size: 12,
        }
    }

    /// Set the margin around the circles, as a fraction of their extent
    pub fn set_margin(&mut self, margin: f32) -> &mut Self {
        self.margin = margin;
        self
    }

    /// Set the fill given to every region patch
    pub fn set_default_fill(&mut self, fill: Color) -> &mut Self {
        self.default_fill = fill;
        self
    }

    /// Unit-radius circles for the requested topology.
    fn unit_circles(&self, circle_count: CircleCount, distance: f32) -> Vec<Circle> {
        let half = distance / 2.0;
        let centers = match circle_count {
            CircleCount::Two => vec![Point::new(-half, 0.0), Point::new(half, 0.0)],
            CircleCount::Three => {
                let height = distance * 3.0f32.sqrt() / 2.0;
                vec![
                    Point::new(-half, -height / 3.0),
                    Point::new(half, -height / 3.0),
                    Point::new(0.0, 2.0 * height / 3.0),
                ]
            }
        };
        centers
            .into_iter()
            .map(|center| Circle::new(center, 1.0))
            .collect()
    }

    /// Scales and moves `circles` so their padded extent fills `axes` with
    /// equal aspect, centered.
    fn fit_to_axes(&self, circles: &[Circle], axes: Bounds) -> Vec<Circle> {
        let Some(extent) = circles
            .iter()
            .map(|circle| circle.bounds())
            .reduce(|acc, bounds| acc.merge(&bounds))
        else {
            return Vec::new();
        };

        let padded = extent.add_padding(Insets::new(
            extent.height() * self.margin,
            extent.width() * self.margin,
            extent.height() * self.margin,
            extent.width() * self.margin,
        ));
        let scale = (axes.width() / padded.width()).min(axes.height() / padded.height());
        let offset = axes.center().sub_point(padded.center().scale(scale));
        debug!(scale, offset_x = offset.x(), offset_y = offset.y(); "Fitted circles to axes");

        circles
            .iter()
            .map(|circle| circle.transformed(scale, offset))
            .collect()
    }

    fn region_label(&self, circles: &[Circle], mask: u8, path: &RegionPath, size: f32) -> Option<TextHandle> {
        let anchor = label_anchor(circles, mask, path)?;
        let mut definition = TextDefinition::new();
        definition.set_font_size(self.region_font_size);
        Some(TextHandle::new(format!("{size}"), anchor, definition))
    }

    fn set_label_handles(&self, circles: &[Circle], labels: &[String]) -> Vec<TextHandle> {
        let placements: Vec<(Point, VerticalAlign)> = match circles {
            [left, middle, right] => {
                let radius = left.radius();
                vec![
                    (
                        left.center().add_point(Point::new(-radius / 2.0, -radius)),
                        VerticalAlign::Bottom,
                    ),
                    (
                        middle.center().add_point(Point::new(radius / 2.0, -radius)),
                        VerticalAlign::Bottom,
                    ),
                    (
                        right.center().add_point(Point::new(0.0, radius * 1.1)),
                        VerticalAlign::Top,
                    ),
                ]
            }
            _ => circles
                .iter()
                .map(|circle| {
                    (
                        circle.center().add_point(Point::new(0.0, circle.radius() * 1.1)),
                        VerticalAlign::Top,
                    )
                })
                .collect(),
        };

        placements
            .into_iter()
            .zip(labels)
            .map(|((anchor, align), label)| {
                let mut definition = TextDefinition::new();
                definition.set_font_size(self.set_font_size);
                definition.set_vertical_align(align);
                TextHandle::new(label.as_str(), anchor, definition)
            })
            .collect()
    }
}

impl Default for VennLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine for VennLayoutEngine {
    fn layout(&self, request: &LayoutRequest<'_>) -> Result<Canvas, VennError> {
        request.validate()?;
        let overlap = request.first_pair_overlap()?;

        let distance = center_distance(overlap);
        info!(circles = request.circle_count().count(), distance; "Laying out Venn diagram");

        let figure = request.figure_size();
        let axes = axes_rect(figure);
        let unit = self.unit_circles(request.circle_count(), distance);
        let circles = self.fit_to_axes(&unit, axes);

        let mut canvas = Canvas::new(figure, axes);
        for circle in &circles {
            canvas.add_circle(*circle);
        }

        for (ordinal, size) in request.subset_sizes().iter().enumerate() {
            // Masks start at 1; region ordinals at 0
            let mask = (ordinal + 1) as u8;
            match regions::trace_region(&circles, mask) {
                Some(path) => {
                    let label = self.region_label(&circles, mask, &path, *size);
                    trace!(mask, has_label = label.is_some(); "Region traced");
                    canvas.push_region(Some(RegionShape::new(path, self.default_fill)), label);
                }
                None => {
                    debug!(mask; "Region has no outline");
                    canvas.push_region(None, None);
                }
            }
        }

        for handle in self.set_label_handles(&circles, request.set_labels()) {
            canvas.push_set_label(Some(handle));
        }

        Ok(canvas)
    }
}

/// Area of the lens shared by two unit circles `distance` apart.
fn lens_area(distance: f32) -> f32 {
    let half = distance / 2.0;
    2.0 * half.acos() - half * (4.0 - distance * distance).max(0.0).sqrt()
}

/// Center distance of two unit circles whose lens covers `overlap` of each.
fn center_distance(overlap: f32) -> f32 {
    let target = overlap * PI;
    let (mut low, mut high) = (0.0f32, 2.0f32);
    for _ in 0..BISECTION_STEPS {
        let mid = (low + high) / 2.0;
        // Lens area shrinks as the circles move apart
        if lens_area(mid) > target {
            low = mid;
        } else {
            high = mid;
        }
    }
    (low + high) / 2.0
}

/// The axes area of a figure in y-down figure coordinates.
fn axes_rect(figure: Size) -> Bounds {
    let (left, right, bottom, top) = AXES_FRACTIONS;
    let top_left = Point::new(figure.width() * left, figure.height() * (1.0 - top));
    let size = Size::new(
        figure.width() * (right - left),
        figure.height() * (top - bottom),
    );
    Bounds::new_from_top_left(top_left, size)
}

/// Label position of a region: its centroid, or the sampled interior point
/// farthest from every circle outline when the centroid falls outside it.
fn label_anchor(circles: &[Circle], mask: u8, path: &RegionPath) -> Option<Point> {
    path.centroid()
        .filter(|centroid| regions::membership(circles, *centroid) == mask)
        .or_else(|| most_interior_point(circles, mask, path.bounds()?))
}

fn most_interior_point(circles: &[Circle], mask: u8, bounds: Bounds) -> Option<Point> {
    let clearance = |point: Point| {
        circles
            .iter()
            .map(|circle| (circle.center().distance(point) - circle.radius()).abs())
            .fold(f32::INFINITY, f32::min)
    };

    (0..ANCHOR_GRID)
        .flat_map(|i| (0..ANCHOR_GRID).map(move |j| (i, j)))
        .map(|(i, j)| {
            let fx = (i as f32 + 0.5) / ANCHOR_GRID as f32;
            let fy = (j as f32 + 0.5) / ANCHOR_GRID as f32;
            Point::new(
                bounds.min_x() + bounds.width() * fx,
                bounds.min_y() + bounds.height() * fy,
            )
        })
        .filter(|point| regions::membership(circles, *point) == mask)
        .max_by(|a, b| clearance(*a).total_cmp(&clearance(*b)))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn layout(circles: CircleCount, sizes: &[f32], names: &[&str]) -> Result<Canvas, VennError> {
        let labels = labels(names);
        let request = LayoutRequest::new(circles, sizes, &labels, Size::new(864.0, 720.0));
        VennLayoutEngine::new().layout(&request)
    }

    #[test]
    fn test_center_distance_for_half_overlap() {
        let distance = center_distance(0.5);
        assert_approx_eq!(f32, lens_area(distance), PI / 2.0, epsilon = 1e-4);
        assert!(distance > 0.8 && distance < 0.82);
    }

    #[test]
    fn test_lens_area_limits() {
        assert_approx_eq!(f32, lens_area(0.0), PI, epsilon = 1e-5);
        assert_approx_eq!(f32, lens_area(2.0), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_axes_rect() {
        let axes = axes_rect(Size::new(720.0, 576.0));
        assert_approx_eq!(f32, axes.min_x(), 90.0, epsilon = 1e-3);
        assert_approx_eq!(f32, axes.max_x(), 648.0, epsilon = 1e-3);
        assert_approx_eq!(f32, axes.min_y(), 69.12, epsilon = 1e-3);
        assert_approx_eq!(f32, axes.max_y(), 512.64, epsilon = 1e-3);
    }

    #[test]
    fn test_three_circle_canvas_shape() {
        let canvas = layout(CircleCount::Three, &[1.0; 7], &["A", "B", "C"]).unwrap();

        assert_eq!(canvas.circles().len(), 3);
        assert_eq!(canvas.region_count(), 7);
        assert_eq!(canvas.region_labels().len(), 7);
        assert_eq!(canvas.set_labels().len(), 3);
        assert!(canvas.patches().iter().all(Option::is_some));

        for handle in canvas.region_labels() {
            assert_eq!(handle.as_ref().unwrap().text(), "1");
        }
        let set_texts: Vec<&str> = canvas
            .set_labels()
            .iter()
            .map(|handle| handle.as_ref().unwrap().text())
            .collect();
        assert_eq!(set_texts, ["A", "B", "C"]);
    }

    #[test]
    fn test_region_anchors_lie_in_their_regions() {
        let canvas = layout(CircleCount::Three, &[1.0; 7], &["A", "B", "C"]).unwrap();
        for (ordinal, handle) in canvas.region_labels().iter().enumerate() {
            let anchor = handle.as_ref().unwrap().anchor();
            let mask = (ordinal + 1) as u8;
            assert_eq!(
                regions::membership(canvas.circles(), anchor),
                mask,
                "label of region {mask:#b} placed outside it"
            );
        }
    }

    #[test]
    fn test_circles_fit_inside_axes() {
        for (circles, sizes) in [
            (CircleCount::Two, vec![1.0; 3]),
            (CircleCount::Three, vec![1.0; 7]),
        ] {
            let names = ["A", "B", "C"];
            let canvas = layout(circles, &sizes, &names[..circles.count()]).unwrap();
            let axes = canvas.axes();
            for circle in canvas.circles() {
                let bounds = circle.bounds();
                assert!(bounds.min_x() >= axes.min_x() - 1e-3);
                assert!(bounds.max_x() <= axes.max_x() + 1e-3);
                assert!(bounds.min_y() >= axes.min_y() - 1e-3);
                assert!(bounds.max_y() <= axes.max_y() + 1e-3);
            }
        }
    }

    #[test]
    fn test_two_circle_labels_below_circles() {
        let canvas = layout(CircleCount::Two, &[1.0; 3], &["A", "B"]).unwrap();
        for (circle, handle) in canvas.circles().iter().zip(canvas.set_labels()) {
            let handle = handle.as_ref().unwrap();
            assert!(handle.anchor().y() > circle.center().y() + circle.radius());
            assert_eq!(handle.definition().vertical_align(), VerticalAlign::Top);
        }
    }

    #[test]
    fn test_three_circle_set_label_sides() {
        let canvas = layout(CircleCount::Three, &[1.0; 7], &["A", "B", "C"]).unwrap();
        let circles = canvas.circles();
        let anchors: Vec<Point> = canvas
            .set_labels()
            .iter()
            .map(|handle| handle.as_ref().unwrap().anchor())
            .collect();

        assert!(anchors[0].y() < circles[0].center().y());
        assert!(anchors[0].x() < circles[0].center().x());
        assert!(anchors[1].x() > circles[1].center().x());
        assert!(anchors[2].y() > circles[2].center().y() + circles[2].radius());
    }

    #[test]
    fn test_region_order_follows_membership() {
        let canvas = layout(CircleCount::Two, &[1.0; 3], &["A", "B"]).unwrap();
        let left = canvas.region_labels()[0].as_ref().unwrap().anchor();
        let right = canvas.region_labels()[1].as_ref().unwrap().anchor();
        let both = canvas.region_labels()[2].as_ref().unwrap().anchor();
        assert!(left.x() < both.x() && both.x() < right.x());
    }

    #[test]
    fn test_arity_mismatch_is_layout_error() {
        let result = layout(CircleCount::Three, &[1.0; 3], &["A", "B", "C"]);
        assert!(matches!(result, Err(VennError::Layout(_))));

        let result = layout(CircleCount::Two, &[1.0; 3], &["A", "B", "C"]);
        assert!(matches!(result, Err(VennError::Layout(_))));
    }

    #[test]
    fn test_degenerate_overlap_is_layout_error() {
        let result = layout(CircleCount::Two, &[1.0, 1.0, 0.0], &["A", "B"]);
        assert!(matches!(result, Err(VennError::Layout(_))));

        let result = layout(CircleCount::Two, &[0.0, 1.0, 0.0], &["A", "B"]);
        assert!(matches!(result, Err(VennError::Layout(_))));

        let result = layout(CircleCount::Two, &[1.0, f32::NAN, 1.0], &["A", "B"]);
        assert!(matches!(result, Err(VennError::Layout(_))));
    }
}
