//! Region outlines traced from circle arcs.
//!
//! Every circle is cut at the points where it crosses the other circles.
//! Each resulting arc lies on the boundary between exactly two regions; the
//! region on either side is identified by which circles contain the arc's
//! midpoint. A region is then the closed chain of its boundary arcs.

use std::f32::consts::{PI, TAU};

use log::{debug, trace};

use venndraw_core::{
    draw::{ArcSegment, RegionPath},
    geometry::{Circle, Point},
};

/// Angular step of the sampled outline.
const SAMPLE_STEP: f32 = TAU / 360.0;

/// Crossing angles closer than this are merged.
const ANGLE_EPSILON: f32 = 1e-5;

/// An arc of one circle between two crossing points, walked in the
/// direction that keeps its region on the same side.
#[derive(Debug, Clone, Copy)]
struct DirectedArc {
    circle: Circle,
    from_angle: f32,
    to_angle: f32,
    /// Walk towards increasing angles
    forward: bool,
}

impl DirectedArc {
    fn start(&self) -> Point {
        self.circle.point_at(self.from_angle)
    }

    fn end(&self) -> Point {
        self.circle.point_at(self.to_angle)
    }

    fn span(&self) -> f32 {
        (self.to_angle - self.from_angle).abs()
    }

    fn segment(&self) -> ArcSegment {
        ArcSegment::new(self.circle.radius(), self.end(), self.span() > PI, self.forward)
    }

    /// Points along the arc from its start, excluding its end.
    fn samples(&self) -> impl Iterator<Item = Point> + '_ {
        let steps = (self.span() / SAMPLE_STEP).ceil().max(2.0) as usize;
        (0..steps).map(move |step| {
            let t = step as f32 / steps as f32;
            let angle = self.from_angle + (self.to_angle - self.from_angle) * t;
            self.circle.point_at(angle)
        })
    }
}

/// Sorted angles on `circles[index]` where it crosses any other circle.
fn crossing_angles(circles: &[Circle], index: usize) -> Vec<f32> {
    let circle = circles[index];
    let mut angles: Vec<f32> = circles
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .filter_map(|(_, other)| circle.intersections(other))
        .flat_map(|(first, second)| [circle.angle_of(first), circle.angle_of(second)])
        .collect();

    angles.sort_by(f32::total_cmp);
    angles.dedup_by(|a, b| (*a - *b).abs() < ANGLE_EPSILON);
    angles
}

/// Bit mask of the circles other than `exclude` that contain `point`.
fn containing_mask(circles: &[Circle], point: Point, exclude: usize) -> u8 {
    circles
        .iter()
        .enumerate()
        .filter(|(index, circle)| *index != exclude && circle.contains(point))
        .fold(0, |mask, (index, _)| mask | (1 << index))
}

/// Bit mask of the circles that contain `point`.
pub(super) fn membership(circles: &[Circle], point: Point) -> u8 {
    containing_mask(circles, point, usize::MAX)
}

/// Arcs of every circle bounding the region with membership `mask`.
fn boundary_arcs(circles: &[Circle], mask: u8) -> Vec<DirectedArc> {
    let mut arcs = Vec::new();

    for (index, circle) in circles.iter().enumerate() {
        let bit = 1u8 << index;
        let mut angles = crossing_angles(circles, index);
        // A circle crossing nothing is split in two so every arc stays
        // shorter than a full turn.
        if angles.is_empty() {
            angles = vec![0.0, PI];
        }

        let count = angles.len();
        for k in 0..count {
            let start = angles[k];
            let end = if k + 1 < count {
                angles[k + 1]
            } else {
                angles[0] + TAU
            };

            let midpoint = circle.point_at((start + end) / 2.0);
            let inside = containing_mask(circles, midpoint, index);

            if mask & bit != 0 && inside == mask & !bit {
                arcs.push(DirectedArc {
                    circle: *circle,
                    from_angle: start,
                    to_angle: end,
                    forward: true,
                });
            } else if mask & bit == 0 && inside == mask {
                arcs.push(DirectedArc {
                    circle: *circle,
                    from_angle: end,
                    to_angle: start,
                    forward: false,
                });
            }
        }
    }

    arcs
}

/// Orders `arcs` into one closed chain, end to start.
///
/// Returns `None` when the arcs do not form exactly one loop.
fn chain(mut arcs: Vec<DirectedArc>, tolerance: f32) -> Option<Vec<DirectedArc>> {
    if arcs.is_empty() {
        return None;
    }

    let mut chained = vec![arcs.swap_remove(0)];
    let origin = chained[0].start();

    loop {
        let current = chained.last()?.end();
        if current.distance(origin) <= tolerance && arcs.is_empty() {
            return Some(chained);
        }

        let next = arcs
            .iter()
            .position(|arc| arc.start().distance(current) <= tolerance)?;
        chained.push(arcs.swap_remove(next));
    }
}

/// Traces the outline of the region whose points lie inside exactly the
/// circles in `mask` (bit `i` for `circles[i]`).
///
/// Returns `None` for an empty region or when its arcs cannot be chained
/// into a single closed outline.
pub(super) fn trace_region(circles: &[Circle], mask: u8) -> Option<RegionPath> {
    let arcs = boundary_arcs(circles, mask);
    trace!(mask, arc_count = arcs.len(); "Boundary arcs collected");

    let tolerance = circles
        .iter()
        .map(|circle| circle.radius())
        .fold(0.0f32, f32::max)
        * 1e-3;

    let Some(arcs) = chain(arcs, tolerance) else {
        debug!(mask; "Region arcs do not form a closed outline");
        return None;
    };

    let start = arcs[0].start();
    let segments = arcs.iter().map(DirectedArc::segment).collect();
    let outline = arcs.iter().flat_map(DirectedArc::samples).collect();

    Some(RegionPath::new(start, segments, outline))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn pair(distance: f32) -> Vec<Circle> {
        vec![
            Circle::new(Point::new(-distance / 2.0, 0.0), 1.0),
            Circle::new(Point::new(distance / 2.0, 0.0), 1.0),
        ]
    }

    fn triangle(distance: f32) -> Vec<Circle> {
        let height = distance * 3.0f32.sqrt() / 2.0;
        vec![
            Circle::new(Point::new(-distance / 2.0, -height / 3.0), 1.0),
            Circle::new(Point::new(distance / 2.0, -height / 3.0), 1.0),
            Circle::new(Point::new(0.0, 2.0 * height / 3.0), 1.0),
        ]
    }

    fn lens_area(distance: f32) -> f32 {
        let half = distance / 2.0;
        2.0 * half.acos() - half * (4.0 - distance * distance).sqrt()
    }

    #[test]
    fn test_two_circle_regions_have_two_arcs() {
        let circles = pair(1.0);
        for mask in 1..=3u8 {
            let path = trace_region(&circles, mask).unwrap();
            assert_eq!(path.segments().len(), 2, "mask {mask:#b}");
        }
    }

    #[test]
    fn test_two_circle_areas() {
        let distance = 1.0;
        let circles = pair(distance);
        let lens = lens_area(distance);

        let both = trace_region(&circles, 0b11).unwrap();
        assert_approx_eq!(f32, both.area().abs(), lens, epsilon = 0.01);

        let left = trace_region(&circles, 0b01).unwrap();
        assert_approx_eq!(f32, left.area().abs(), PI - lens, epsilon = 0.01);
    }

    #[test]
    fn test_two_circle_centroids() {
        let circles = pair(1.0);
        let left = trace_region(&circles, 0b01).unwrap().centroid().unwrap();
        let right = trace_region(&circles, 0b10).unwrap().centroid().unwrap();
        let both = trace_region(&circles, 0b11).unwrap().centroid().unwrap();

        assert!(left.x() < 0.0 && right.x() > 0.0);
        assert_approx_eq!(f32, left.x(), -right.x(), epsilon = 1e-3);
        assert_approx_eq!(f32, both.x(), 0.0, epsilon = 1e-3);
        assert_approx_eq!(f32, both.y(), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_three_circle_regions_all_traced() {
        let circles = triangle(0.8);
        let total: f32 = (1..=7u8)
            .map(|mask| {
                trace_region(&circles, mask)
                    .unwrap_or_else(|| panic!("region {mask:#b} missing"))
                    .area()
                    .abs()
            })
            .sum();

        // Union area lies between one disc and three discs
        assert!(total > PI && total < 3.0 * PI);
    }

    #[test]
    fn test_triple_overlap_centroid_inside_all() {
        let circles = triangle(0.8);
        let centroid = trace_region(&circles, 0b111).unwrap().centroid().unwrap();
        assert!(circles.iter().all(|circle| circle.contains(centroid)));
    }

    #[test]
    fn test_disjoint_circles_have_no_overlap() {
        let circles = pair(3.0);
        assert!(trace_region(&circles, 0b11).is_none());

        let left = trace_region(&circles, 0b01).unwrap();
        assert_approx_eq!(f32, left.area().abs(), PI, epsilon = 0.01);
    }

    #[test]
    fn test_path_data_starts_and_closes() {
        let circles = pair(1.0);
        let data = trace_region(&circles, 0b11)
            .unwrap()
            .to_path_data(Point::default());
        assert!(data.starts_with("M "));
        assert_eq!(data.matches(" A ").count(), 2);
        assert!(data.ends_with(" Z"));
    }
}
