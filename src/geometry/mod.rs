//! Radar chart geometry.
//!
//! Every function here is a pure transform from numbers to canvas-space
//! points. Canvas space has its origin at the top-left with y growing
//! downward. Axis 0 points straight up from the center and the remaining
//! axes follow clockwise at even angular steps.
//!
//! Nothing in this module fails: empty input yields empty output and
//! malformed values degrade to the center point.

mod path;

pub use path::{points_to_svg_path, polygon_to_path_string};

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Angle of axis `index` out of `count`, in radians, measured clockwise from north.
#[inline]
pub fn axis_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    index as f64 * TAU / count as f64
}

/// Convert a north-based clockwise angle and radius into canvas coordinates.
#[inline]
pub fn polar_to_canvas(center: Point, angle: f64, radius: f64) -> Point {
    Point::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Coerce a raw score into something safe to scale.
///
/// NaN, infinities and negatives all become zero.
#[inline]
pub fn sanitize_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn regular_polygon(count: usize, radius: f64, center: Point) -> Vec<Point> {
    (0..count)
        .map(|i| polar_to_canvas(center, axis_angle(i, count), radius))
        .collect()
}

/// Endpoints of the `axis_count` spokes on a circle of `radius`.
pub fn compute_axis_points(axis_count: usize, radius: f64, center: Point) -> Vec<Point> {
    regular_polygon(axis_count, radius, center)
}

/// Vertices of a data polygon.
///
/// Only the first `min(values.len(), labels.len())` entries are used; the
/// angular step is based on that truncated count. Each value is scaled by
/// `radius / max_value` without clamping the ratio, so values above
/// `max_value` reach past the outer ring. A `max_value` that is not a
/// positive finite number is treated as 1.
pub fn compute_data_points<S: AsRef<str>>(
    values: &[f64],
    labels: &[S],
    radius: f64,
    center: Point,
    max_value: f64,
) -> Vec<Point> {
    let count = values.len().min(labels.len());
    let max_value = if max_value.is_finite() && max_value > 0.0 {
        max_value
    } else {
        1.0
    };

    values[..count]
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let scaled = radius * sanitize_value(v) / max_value;
            polar_to_canvas(center, axis_angle(i, count), scaled)
        })
        .collect()
}

/// Concentric grid polygons, innermost first.
///
/// Ring `j` has radius `radius * (j + 1) / ring_count`, so the last ring
/// sits on the axis endpoints. Returns an empty list when there are no axes
/// or no rings.
pub fn compute_grid_rings(
    axis_count: usize,
    radius: f64,
    center: Point,
    ring_count: usize,
) -> Vec<Vec<Point>> {
    if axis_count == 0 {
        return Vec::new();
    }

    (0..ring_count)
        .map(|j| {
            let ring_radius = radius * (j + 1) as f64 / ring_count as f64;
            regular_polygon(axis_count, ring_radius, center)
        })
        .collect()
}

/// Points where category labels are anchored, `label_offset` beyond the outer ring.
pub fn compute_label_anchors(
    axis_count: usize,
    radius: f64,
    center: Point,
    label_offset: f64,
) -> Vec<Point> {
    regular_polygon(axis_count, radius + label_offset, center)
}

/// Resolve the normalization ceiling shared by every series.
///
/// An explicit ceiling wins when it is a positive finite number. Otherwise
/// the largest finite value across all series is used, falling back to 1
/// when that maximum is not positive.
pub fn normalize_max<V: AsRef<[f64]>>(series: &[V], explicit_max: Option<f64>) -> f64 {
    if let Some(max) = explicit_max {
        if max.is_finite() && max > 0.0 {
            return max;
        }
    }

    let max = series
        .iter()
        .flat_map(|s| s.as_ref().iter().copied())
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if max > 0.0 {
        max
    } else {
        1.0
    }
}

/// Shoelace signed area. Negative means clockwise winding on a y-down canvas.
///
/// With y pointing down the usual sign flips, so the sum is negated to keep
/// "negative = clockwise as seen on screen".
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let sum: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();

    -sum / 2.0
}
