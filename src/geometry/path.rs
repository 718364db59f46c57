//! Serialization of point sequences for vector drawing primitives.

use std::fmt::Write;

use super::Point;

/// Render points as `"x1,y1 x2,y2 ..."`, the form taken by SVG `points` attributes.
///
/// Points are written in order with no deduplication. Empty input gives an empty string.
pub fn polygon_to_path_string(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", p.x, p.y);
    }
    out
}

/// Render points as a closed SVG path: `"M x1,y1 L x2,y2 ... Z"`.
pub fn points_to_svg_path(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };

    let mut out = format!("M {},{}", first.x, first.y);
    for p in rest {
        let _ = write!(out, " L {},{}", p.x, p.y);
    }
    out.push_str(" Z");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_string_format() {
        let points = [Point::new(150.0, 30.0), Point::new(0.5, -2.25), Point::new(1.0, 1.0)];
        assert_eq!(polygon_to_path_string(&points), "150,30 0.5,-2.25 1,1");
    }

    #[test]
    fn test_polygon_string_keeps_duplicates() {
        let p = Point::new(2.0, 3.0);
        assert_eq!(polygon_to_path_string(&[p, p]), "2,3 2,3");
    }

    #[test]
    fn test_polygon_string_empty() {
        assert_eq!(polygon_to_path_string(&[]), "");
    }

    #[test]
    fn test_svg_path() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.0)];
        assert_eq!(points_to_svg_path(&points), "M 0,0 L 10,0 L 5,8 Z");
        assert_eq!(points_to_svg_path(&[]), "");
    }
}
