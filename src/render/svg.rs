//! Standalone SVG output for a computed radar chart.

use std::fmt::Write;

use crate::chart::GeometryResult;
use crate::color::{to_hex, ColorScheme, GRID_COLOR, LABEL_COLOR};
use crate::geometry::{polygon_to_path_string, Point};

/// Presentation options for [`render`].
#[derive(Debug, Clone)]
pub struct SvgOptions {
    pub canvas_size: f64,
    pub color_scheme: ColorScheme,
    pub show_markers: bool,
    pub marker_radius: f64,
    pub font_size: f64,
    /// Emitted as `<title>` on each series polygon, matched by index.
    pub series_names: Vec<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            canvas_size: 300.0,
            color_scheme: ColorScheme::default(),
            show_markers: true,
            marker_radius: 3.0,
            font_size: 12.0,
            series_names: Vec::new(),
        }
    }
}

/// Horizontal text anchor for a label, depending on which side of center it sits.
pub fn text_anchor(anchor: Point, center: Point) -> &'static str {
    let dx = anchor.x - center.x;
    if dx.abs() < 1e-6 {
        "middle"
    } else if dx > 0.0 {
        "start"
    } else {
        "end"
    }
}

/// Vertical baseline so labels above center sit on top of their anchor.
fn baseline(anchor: Point, center: Point) -> &'static str {
    let dy = anchor.y - center.y;
    if dy.abs() < 1e-6 {
        "middle"
    } else if dy < 0.0 {
        "auto"
    } else {
        "hanging"
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Render geometry and labels to an SVG document.
///
/// Draw order is rings, spokes, series (in order), markers, then labels.
pub fn render<S: AsRef<str>>(geometry: &GeometryResult, labels: &[S], options: &SvgOptions) -> String {
    let size = if options.canvas_size.is_finite() && options.canvas_size > 0.0 {
        options.canvas_size
    } else {
        0.0
    };
    let grid = to_hex(GRID_COLOR);
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );

    svg.push_str("  <g class=\"grid\">\n");
    for ring in &geometry.grid_rings {
        let _ = writeln!(
            svg,
            r#"    <polygon points="{}" fill="none" stroke="{grid}" stroke-width="1"/>"#,
            polygon_to_path_string(ring)
        );
    }
    for end in &geometry.axis_endpoints {
        let _ = writeln!(
            svg,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{grid}" stroke-width="1"/>"#,
            geometry.center.x, geometry.center.y, end.x, end.y
        );
    }
    svg.push_str("  </g>\n");

    let count = geometry.series.len();
    for (i, series) in geometry.series.iter().enumerate() {
        let style = options.color_scheme.series_style(i, count);
        let _ = writeln!(svg, r#"  <g class="series" data-index="{i}">"#);
        let _ = write!(
            svg,
            r#"    <polygon points="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="2""#,
            polygon_to_path_string(&series.data_polygon),
            style.fill_hex(),
            style.fill_opacity,
            style.stroke_hex()
        );
        match options.series_names.get(i).filter(|n| !n.is_empty()) {
            Some(name) => {
                let _ = writeln!(svg, "><title>{}</title></polygon>", escape(name));
            }
            None => svg.push_str("/>\n"),
        }

        if options.show_markers {
            for p in &series.vertex_markers {
                let _ = writeln!(
                    svg,
                    r#"    <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    p.x,
                    p.y,
                    options.marker_radius,
                    style.stroke_hex()
                );
            }
        }
        svg.push_str("  </g>\n");
    }

    let label_color = to_hex(LABEL_COLOR);
    svg.push_str("  <g class=\"labels\">\n");
    for (anchor, label) in geometry.label_anchors.iter().zip(labels) {
        let _ = writeln!(
            svg,
            r#"    <text x="{}" y="{}" text-anchor="{}" dominant-baseline="{}" font-size="{}" fill="{label_color}">{}</text>"#,
            anchor.x,
            anchor.y,
            text_anchor(*anchor, geometry.center),
            baseline(*anchor, geometry.center),
            options.font_size,
            escape(label.as_ref())
        );
    }
    svg.push_str("  </g>\n");

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartConfig, RadarChart};

    fn sample() -> (GeometryResult, Vec<&'static str>) {
        let labels = vec!["happy", "sad", "a<b"];
        let chart = RadarChart::new(ChartConfig::default(), labels.clone());
        (chart.compute(&[vec![1.0, 0.5, 0.0], vec![0.0, 1.0, 1.0]]), labels)
    }

    #[test]
    fn test_svg_structure() {
        let (geometry, labels) = sample();
        let svg = render(&geometry, &labels, &SvgOptions::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        // 5 rings + 2 series polygons
        assert_eq!(svg.matches("<polygon").count(), 7);
        assert_eq!(svg.matches("<line").count(), 3);
        assert_eq!(svg.matches("<circle").count(), 6);
        assert_eq!(svg.matches("<text").count(), 3);
        assert!(svg.contains("a&lt;b"));
        assert!(svg.contains(r#"points="150,30 "#));
    }

    #[test]
    fn test_svg_without_markers_and_with_names() {
        let (geometry, labels) = sample();
        let options = SvgOptions {
            show_markers: false,
            series_names: vec!["May & June".to_string()],
            ..Default::default()
        };
        let svg = render(&geometry, &labels, &options);
        assert_eq!(svg.matches("<circle").count(), 0);
        assert!(svg.contains("<title>May &amp; June</title>"));
        assert_eq!(svg.matches("<title>").count(), 1);
    }

    #[test]
    fn test_bad_canvas_size_renders_without_nan() {
        for bad in [f64::NAN, -120.0] {
            let config = ChartConfig {
                canvas_size: bad,
                ..Default::default()
            };
            let chart = RadarChart::new(config.clone(), ["happy", "sadness", "fear"]);
            let geometry = chart.compute(&[vec![0.5, 1.0, 0.0]]);

            for size in [bad, config.resolved_canvas_size()] {
                let options = SvgOptions {
                    canvas_size: size,
                    ..Default::default()
                };
                let svg = render(&geometry, chart.labels(), &options);
                assert!(!svg.contains("NaN"), "{}", svg);
                assert!(svg.contains(r#"viewBox="0 0 0 0""#));
            }
        }
    }

    #[test]
    fn test_text_anchor_sides() {
        let c = Point::new(0.0, 0.0);
        assert_eq!(text_anchor(Point::new(0.0, -5.0), c), "middle");
        assert_eq!(text_anchor(Point::new(3.0, 1.0), c), "start");
        assert_eq!(text_anchor(Point::new(-3.0, 1.0), c), "end");
    }

    #[test]
    fn test_empty_chart_renders() {
        let chart = RadarChart::new(ChartConfig::default(), Vec::<String>::new());
        let empty: [Vec<f64>; 0] = [];
        let svg = render(&chart.compute(&empty), &[] as &[&str], &SvgOptions::default());
        assert!(!svg.contains("<polygon"));
        assert!(!svg.contains("NaN"));
    }
}
