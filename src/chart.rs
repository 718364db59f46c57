//! Chart-level assembly: configuration in, full radar geometry out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::geometry::{
    compute_axis_points, compute_data_points, compute_grid_rings, compute_label_anchors,
    normalize_max, Point,
};

/// Normalization ceiling: derived from the data or fixed by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum MaxValue {
    #[default]
    Auto,
    Fixed(f64),
}

impl MaxValue {
    /// The caller-supplied ceiling, if any.
    pub fn explicit(&self) -> Option<f64> {
        match self {
            MaxValue::Auto => None,
            MaxValue::Fixed(v) => Some(*v),
        }
    }
}

impl fmt::Display for MaxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxValue::Auto => write!(f, "auto"),
            MaxValue::Fixed(v) => write!(f, "{}", v),
        }
    }
}

impl FromStr for MaxValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(MaxValue::Auto),
            other => other
                .parse::<f64>()
                .map(MaxValue::Fixed)
                .map_err(|_| format!("Invalid max value '{}': expected \"auto\" or a number", s)),
        }
    }
}

impl Serialize for MaxValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            MaxValue::Auto => serializer.serialize_str("auto"),
            MaxValue::Fixed(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for MaxValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MaxValueVisitor;

        impl serde::de::Visitor<'_> for MaxValueVisitor {
            type Value = MaxValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"auto\" or a number")
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<MaxValue, E> {
                Ok(MaxValue::Fixed(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<MaxValue, E> {
                Ok(MaxValue::Fixed(v as f64))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<MaxValue, E> {
                Ok(MaxValue::Fixed(v as f64))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<MaxValue, E> {
                MaxValue::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MaxValueVisitor)
    }
}

/// Sizing and scale options for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Side length of the square canvas.
    pub canvas_size: f64,
    pub ring_count: usize,
    pub max_value: MaxValue,
    /// Share of half the canvas left empty around the outer ring.
    pub margin_fraction: f64,
    /// Extra radial distance beyond the outer ring for labels.
    pub label_offset: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas_size: 300.0,
            ring_count: 5,
            max_value: MaxValue::Auto,
            margin_fraction: 0.2,
            label_offset: 15.0,
        }
    }
}

impl ChartConfig {
    fn half_size(&self) -> f64 {
        if self.canvas_size.is_finite() && self.canvas_size > 0.0 {
            self.canvas_size / 2.0
        } else {
            0.0
        }
    }

    /// Canvas side length with non-finite or negative sizes resolved to 0.
    pub fn resolved_canvas_size(&self) -> f64 {
        self.half_size() * 2.0
    }

    pub fn center(&self) -> Point {
        let half = self.half_size();
        Point::new(half, half)
    }

    /// Radius of the outer ring after the margin is taken out.
    pub fn radius(&self) -> f64 {
        let margin = if self.margin_fraction.is_finite() {
            self.margin_fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.half_size() * (1.0 - margin)
    }

    fn label_offset(&self) -> f64 {
        if self.label_offset.is_finite() {
            self.label_offset
        } else {
            0.0
        }
    }
}

/// Geometry for one data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesGeometry {
    pub data_polygon: Vec<Point>,
    /// Same coordinates as `data_polygon`, kept apart for dot rendering.
    pub vertex_markers: Vec<Point>,
}

/// Everything a renderer needs to draw a radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryResult {
    pub center: Point,
    pub radius: f64,
    pub max_value: f64,
    pub axis_endpoints: Vec<Point>,
    /// Innermost ring first.
    pub grid_rings: Vec<Vec<Point>>,
    pub series: Vec<SeriesGeometry>,
    pub label_anchors: Vec<Point>,
}

impl GeometryResult {
    /// Number of axes actually laid out.
    pub fn axis_count(&self) -> usize {
        self.axis_endpoints.len()
    }

    /// Data polygon of the first series, or an empty slice.
    pub fn data_polygon(&self) -> &[Point] {
        self.series
            .first()
            .map(|s| s.data_polygon.as_slice())
            .unwrap_or(&[])
    }

    /// Vertex markers of the first series, or an empty slice.
    pub fn vertex_markers(&self) -> &[Point] {
        self.series
            .first()
            .map(|s| s.vertex_markers.as_slice())
            .unwrap_or(&[])
    }
}

/// A configured chart with its category labels.
#[derive(Debug, Clone)]
pub struct RadarChart {
    config: ChartConfig,
    labels: Vec<String>,
}

impl RadarChart {
    pub fn new<S: Into<String>>(config: ChartConfig, labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            config,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of axes used for the given series: the label count,
    /// truncated to the shortest series.
    pub fn axis_count<V: AsRef<[f64]>>(&self, series: &[V]) -> usize {
        series
            .iter()
            .map(|s| s.as_ref().len())
            .fold(self.labels.len(), usize::min)
    }

    /// Lay out axes, rings, labels and one polygon per series.
    ///
    /// All series share one normalization ceiling so overlaid layers are
    /// comparable.
    pub fn compute<V: AsRef<[f64]>>(&self, series: &[V]) -> GeometryResult {
        let n = self.axis_count(series);
        let labels = &self.labels[..n];
        let center = self.config.center();
        let radius = self.config.radius();

        let truncated: Vec<&[f64]> = series.iter().map(|s| &s.as_ref()[..n]).collect();
        let max_value = normalize_max(&truncated, self.config.max_value.explicit());

        let series = truncated
            .iter()
            .map(|values| {
                let data_polygon = compute_data_points(values, labels, radius, center, max_value);
                SeriesGeometry {
                    vertex_markers: data_polygon.clone(),
                    data_polygon,
                }
            })
            .collect();

        GeometryResult {
            center,
            radius,
            max_value,
            axis_endpoints: compute_axis_points(n, radius, center),
            grid_rings: compute_grid_rings(n, radius, center, self.config.ring_count),
            series,
            label_anchors: compute_label_anchors(n, radius, center, self.config.label_offset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn chart(labels: &[&str]) -> RadarChart {
        RadarChart::new(ChartConfig::default(), labels.iter().copied())
    }

    #[test]
    fn test_default_layout() {
        let config = ChartConfig::default();
        assert_eq!(config.center(), Point::new(150.0, 150.0));
        assert!((config.radius() - 120.0).abs() < EPS);
    }

    #[test]
    fn test_layout_sanitizes_bad_sizes() {
        let config = ChartConfig {
            canvas_size: f64::NAN,
            margin_fraction: 3.0,
            ..Default::default()
        };
        assert_eq!(config.center(), Point::new(0.0, 0.0));
        assert_eq!(config.radius(), 0.0);

        let config = ChartConfig {
            margin_fraction: -1.0,
            ..Default::default()
        };
        assert!((config.radius() - 150.0).abs() < EPS);
    }

    #[test]
    fn test_resolved_canvas_size() {
        assert_eq!(ChartConfig::default().resolved_canvas_size(), 300.0);
        for bad in [f64::NAN, f64::INFINITY, -40.0] {
            let config = ChartConfig {
                canvas_size: bad,
                ..Default::default()
            };
            assert_eq!(config.resolved_canvas_size(), 0.0);
        }
    }

    #[test]
    fn test_geometry_serializes_to_toml() {
        let chart = chart(&["happy", "sadness", "anger"]);
        let geometry = chart.compute(&[vec![0.8, 0.1, 0.0], vec![0.2, 0.4, 0.6]]);

        let text = toml::to_string_pretty(&geometry).unwrap();
        assert!(text.contains("max_value"));
        assert!(!text.contains("nan"));

        let parsed: GeometryResult = toml::from_str(&text).unwrap();
        assert_eq!(parsed, geometry);
    }

    #[test]
    fn test_max_value_parse() {
        assert_eq!("auto".parse::<MaxValue>(), Ok(MaxValue::Auto));
        assert_eq!(" AUTO ".parse::<MaxValue>(), Ok(MaxValue::Auto));
        assert_eq!("7.5".parse::<MaxValue>(), Ok(MaxValue::Fixed(7.5)));
        assert!("lots".parse::<MaxValue>().is_err());
        assert_eq!(MaxValue::Fixed(4.0).to_string(), "4");
    }

    #[test]
    fn test_config_from_toml() {
        let config: ChartConfig = toml::from_str("canvas_size = 400\nmax_value = 10\n").unwrap();
        assert_eq!(config.canvas_size, 400.0);
        assert_eq!(config.max_value, MaxValue::Fixed(10.0));
        assert_eq!(config.ring_count, 5);

        let config: ChartConfig = toml::from_str("max_value = \"auto\"").unwrap();
        assert_eq!(config.max_value, MaxValue::Auto);

        assert!(toml::from_str::<ChartConfig>("max_value = \"big\"").is_err());
    }

    #[test]
    fn test_compute_counts() {
        let chart = chart(&["a", "b", "c", "d", "e", "f"]);
        let geometry = chart.compute(&[vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]]);
        assert_eq!(geometry.axis_count(), 6);
        assert_eq!(geometry.grid_rings.len(), 5);
        assert_eq!(geometry.label_anchors.len(), 6);
        assert_eq!(geometry.data_polygon().len(), 6);
        assert_eq!(geometry.vertex_markers(), geometry.data_polygon());
        assert_eq!(geometry.max_value, 6.0);
    }

    #[test]
    fn test_compute_without_series() {
        let chart = chart(&["a", "b", "c"]);
        let empty: [Vec<f64>; 0] = [];
        let geometry = chart.compute(&empty);
        assert_eq!(geometry.axis_count(), 3);
        assert!(geometry.series.is_empty());
        assert!(geometry.data_polygon().is_empty());
        assert_eq!(geometry.max_value, 1.0);
    }

    #[test]
    fn test_compute_no_labels() {
        let chart = chart(&[]);
        let geometry = chart.compute(&[vec![1.0, 2.0]]);
        assert!(geometry.axis_endpoints.is_empty());
        assert!(geometry.grid_rings.is_empty());
        assert!(geometry.label_anchors.is_empty());
        assert_eq!(geometry.series.len(), 1);
        assert!(geometry.data_polygon().is_empty());
    }

    #[test]
    fn test_compute_truncates_to_shortest_series() {
        let chart = chart(&["a", "b", "c", "d"]);
        let geometry = chart.compute(&[vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 9.0, 1.0]]);
        assert_eq!(geometry.axis_count(), 3);
        assert!(geometry.series.iter().all(|s| s.data_polygon.len() == 3));
        // the dropped fourth value does not take part in scaling
        assert_eq!(geometry.max_value, 9.0);
    }

    #[test]
    fn test_label_anchor_radius() {
        let chart = chart(&["a", "b", "c"]);
        let geometry = chart.compute(&[vec![1.0, 1.0, 1.0]]);
        for anchor in &geometry.label_anchors {
            assert!((anchor.distance(geometry.center) - 135.0).abs() < EPS);
        }
    }
}
