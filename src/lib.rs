//! Radar ("spider") chart geometry for emotion diary entries.
//!
//! The [`geometry`] and [`chart`] modules turn per-category scores into
//! canvas coordinates and never fail. Everything else is the surrounding
//! tooling: input files, configuration, styling and renderers.

pub mod chart;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod series;

pub use chart::{ChartConfig, GeometryResult, MaxValue, RadarChart, SeriesGeometry};
pub use error::{Error, Result};
pub use geometry::{
    compute_axis_points, compute_data_points, compute_grid_rings, compute_label_anchors,
    normalize_max, points_to_svg_path, polygon_to_path_string, Point,
};
pub use series::{Aggregate, ChartInput, EmotionVector, Series, SEVEN_EMOTIONS, SIX_EMOTIONS};
