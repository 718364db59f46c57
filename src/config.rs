use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::chart::ChartConfig;
use crate::cli::ChartArgs;
use crate::color::ColorScheme;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

/// Presentation settings. These never affect geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub color_scheme: ColorScheme,
    pub show_markers: bool,
    pub marker_radius: f64,
    pub font_size: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Spectrum,
            show_markers: true,
            marker_radius: 3.0,
            font_size: 12.0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/moodweb/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("moodweb").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!("{}; using defaults", e);
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path().ok_or(Error::NoConfigDir)?;
        Self::write_template(&path)?;
        Ok(path)
    }

    /// Write the commented template to `path`, creating parent directories.
    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(path, Self::generate_config_template()).map_err(|e| Error::io(path, e))
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# moodweb configuration
# This file is auto-generated. Edit as needed.

[chart]
# Side length of the square canvas
canvas_size = 300
# Number of concentric grid rings
ring_count = 5
# Normalization ceiling: "auto" (largest value in the data, at least 1) or a number
max_value = "auto"
# Share of half the canvas kept empty around the outer ring (0.0-1.0)
margin_fraction = 0.2
# Distance beyond the outer ring at which labels are placed
label_offset = 15

[style]
# Color scheme: spectrum, rainbow, warm, ocean, forest, purple, monochrome
color_scheme = "spectrum"
# Draw a dot at every data vertex
show_markers = true
# Vertex dot radius
marker_radius = 3
# Label font size (SVG only)
font_size = 12
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &ChartArgs) {
        if let Some(size) = args.canvas_size {
            self.chart.canvas_size = size;
        }
        if let Some(rings) = args.rings {
            self.chart.ring_count = rings;
        }
        if let Some(max) = args.max_value {
            self.chart.max_value = max;
        }
        if let Some(margin) = args.margin {
            self.chart.margin_fraction = margin.clamp(0.0, 1.0);
        }
        if let Some(offset) = args.label_offset {
            self.chart.label_offset = offset;
        }
        if let Some(scheme) = args.colors {
            self.style.color_scheme = scheme;
        }
        if args.no_markers {
            self.style.show_markers = false;
        }
    }

    /// Persist style preferences into the config file, keeping comments and
    /// any other keys intact. Creates the file from the template if missing.
    pub fn save_preferences(path: &Path, color_scheme: ColorScheme, show_markers: bool) -> Result<()> {
        if !path.exists() {
            Self::write_template(path)?;
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut doc = content.parse::<toml_edit::DocumentMut>()?;

        if !doc.contains_table("style") {
            doc["style"] = toml_edit::table();
        }
        doc["style"]["color_scheme"] = toml_edit::value(color_scheme.name());
        doc["style"]["show_markers"] = toml_edit::value(show_markers);

        std::fs::write(path, doc.to_string()).map_err(|e| Error::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::MaxValue;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("moodweb-test-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("config.toml")
    }

    #[test]
    fn test_template_matches_defaults() {
        let config: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[chart]\nring_count = 3\n").unwrap();
        assert_eq!(config.chart.ring_count, 3);
        assert_eq!(config.chart.canvas_size, 300.0);
        assert_eq!(config.style, StyleConfig::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = scratch("bad");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[chart]\nring_count = \"many\"\n").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::ConfigParse { .. })));
        assert!(matches!(
            Config::load(&path.with_file_name("missing.toml")),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_merge_args_overrides() {
        let mut config = Config::default();
        let args = ChartArgs {
            canvas_size: Some(500.0),
            rings: Some(4),
            max_value: Some(MaxValue::Fixed(10.0)),
            margin: Some(2.0),
            colors: Some(ColorScheme::Ocean),
            no_markers: true,
            ..Default::default()
        };
        config.merge_args(&args);

        assert_eq!(config.chart.canvas_size, 500.0);
        assert_eq!(config.chart.ring_count, 4);
        assert_eq!(config.chart.max_value, MaxValue::Fixed(10.0));
        assert_eq!(config.chart.margin_fraction, 1.0);
        assert_eq!(config.chart.label_offset, 15.0);
        assert_eq!(config.style.color_scheme, ColorScheme::Ocean);
        assert!(!config.style.show_markers);
    }

    #[test]
    fn test_save_preferences_keeps_comments() {
        let path = scratch("save");
        Config::write_template(&path).unwrap();
        Config::save_preferences(&path, ColorScheme::Forest, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Number of concentric grid rings"));
        let config = Config::load(&path).unwrap();
        assert_eq!(config.style.color_scheme, ColorScheme::Forest);
        assert!(!config.style.show_markers);
        assert_eq!(config.chart, ChartConfig::default());
    }

    #[test]
    fn test_save_preferences_creates_file() {
        let path = scratch("fresh");
        Config::save_preferences(&path, ColorScheme::Purple, true).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.style.color_scheme, ColorScheme::Purple);
    }
}
