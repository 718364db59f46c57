use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use moodweb::cli::{Args, ChartArgs, Command, DataArgs};
use moodweb::config::Config;
use moodweb::render::svg::{self, SvgOptions};
use moodweb::series::{parse_labels, parse_values};
use moodweb::{ChartInput, GeometryResult, RadarChart, Series, SEVEN_EMOTIONS, SIX_EMOTIONS};

fn main() -> Result<()> {
    // stdout carries SVG/TOML output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("moodweb=info".parse()?),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Svg { data, chart, output } => {
            let config = load_config(args.config.as_deref(), &chart)?;
            let (labels, series) = load_series(&data)?;
            let geometry = compute(&config, &labels, &series);

            let options = SvgOptions {
                canvas_size: config.chart.resolved_canvas_size(),
                color_scheme: config.style.color_scheme,
                show_markers: config.style.show_markers,
                marker_radius: config.style.marker_radius,
                font_size: config.style.font_size,
                series_names: series.iter().map(|s| s.name.clone()).collect(),
            };
            let document = svg::render(&geometry, &labels, &options);

            match output {
                Some(path) => {
                    std::fs::write(&path, document)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => std::io::stdout().write_all(document.as_bytes())?,
            }
        }
        Command::Preview { data, chart } => {
            let config = load_config(args.config.as_deref(), &chart)?;
            let (labels, series) = load_series(&data)?;
            let geometry = compute(&config, &labels, &series);
            run_preview(geometry, labels, series, &config, args.config)?;
        }
        Command::Geometry { data, chart } => {
            let config = load_config(args.config.as_deref(), &chart)?;
            let (labels, series) = load_series(&data)?;
            let geometry = compute(&config, &labels, &series);

            let report = GeometryReport {
                labels: &labels[..geometry.axis_count()],
                series_names: series.iter().map(|s| s.name.as_str()).collect(),
                geometry: &geometry,
            };
            let text = toml::to_string_pretty(&report).map_err(moodweb::Error::from)?;
            std::io::stdout().write_all(text.as_bytes())?;
        }
        Command::InitConfig => {
            let path = match args.config {
                Some(path) => {
                    Config::write_template(&path)?;
                    path
                }
                None => Config::init_default_config()?,
            };
            println!("Config written to {}", path.display());
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Args::command(), "moodweb", &mut std::io::stdout());
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct GeometryReport<'a> {
    labels: &'a [String],
    series_names: Vec<&'a str>,
    geometry: &'a GeometryResult,
}

/// An explicit config path must parse; the default path falls back to defaults.
fn load_config(path: Option<&Path>, overrides: &ChartArgs) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(overrides);
    Ok(config)
}

fn load_series(data: &DataArgs) -> Result<(Vec<String>, Vec<Series>)> {
    let default_labels = || -> Vec<String> {
        let set: &[&str] = if data.neutral { &SEVEN_EMOTIONS } else { &SIX_EMOTIONS };
        set.iter().map(|s| s.to_string()).collect()
    };

    let (file_labels, series) = match (&data.input, &data.values) {
        (Some(path), _) => {
            let input = ChartInput::load(path)?;
            info!("Loaded {} series from {}", input.series.len(), path.display());
            (input.labels.clone(), input.resolved_series(data.aggregate))
        }
        (None, Some(values)) => (None, vec![Series::new("", parse_values(values))]),
        (None, None) => bail!("No chart data: pass --input FILE or --values LIST"),
    };

    let labels = match &data.labels {
        Some(list) => parse_labels(list),
        None => file_labels.unwrap_or_else(default_labels),
    };

    for s in &series {
        if s.values.len() != labels.len() {
            warn!(
                "Series '{}' has {} values for {} labels; using the shorter length",
                s.name,
                s.values.len(),
                labels.len()
            );
        }
    }

    Ok((labels, series))
}

fn compute(config: &Config, labels: &[String], series: &[Series]) -> GeometryResult {
    let chart = RadarChart::new(config.chart.clone(), labels.iter().cloned());
    chart.compute(series)
}

#[cfg(feature = "terminal")]
fn run_preview(
    geometry: GeometryResult,
    labels: Vec<String>,
    series: Vec<Series>,
    config: &Config,
    config_path: Option<std::path::PathBuf>,
) -> Result<()> {
    use moodweb::render::terminal::{self, Preview};

    let preview = Preview::new(geometry, labels, config)
        .with_series_names(series.into_iter().map(|s| s.name).filter(|n| !n.is_empty()).collect())
        .with_config_path(config_path);
    terminal::run(preview)
}

#[cfg(not(feature = "terminal"))]
fn run_preview(
    _geometry: GeometryResult,
    _labels: Vec<String>,
    _series: Vec<Series>,
    _config: &Config,
    _config_path: Option<std::path::PathBuf>,
) -> Result<()> {
    bail!("moodweb was built without the `terminal` feature")
}
