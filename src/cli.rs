use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::chart::MaxValue;
use crate::color::ColorScheme;
use crate::series::Aggregate;

#[derive(Parser, Debug)]
#[command(name = "moodweb")]
#[command(author, version, about = "Radar charts for emotion diary entries")]
pub struct Args {
    /// Config file path (defaults to ~/.config/moodweb/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the chart as an SVG document
    Svg {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        chart: ChartArgs,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the chart in the terminal
    Preview {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Print the computed geometry as TOML
    Geometry {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Write a commented default config file
    InitConfig,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where chart data comes from.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct DataArgs {
    /// TOML file with labels and [[series]] tables
    #[arg(short, long, conflicts_with = "values")]
    pub input: Option<PathBuf>,

    /// Comma separated scores for a single series, e.g. 0.8,0.1,0,0,0,0.2
    #[arg(long, allow_hyphen_values = true)]
    pub values: Option<String>,

    /// Comma separated category labels (defaults to the six basic emotions)
    #[arg(short, long)]
    pub labels: Option<String>,

    /// Use the seven-category set including "neutral" as default labels
    #[arg(long)]
    pub neutral: bool,

    /// Collapse all series into one
    #[arg(long, value_enum)]
    pub aggregate: Option<Aggregate>,
}

/// Chart options that override the config file.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct ChartArgs {
    /// Canvas side length
    #[arg(long)]
    pub canvas_size: Option<f64>,

    /// Number of grid rings
    #[arg(long)]
    pub rings: Option<usize>,

    /// Normalization ceiling: "auto" or a number
    #[arg(long)]
    pub max_value: Option<MaxValue>,

    /// Margin as a fraction of half the canvas (0.0-1.0)
    #[arg(long)]
    pub margin: Option<f64>,

    /// Label distance beyond the outer ring
    #[arg(long)]
    pub label_offset: Option<f64>,

    /// Color scheme
    #[arg(long, value_enum)]
    pub colors: Option<ColorScheme>,

    /// Hide vertex markers
    #[arg(long)]
    pub no_markers: bool,
}
