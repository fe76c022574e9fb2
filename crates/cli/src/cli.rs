use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use f3pie_core::model::DEFAULT_PIE_PATH;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Profiler tree (JSON) or collapsed stacks to chart.
    pub input: PathBuf,

    /// Dotted path of the node to open the chart on.
    #[arg(short, long, default_value = DEFAULT_PIE_PATH)]
    pub path: String,

    /// Row selections to apply after opening, as typed on the number keys.
    /// `0` goes up a level.
    #[arg(short = 'n', long = "navigate", value_name = "ROW")]
    pub navigate: Vec<usize>,

    #[arg(long, default_value_t = 1920.0)]
    pub width: f64,

    #[arg(long, default_value_t = 1080.0)]
    pub height: f64,

    /// JSON file overriding chart style constants.
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Write here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Advance of one glyph, used to right-align percentages.
    #[arg(long, default_value_t = f3pie_core::FixedAdvanceMeasurer::DEFAULT_ADVANCE)]
    pub char_width: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    /// The raw draw command list.
    Json,
}
