mod cli;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use f3pie_core::model::PiePath;
use f3pie_core::svg::render_svg;
use f3pie_core::{FixedAdvanceMeasurer, PieLayoutEngine, PieStyle};

use crate::cli::{Args, OutputFormat};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the rendered chart.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let style = match &args.style {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("reading style {}", path.display()))?;
            PieStyle::from_json(&data).with_context(|| format!("loading style {}", path.display()))?
        }
        None => PieStyle::default(),
    };

    let data = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let tree = f3pie_core::parsers::parse_auto(&data)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let mut path = PiePath::parse(&tree, &args.path);
    for &row in &args.navigate {
        if !path.navigate(&tree, row) {
            tracing::warn!(row, path = %path, "selection ignored");
        }
    }
    tracing::info!(path = %path, "charting");

    let center = style.anchor_for_screen(args.width, args.height);
    let engine = PieLayoutEngine::new(style);
    let measurer = FixedAdvanceMeasurer::new(args.char_width);
    let layout = engine.layout_path(&tree, &path.to_string(), center, &measurer);
    let commands = layout.to_commands();

    let rendered = match args.format {
        OutputFormat::Svg => render_svg(&commands, args.width, args.height),
        OutputFormat::Json => serde_json::to_string_pretty(&commands)?,
    };

    match &args.output {
        Some(out) => std::fs::write(out, rendered)
            .with_context(|| format!("writing {}", out.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
