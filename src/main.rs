use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use covmap::cli;
use covmap::config::{self, Colorscale, OutputFormat, PlotOptions};
use covmap::detect::Format;

/// covmap — Render a coverage report as a hierarchical treemap.
#[derive(Parser)]
#[command(name = "covmap", version, about)]
struct Cli {
    /// Path to the coverage file (Cobertura XML or LCOV).
    coverage_file: PathBuf,

    /// Output file path.
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Figure width in pixels.
    #[arg(short, long, default_value_t = config::DEFAULT_WIDTH,
          value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Figure height in pixels.
    #[arg(short = 'H', long, default_value_t = config::DEFAULT_HEIGHT,
          value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Plotly colorscale for the coverage metric.
    #[arg(long, value_enum, default_value_t = Colorscale::Spectral)]
    colorscale: Colorscale,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    output_format: OutputFormat,

    /// Override input format detection.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Figure title.
    #[arg(long, default_value = config::DEFAULT_TITLE)]
    title: String,

    /// Print the coverage tree instead of writing a figure.
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();

    let out = if args.summary {
        cli::cmd_summary(&args.coverage_file, args.format)?
    } else {
        let options = PlotOptions {
            output: args.output,
            width: args.width,
            height: args.height,
            colorscale: args.colorscale,
            format: args.output_format,
            input_format: args.format,
            title: args.title,
        };
        cli::cmd_plot(&args.coverage_file, &options)?
    };
    print!("{out}");
    Ok(())
}
