//! Command handler functions for the covmap CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::PlotOptions;
use crate::detect::Format;
use crate::render::Figure;
use crate::tree::{HierarchicalReport, NodeId};
use crate::{builder, ingest, treemap};

/// Load a coverage file and write its treemap to `options.output`.
pub fn cmd_plot(file: &Path, options: &PlotOptions) -> Result<String> {
    options.validate()?;

    let (data, format) = ingest::load(file, options.input_format)
        .with_context(|| format!("Failed to load coverage from {}", file.display()))?;
    let report = builder::build(&data.files);
    let figure = Figure::new(treemap::flatten(&report), options);
    figure
        .write(&options.output, options.format)
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    Ok(format!(
        "Generating coverage visualization from {} ({})...\nCoverage visualization saved to {}\n",
        file.display(),
        format,
        options.output.display(),
    ))
}

/// Print the coverage tree as an indented table instead of rendering it.
pub fn cmd_summary(file: &Path, input_format: Option<Format>) -> Result<String> {
    let (data, _) = ingest::load(file, input_format)
        .with_context(|| format!("Failed to load coverage from {}", file.display()))?;
    if data.files.is_empty() {
        return Ok(format!("No coverage data in {}\n", file.display()));
    }
    Ok(format_tree(&builder::build(&data.files)))
}

pub fn format_tree(report: &HierarchicalReport) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:<60} {:>8} {:>8} {:>8}",
        "PATH", "LINES", "COVERED", "RATE"
    )
    .unwrap();
    writeln!(out, "{}", "-".repeat(87)).unwrap();
    write_node(report, report.tree().root_id(), 0, &mut out);
    out
}

fn write_node(report: &HierarchicalReport, id: NodeId, depth: usize, out: &mut String) {
    let node = report.tree().node(id);
    let suffix = if node.is_file() { "" } else { "/" };
    let label = format!("{}{}{}", "  ".repeat(depth), node.name(), suffix);
    writeln!(
        out,
        "{:<60} {:>8} {:>8} {:>7.1}%",
        label,
        node.total_lines(),
        node.covered_lines(),
        node.coverage_rate() * 100.0
    )
    .unwrap();
    for &child in node.children() {
        write_node(report, child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    const LCOV: &str = "SF:src/main.rs\nDA:1,5\nDA:2,0\nend_of_record\n\
                        SF:src/util/fmt.rs\nDA:1,1\nDA:2,1\nend_of_record\n";

    #[test]
    fn test_cmd_plot_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("coverage.info");
        std::fs::write(&input, LCOV).unwrap();

        let options = PlotOptions {
            output: dir.path().join("map.html"),
            ..Default::default()
        };
        let out = cmd_plot(&input, &options).unwrap();

        assert!(out.contains("(lcov)"));
        assert!(out.contains("Coverage visualization saved to"));
        let html = std::fs::read_to_string(&options.output).unwrap();
        assert!(html.contains("src/util/fmt.rs"));
    }

    #[test]
    fn test_cmd_plot_rejects_invalid_options() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("coverage.info");
        std::fs::write(&input, LCOV).unwrap();

        let options = PlotOptions {
            output: dir.path().join("map.html"),
            height: 0,
            format: OutputFormat::Html,
            ..Default::default()
        };
        let err = cmd_plot(&input, &options).unwrap_err();
        assert!(err.to_string().contains("height must be positive"));
        assert!(!options.output.exists());
    }

    #[test]
    fn test_cmd_plot_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = PlotOptions {
            output: dir.path().join("map.html"),
            ..Default::default()
        };
        let err = cmd_plot(&dir.path().join("missing.xml"), &options).unwrap_err();
        assert!(err.to_string().contains("Failed to load coverage"));
    }

    #[test]
    fn test_cmd_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("coverage.info");
        std::fs::write(&input, LCOV).unwrap();

        let out = cmd_summary(&input, None).unwrap();

        assert!(out.contains("PATH"));
        assert!(out.contains("src/"));
        assert!(out.contains("  main.rs"));
        assert!(out.contains("  util/"));
        assert!(out.contains("    fmt.rs"));
        assert!(out.contains("75.0%"));
        let src = out.find("src/").unwrap();
        let fmt = out.find("fmt.rs").unwrap();
        assert!(src < fmt);
    }

    #[test]
    fn test_cmd_summary_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("coverage.lcov");
        std::fs::write(&input, "TN:\n").unwrap();

        let out = cmd_summary(&input, Some(Format::Lcov)).unwrap();
        assert!(out.contains("No coverage data"));
    }
}
