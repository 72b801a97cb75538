//! Plotly treemap output.
//!
//! The figure is described as plotly.js JSON and written into a standalone
//! HTML page that loads plotly.js from its CDN.

use std::fmt::Write as _;
use std::path::Path;

use chrono::Utc;
use log::info;
use serde_json::{json, Value};

use crate::config::{Colorscale, OutputFormat, PlotOptions};
use crate::error::{CovmapError, Result};
use crate::treemap::TreemapArrays;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const GOLDEN_RATIO: f64 = 1.618;
const TILING_PADDING: u32 = 2;
const COVERAGE_MIN: u32 = 0;
const COVERAGE_MID: u32 = 50;
const COVERAGE_MAX: u32 = 100;
const BORDER_WIDTH: u32 = 1;
const BORDER_COLOR: &str = "white";
const FONT_SIZE: u32 = 12;

pub struct Figure {
    data: TreemapArrays,
    width: u32,
    height: u32,
    colorscale: Colorscale,
    title: String,
}

impl Figure {
    pub fn new(data: TreemapArrays, options: &PlotOptions) -> Self {
        Self {
            data,
            width: options.width,
            height: options.height,
            colorscale: options.colorscale,
            title: options.title.clone(),
        }
    }

    pub fn trace(&self) -> Value {
        json!({
            "type": "treemap",
            "ids": self.data.ids,
            "labels": self.data.labels,
            "parents": self.data.parents,
            "values": self.data.values,
            "text": self.data.text,
            "branchvalues": "total",
            "textinfo": "label",
            "hovertemplate": "%{text}<extra></extra>",
            "tiling": {
                "packing": "squarify",
                "squarifyratio": GOLDEN_RATIO,
                "pad": TILING_PADDING,
            },
            "marker": {
                "colors": self.data.colors,
                "colorscale": self.colorscale.as_str(),
                "colorbar": { "title": "Coverage %" },
                "cmin": COVERAGE_MIN,
                "cmid": COVERAGE_MID,
                "cmax": COVERAGE_MAX,
                "line": { "width": BORDER_WIDTH, "color": BORDER_COLOR },
            },
        })
    }

    pub fn layout(&self) -> Value {
        json!({
            "title": { "text": self.title, "x": 0.5, "xanchor": "center" },
            "width": self.width,
            "height": self.height,
            "margin": { "t": 60, "b": 20, "l": 20, "r": 20 },
            "font": { "size": FONT_SIZE },
        })
    }

    pub fn to_html(&self) -> Result<String> {
        let data = script_json(&Value::Array(vec![self.trace()]))?;
        let layout = script_json(&self.layout())?;
        let generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

        let mut html = String::new();
        writeln!(html, "<!DOCTYPE html>").unwrap();
        writeln!(html, "<html>\n<head>\n<meta charset=\"utf-8\">").unwrap();
        writeln!(html, "<title>{}</title>", escape_html(&self.title)).unwrap();
        writeln!(html, "<script src=\"{PLOTLY_CDN}\"></script>").unwrap();
        writeln!(html, "</head>\n<body>").unwrap();
        writeln!(html, "<div id=\"covmap\"></div>").unwrap();
        writeln!(html, "<script>").unwrap();
        writeln!(html, "Plotly.newPlot(\"covmap\", {data}, {layout});").unwrap();
        writeln!(html, "</script>").unwrap();
        writeln!(html, "<p style=\"font-size:small\">Generated {generated}</p>").unwrap();
        writeln!(html, "</body>\n</html>").unwrap();
        Ok(html)
    }

    pub fn write(&self, path: &Path, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Html => self.write_html(path),
        }
    }

    pub fn write_html(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_html()?)?;
        info!("wrote {} treemap entries to {}", self.data.len(), path.display());
        Ok(())
    }
}

/// Serialize for embedding inside a `<script>` element.
fn script_json(value: &Value) -> Result<String> {
    let json = serde_json::to_string(value).map_err(|e| CovmapError::Parse(e.to_string()))?;
    Ok(json.replace("</", "<\\/"))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
