//! Options controlling how a coverage treemap is produced.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::detect::Format;
use crate::error::{CovmapError, Result};

pub const DEFAULT_OUTPUT: &str = "coverage.html";
pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 800;
pub const DEFAULT_TITLE: &str = "Hierarchical Test Coverage Treemap";

/// Plotly colorscales offered for the coverage metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Colorscale {
    #[value(name = "RdYlGn")]
    RdYlGn,
    #[value(name = "Viridis")]
    Viridis,
    #[value(name = "Blues")]
    Blues,
    #[value(name = "Reds")]
    Reds,
    #[value(name = "YlOrRd")]
    YlOrRd,
    #[value(name = "YlGnBu")]
    YlGnBu,
    #[value(name = "RdBu")]
    RdBu,
    #[default]
    #[value(name = "Spectral")]
    Spectral,
}

impl Colorscale {
    /// Name as understood by plotly.js.
    pub fn as_str(&self) -> &'static str {
        match self {
            Colorscale::RdYlGn => "RdYlGn",
            Colorscale::Viridis => "Viridis",
            Colorscale::Blues => "Blues",
            Colorscale::Reds => "Reds",
            Colorscale::YlOrRd => "YlOrRd",
            Colorscale::YlGnBu => "YlGnBu",
            Colorscale::RdBu => "RdBu",
            Colorscale::Spectral => "Spectral",
        }
    }
}

impl std::fmt::Display for Colorscale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output file formats the renderer can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 1] = [OutputFormat::Html];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CovmapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| CovmapError::UnsupportedFormat {
                format: s.to_string(),
                supported: OutputFormat::ALL
                    .iter()
                    .map(|f| format!("'{}'", f.as_str()))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub colorscale: Colorscale,
    pub format: OutputFormat,
    /// Input format; detected from the file when `None`.
    pub input_format: Option<Format>,
    pub title: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            colorscale: Colorscale::default(),
            format: OutputFormat::default(),
            input_format: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl PlotOptions {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(CovmapError::InvalidOption("width must be positive".into()));
        }
        if self.height == 0 {
            return Err(CovmapError::InvalidOption("height must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = PlotOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.output, PathBuf::from("coverage.html"));
        assert_eq!(options.colorscale, Colorscale::Spectral);
        assert_eq!(options.format, OutputFormat::Html);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let options = PlotOptions {
            width: 0,
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("width must be positive"));

        let options = PlotOptions {
            height: 0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        let err = "png".parse::<OutputFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported output format: 'png'. Supported formats: 'html'"
        );
    }

    #[test]
    fn test_colorscale_uses_plotly_names() {
        let scale = Colorscale::from_str("RdYlGn", false).unwrap();
        assert_eq!(scale, Colorscale::RdYlGn);
        assert_eq!(scale.to_string(), "RdYlGn");
        assert!(Colorscale::from_str("Rainbow", true).is_err());
    }
}
