/// Input format selection for coverage files.
///
/// An explicit override always wins. Otherwise the file extension is
/// consulted first (`.info`/`.lcov` are unambiguous, `.xml` is not) and then
/// the first few KB of content are sniffed.
use std::path::Path;

use crate::error::CovmapError;
use crate::parsers::cobertura::CoberturaParser;
use crate::parsers::lcov::LcovParser;
use crate::parsers::Parser;

/// Bytes inspected when sniffing content.
const SNIFF_LEN: usize = 4096;

/// Supported coverage formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Cobertura,
    Lcov,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Cobertura, Format::Lcov];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Cobertura => "cobertura",
            Format::Lcov => "lcov",
        }
    }

    pub fn parser(&self) -> &'static dyn Parser {
        match self {
            Format::Cobertura => &CoberturaParser,
            Format::Lcov => &LcovParser,
        }
    }

    fn matches_extension(&self, ext: &str) -> bool {
        match self {
            Format::Cobertura => false,
            Format::Lcov => ext == "info" || ext == "lcov",
        }
    }

    fn matches_content(&self, head: &str) -> bool {
        match self {
            // Lines must start with the tags; a mere mention is not enough.
            Format::Lcov => {
                head.lines().any(|l| l.starts_with("SF:"))
                    && head.lines().any(|l| l.starts_with("DA:"))
            }
            Format::Cobertura => {
                (head.contains("<?xml") || head.trim_start().starts_with('<'))
                    && head.contains("<coverage")
            }
        }
    }
}

impl std::str::FromStr for Format {
    type Err = CovmapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Format::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| {
                let supported: Vec<_> = Format::ALL.iter().map(Format::as_str).collect();
                CovmapError::Parse(format!(
                    "Unknown format: '{}'. Supported: {}",
                    s,
                    supported.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the coverage format from filename and file content.
pub fn detect_format(path: &Path, content: &[u8]) -> Option<Format> {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let ext = ext.to_lowercase();
        if let Some(fmt) = Format::ALL.into_iter().find(|f| f.matches_extension(&ext)) {
            return Some(fmt);
        }
    }

    let head = String::from_utf8_lossy(&content[..content.len().min(SNIFF_LEN)]);
    Format::ALL.into_iter().find(|f| f.matches_content(&head))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_lcov_by_extension() {
        assert_eq!(detect_format(Path::new("coverage.info"), b""), Some(Format::Lcov));
        assert_eq!(detect_format(Path::new("coverage.LCOV"), b""), Some(Format::Lcov));
    }

    #[test]
    fn test_detect_lcov_by_content() {
        let content = b"TN:test\nSF:/src/lib.rs\nDA:1,5\nend_of_record\n";
        assert_eq!(detect_format(Path::new("coverage.txt"), content), Some(Format::Lcov));
    }

    #[test]
    fn test_detect_cobertura_by_content() {
        let content = b"<?xml version=\"1.0\"?>\n<coverage version=\"1.0\">";
        assert_eq!(detect_format(Path::new("coverage.xml"), content), Some(Format::Cobertura));
    }

    #[test]
    fn test_detect_xml_without_coverage_root() {
        let content = b"<?xml version=\"1.0\"?>\n<report name=\"jacoco\">";
        assert_eq!(detect_format(Path::new("report.xml"), content), None);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_format(Path::new("random.dat"), b"hello world"), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("Cobertura".parse::<Format>().unwrap(), Format::Cobertura);
        assert_eq!("lcov".parse::<Format>().unwrap(), Format::Lcov);
        let err = "jacoco".parse::<Format>().unwrap_err();
        assert!(err.to_string().contains("cobertura, lcov"));
    }
}
