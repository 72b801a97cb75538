//! Flat, per-file coverage records. Parsers produce a `CoverageData` which is
//! then turned into a directory tree by the hierarchy builder.

use crate::error::{CovmapError, Result};

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// Line totals for a single source file.
///
/// Fields are private so that every record in circulation satisfies
/// `covered_lines <= total_lines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRecord {
    filename: String,
    total_lines: u64,
    covered_lines: u64,
}

impl CoverageRecord {
    pub fn new(filename: impl Into<String>, total_lines: u64, covered_lines: u64) -> Result<Self> {
        let filename = filename.into();
        if covered_lines > total_lines {
            return Err(CovmapError::InvalidRecord {
                filename,
                total_lines,
                covered_lines,
            });
        }
        Ok(Self {
            filename,
            total_lines,
            covered_lines,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    pub fn covered_lines(&self) -> u64 {
        self.covered_lines
    }

    #[must_use]
    pub fn coverage_rate(&self) -> f64 {
        rate(self.covered_lines, self.total_lines)
    }
}

/// The complete result of parsing a single coverage file.
#[derive(Debug, Clone, Default)]
pub struct CoverageData {
    pub files: Vec<CoverageRecord>,
}

impl CoverageData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_lines(&self) -> u64 {
        self.files.iter().map(CoverageRecord::total_lines).sum()
    }

    pub fn covered_lines(&self) -> u64 {
        self.files.iter().map(CoverageRecord::covered_lines).sum()
    }
}
