pub mod cobertura;
pub mod lcov;

use std::collections::HashMap;

use log::debug;

use crate::error::Result;
use crate::model::{CoverageData, CoverageRecord};

/// Every format parser implements this trait.
pub trait Parser {
    /// Parse the input bytes into flat per-file coverage records.
    fn parse(&self, input: &[u8]) -> Result<CoverageData>;
}

/// Collects line hits per file, merging repeated lines and repeated files.
///
/// A line seen more than once keeps its highest hit count. Files come out in
/// the order they were first seen.
#[derive(Debug, Default)]
pub(crate) struct LineAccumulator {
    order: Vec<String>,
    files: HashMap<String, HashMap<u32, u64>>,
}

impl LineAccumulator {
    pub(crate) fn file(&mut self, path: &str) -> &mut HashMap<u32, u64> {
        if !self.files.contains_key(path) {
            self.order.push(path.to_string());
        }
        self.files.entry(path.to_string()).or_default()
    }

    pub(crate) fn record(&mut self, path: &str, line_number: u32, hit_count: u64) {
        let hits = self.file(path).entry(line_number).or_insert(0);
        if hit_count > *hits {
            *hits = hit_count;
        }
    }

    /// Files without any instrumentable line are dropped.
    pub(crate) fn finish(mut self) -> Result<CoverageData> {
        let mut data = CoverageData::new();
        for path in self.order {
            let lines = self.files.remove(&path).unwrap_or_default();
            if lines.is_empty() {
                debug!("skipping '{}': no instrumentable lines", path);
                continue;
            }
            let total = lines.len() as u64;
            let covered = lines.values().filter(|&&h| h > 0).count() as u64;
            data.files.push(CoverageRecord::new(path, total, covered)?);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_merges_lines_and_files() {
        let mut acc = LineAccumulator::default();
        acc.record("b.py", 1, 0);
        acc.record("a.py", 1, 2);
        acc.record("b.py", 1, 3);
        acc.record("b.py", 2, 0);
        acc.file("empty.py");

        let data = acc.finish().unwrap();
        assert_eq!(data.files.len(), 2);
        assert_eq!(data.files[0].filename(), "b.py");
        assert_eq!(data.files[0].total_lines(), 2);
        assert_eq!(data.files[0].covered_lines(), 1);
        assert_eq!(data.files[1].filename(), "a.py");
        assert_eq!(data.files[1].covered_lines(), 1);
    }
}
