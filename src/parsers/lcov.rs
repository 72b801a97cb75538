/// Parser for the LCOV `.info` format.
///
/// Reference: https://ltp.sourceforge.net/coverage/lcov/geninfo.1.php
///
/// Only the records needed for line totals are read:
///   SF:<path to source file>
///   DA:<line number>,<execution count>[,<checksum>]
///   end_of_record
///
/// Everything else (TN, FN, FNDA, BRDA, LF, LH, ...) is ignored; totals are
/// derived from the DA lines themselves.
use std::str;

use super::{LineAccumulator, Parser};
use crate::error::{CovmapError, Result};
use crate::model::CoverageData;

/// LCOV format parser.
pub struct LcovParser;

impl Parser for LcovParser {
    fn parse(&self, input: &[u8]) -> Result<CoverageData> {
        parse_lcov(input)
    }
}

fn parse_lcov(input: &[u8]) -> Result<CoverageData> {
    let text = str::from_utf8(input)
        .map_err(|e| CovmapError::Parse(format!("Invalid UTF-8 in LCOV data: {e}")))?;

    let mut files = LineAccumulator::default();
    let mut current_file: Option<String> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "end_of_record" {
            current_file = None;
            continue;
        }

        let Some((tag, value)) = line.split_once(':') else {
            continue;
        };

        match tag {
            "SF" => {
                files.file(value);
                current_file = Some(value.to_string());
            }
            "DA" => {
                let Some(path) = current_file.as_deref() else {
                    continue;
                };
                let mut parts = value.splitn(3, ',');
                let line_number = parts.next().and_then(|n| n.parse::<u32>().ok());
                let count = parts.next().and_then(|c| c.parse::<i64>().ok());
                // Negative counts mark non-instrumentable lines.
                if let (Some(line_number), Some(count)) = (line_number, count) {
                    if count >= 0 {
                        files.record(path, line_number, count as u64);
                    }
                }
            }
            _ => {}
        }
    }

    files.finish()
}
