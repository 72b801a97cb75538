use std::path::Path;

use log::info;

use crate::detect::{detect_format, Format};
use crate::error::{CovmapError, Result};
use crate::model::CoverageData;

/// Read a coverage file and parse it, auto-detecting its format unless an
/// override is given. Returns the parsed records and the format used.
pub fn load(file_path: &Path, format_override: Option<Format>) -> Result<(CoverageData, Format)> {
    let content = std::fs::read(file_path)?;

    let format = match format_override {
        Some(format) => format,
        None => detect_format(file_path, &content).ok_or(CovmapError::UnknownFormat)?,
    };

    let data = format.parser().parse(&content)?;
    info!(
        "parsed {} files from {} as {}",
        data.files.len(),
        file_path.display(),
        format
    );

    Ok((data, format))
}
