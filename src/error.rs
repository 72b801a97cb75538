use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error at position {position}: {source}")]
    Xml {
        source: quick_xml::Error,
        position: usize,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown coverage format")]
    UnknownFormat,

    #[error(
        "Invalid coverage record for '{filename}': {covered_lines} covered of {total_lines} lines"
    )]
    InvalidRecord {
        filename: String,
        total_lines: u64,
        covered_lines: u64,
    },

    #[error("Unsupported output format: '{format}'. Supported formats: {supported}")]
    UnsupportedFormat { format: String, supported: String },

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, CovmapError>;
