use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Column not found in table: {0}")]
    UnknownColumn(String),

    #[error("Invalid prefix {0:?}: prefixes must start with a letter and contain only letters, digits, and underscores")]
    InvalidPrefix(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
