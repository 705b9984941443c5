pub mod csv;
pub mod excel;

use std::path::Path;

use crate::types::{FileFormat, Result, Table};

/// Missing value tokens (case-insensitive), matched after trimming
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "NULL", "NaN", "None", "#N/A",
];

/// Check whether a raw text field represents a missing value
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    MISSING_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
}

/// Common trait for data file readers
pub trait TableReader {
    /// Read the file into an in-memory table
    fn read(&mut self) -> Result<Table>;
}

/// Create a reader for the given file path
pub fn create_reader(path: &Path) -> Result<Box<dyn TableReader>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let format = FileFormat::from_extension(ext).ok_or_else(|| {
        crate::error::Error::UnsupportedFormat(format!(
            "Unsupported file extension: .{}",
            ext
        ))
    })?;

    match format {
        FileFormat::Csv => Ok(Box::new(csv::CsvReader::new(path)?)),
        FileFormat::Tsv => Ok(Box::new(csv::CsvReader::new_tsv(path)?)),
        FileFormat::Excel => Ok(Box::new(excel::ExcelReader::new(path)?)),
    }
}
