pub mod csv;
pub mod excel;

use std::path::Path;

use crate::types::{FileFormat, Result, Table};

/// Common trait for data file writers
pub trait TableWriter {
    /// Persist the table to the destination path
    fn write(&mut self, table: &Table) -> Result<()>;
}

/// Create a writer for the given file path
pub fn create_writer(path: &Path) -> Result<Box<dyn TableWriter>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let format = FileFormat::from_extension(ext).ok_or_else(|| {
        crate::error::Error::UnsupportedFormat(format!(
            "Unsupported output file extension: .{}",
            ext
        ))
    })?;

    match format {
        FileFormat::Csv => Ok(Box::new(csv::CsvWriter::new(path))),
        FileFormat::Tsv => Ok(Box::new(csv::CsvWriter::new_tsv(path))),
        FileFormat::Excel => Ok(Box::new(excel::ExcelWriter::new(path))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_writer_unsupported_extension() {
        let result = create_writer(Path::new("clean.parquet"));
        assert!(result.is_err());
    }
}
