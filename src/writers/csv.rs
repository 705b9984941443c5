use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::types::{Result, Table};

use super::TableWriter;

/// CSV/TSV file writer. Missing cells become empty fields.
pub struct CsvWriter {
    path: PathBuf,
    delimiter: u8,
}

impl CsvWriter {
    /// Create a new CSV writer
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter: b',',
        }
    }

    /// Create a new TSV writer
    pub fn new_tsv(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter: b'\t',
        }
    }
}

impl TableWriter for CsvWriter {
    fn write(&mut self, table: &Table) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(&self.path)?;

        writer.write_record(table.column_names())?;

        for row_idx in 0..table.row_count() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|column| {
                    column.cells()[row_idx]
                        .canonical_string()
                        .unwrap_or_default()
                })
                .collect();
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, Column};
    use tempfile::tempdir;

    #[test]
    fn test_write_basic_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.csv");

        let table = Table::new(vec![
            Column::new(
                "Vendor",
                vec![
                    CellValue::Text("Vendor_047".to_string()),
                    CellValue::Text("Vendor_128".to_string()),
                ],
            ),
            Column::new(
                "Amount",
                vec![CellValue::Integer(100), CellValue::Float(2.5)],
            ),
        ]);

        CsvWriter::new(&path).write(&table).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Vendor,Amount\nVendor_047,100\nVendor_128,2.5\n");
    }

    #[test]
    fn test_write_missing_as_empty_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.csv");

        let table = Table::new(vec![
            Column::new(
                "Vendor",
                vec![CellValue::Text("Vendor_001".to_string()), CellValue::Missing],
            ),
            Column::new(
                "Note",
                vec![CellValue::Missing, CellValue::Text("ok".to_string())],
            ),
        ]);

        CsvWriter::new(&path).write(&table).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Vendor,Note\nVendor_001,\n,ok\n");
    }

    #[test]
    fn test_write_tsv_delimiter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.tsv");

        let table = Table::new(vec![
            Column::new("A", vec![CellValue::Text("1".to_string())]),
            Column::new("B", vec![CellValue::Text("2".to_string())]),
        ]);

        CsvWriter::new_tsv(&path).write(&table).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "A\tB\n1\t2\n");
    }
}
