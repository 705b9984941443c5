use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder};

use crate::types::{CellValue, Column, Result, Table};

use super::{is_missing, TableReader};

/// CSV/TSV file reader
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    /// Create a new CSV reader
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b',',
        })
    }

    /// Create a new TSV reader
    pub fn new_tsv(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b'\t',
        })
    }

    fn create_reader(&self) -> Result<Reader<BufReader<File>>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        Ok(csv_reader)
    }
}

impl TableReader for CsvReader {
    fn read(&mut self) -> Result<Table> {
        let mut reader = self.create_reader()?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let num_cols = headers.len();
        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); num_cols];

        for result in reader.records() {
            let record = result?;

            for (col_idx, column) in cells.iter_mut().enumerate() {
                // Short records pad with missing; extra fields are dropped
                let cell = match record.get(col_idx) {
                    Some(field) if !is_missing(field) => {
                        CellValue::Text(field.to_string())
                    }
                    _ => CellValue::Missing,
                };
                column.push(cell);
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();

        Ok(Table::new(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read_csv(content: &str) -> Table {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "{}", content).unwrap();
        CsvReader::new(file.path()).unwrap().read().unwrap()
    }

    #[test]
    fn test_read_basic_csv() {
        let table = read_csv("Vendor,Amount\nAcme,100\nBoeing,250\n");

        assert_eq!(table.column_names(), vec!["Vendor", "Amount"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("Vendor").unwrap().cells()[0],
            CellValue::Text("Acme".to_string())
        );
        assert_eq!(
            table.column("Amount").unwrap().cells()[1],
            CellValue::Text("250".to_string())
        );
    }

    #[test]
    fn test_read_missing_tokens_become_missing() {
        let table = read_csv("Vendor,Amount\nAcme,100\nNA,\nnull,75\n");

        let vendors = table.column("Vendor").unwrap().cells();
        assert!(vendors[1].is_missing());
        assert!(vendors[2].is_missing());
        assert!(table.column("Amount").unwrap().cells()[1].is_missing());
    }

    #[test]
    fn test_read_ragged_rows() {
        let table = read_csv("A,B,C\n1,2\n4,5,6,7\n");

        assert_eq!(table.row_count(), 2);
        assert!(table.column("C").unwrap().cells()[0].is_missing());
        assert_eq!(
            table.column("C").unwrap().cells()[1],
            CellValue::Text("6".to_string())
        );
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_read_tsv() {
        let mut file = NamedTempFile::with_suffix(".tsv").unwrap();
        write!(file, "Vendor\tAmount\nAcme\t100\n").unwrap();
        let table = CsvReader::new_tsv(file.path()).unwrap().read().unwrap();

        assert_eq!(table.column_names(), vec!["Vendor", "Amount"]);
        assert_eq!(
            table.column("Vendor").unwrap().cells()[0],
            CellValue::Text("Acme".to_string())
        );
    }

    #[test]
    fn test_read_headers_only() {
        let table = read_csv("Vendor,Amount\n");
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }
}
