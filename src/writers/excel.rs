use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

use crate::types::{CellValue, Result, Table};

use super::TableWriter;

/// Excel file writer. Output is always xlsx-format content, regardless of the
/// destination extension. Typed cells are written natively; missing cells are
/// left blank; datetimes are written in their canonical textual form.
pub struct ExcelWriter {
    path: PathBuf,
}

impl ExcelWriter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl TableWriter for ExcelWriter {
    fn write(&mut self, table: &Table) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col_idx, column) in table.columns().iter().enumerate() {
            let col = col_idx as u16;
            worksheet.write_string(0, col, column.name())?;

            for (row_idx, cell) in column.cells().iter().enumerate() {
                let row = (row_idx + 1) as u32;
                match cell {
                    CellValue::Missing => {}
                    CellValue::Text(s) => {
                        worksheet.write_string(row, col, s.as_str())?;
                    }
                    CellValue::Integer(i) => {
                        worksheet.write_number(row, col, *i as f64)?;
                    }
                    CellValue::Float(f) => {
                        worksheet.write_number(row, col, *f)?;
                    }
                    CellValue::Boolean(b) => {
                        worksheet.write_boolean(row, col, *b)?;
                    }
                    CellValue::DateTime(_) => {
                        let text = cell.canonical_string().unwrap_or_default();
                        worksheet.write_string(row, col, text)?;
                    }
                }
            }
        }

        workbook.save(&self.path)?;
        Ok(())
    }
}
