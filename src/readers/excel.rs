use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::types::{CellValue, Column, Result, Table};

use super::{is_missing, TableReader};

/// Excel file reader (supports .xlsx, .xls, .xlsm, .xlsb). Reads the first
/// worksheet, matching the tool's one-table-per-file model.
pub struct ExcelReader {
    path: PathBuf,
}

impl ExcelReader {
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Convert an Excel cell to a table cell, preserving native types
    fn data_to_cell(dt: &Data) -> CellValue {
        match dt {
            Data::Empty => CellValue::Missing,
            Data::String(s) => {
                if is_missing(s) {
                    CellValue::Missing
                } else {
                    CellValue::Text(s.clone())
                }
            }
            Data::Float(f) => CellValue::Float(*f),
            Data::Int(i) => CellValue::Integer(*i),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::DateTime(d) => match Self::excel_serial_to_datetime(d.as_f64()) {
                Some(datetime) => CellValue::DateTime(datetime),
                None => CellValue::Float(d.as_f64()),
            },
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Missing,
        }
    }

    /// Convert an Excel serial date to a datetime.
    /// Excel epoch is 1899-12-30 (with the 1900 leap year bug); the
    /// fractional part of the serial carries the time of day.
    fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
        let days = serial.trunc() as i64;
        let seconds = (serial.fract() * 86_400.0).round() as i64;
        let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
        let date = base.checked_add_signed(Duration::days(days))?;
        date.and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::seconds(seconds))
    }

    /// Header text for a cell, falling back to a positional name
    fn header_name(cell: Option<&Data>, index: usize) -> String {
        let name = cell
            .map(|c| match c {
                Data::String(s) => s.trim().to_string(),
                other => Self::data_to_cell(other)
                    .canonical_string()
                    .unwrap_or_default(),
            })
            .unwrap_or_default();

        if name.is_empty() {
            format!("Column{}", index + 1)
        } else {
            name
        }
    }
}

impl TableReader for ExcelReader {
    fn read(&mut self) -> Result<Table> {
        let mut workbook = open_workbook_auto(&self.path)?;

        let sheet_names = workbook.sheet_names().to_vec();
        let first_sheet = sheet_names.first().ok_or_else(|| {
            crate::error::Error::InvalidInput(format!(
                "No worksheets found in {}",
                self.path.display()
            ))
        })?;

        let range = workbook
            .worksheet_range(first_sheet)
            .map_err(crate::error::Error::Excel)?;

        if range.is_empty() {
            return Ok(Table::default());
        }

        let (_, col_count) = range.get_size();
        let mut rows = range.rows();

        let header_row = rows.next().unwrap_or(&[]);
        let headers: Vec<String> = (0..col_count)
            .map(|idx| Self::header_name(header_row.get(idx), idx))
            .collect();

        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); col_count];
        for row in rows {
            for (col_idx, column) in cells.iter_mut().enumerate() {
                let cell = row
                    .get(col_idx)
                    .map(Self::data_to_cell)
                    .unwrap_or(CellValue::Missing);
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
