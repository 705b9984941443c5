use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Pattern a prefix label must match to be usable as a pseudonym stem
static PREFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// A validated category label used as the textual stem of pseudonyms
/// (e.g. "Vendor" produces "Vendor_047").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Prefix(String);

impl Prefix {
    /// Validate and construct a prefix. The label is trimmed first; empty or
    /// otherwise unusable labels are rejected.
    pub fn new(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() || !PREFIX_PATTERN.is_match(trimmed) {
            return Err(crate::error::Error::InvalidPrefix(label.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single cell in a table. Readers preserve the native type of each value;
/// `Missing` covers empty cells, error cells, and recognized missing tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    #[allow(dead_code)]
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Lossless textual form of a non-missing cell, or `None` for missing.
    /// Distinct values always produce distinct strings (float formatting is
    /// shortest-roundtrip), so mapping by this form preserves injectivity.
    pub fn canonical_string(&self) -> Option<String> {
        match self {
            CellValue::Missing => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Boolean(b) => Some(b.to_string()),
            CellValue::DateTime(d) => {
                if d.format("%H:%M:%S").to_string() == "00:00:00" {
                    Some(d.format("%Y-%m-%d").to_string())
                } else {
                    Some(d.format("%Y-%m-%d %H:%M:%S").to_string())
                }
            }
        }
    }
}

/// A named, ordered column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [CellValue] {
        &mut self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of distinct non-missing values, by canonical form
    pub fn distinct_count(&self) -> usize {
        let mut seen = HashSet::new();
        for cell in &self.cells {
            if let Some(text) = cell.canonical_string() {
                seen.insert(text);
            }
        }
        seen.len()
    }

    /// First non-missing value, for display
    pub fn first_value(&self) -> Option<String> {
        self.cells.iter().find_map(|c| c.canonical_string())
    }

    /// Up to `limit` distinct non-missing values, in row order, for display
    pub fn sample_values(&self, limit: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut samples = Vec::new();
        for cell in &self.cells {
            if samples.len() >= limit {
                break;
            }
            if let Some(text) = cell.canonical_string() {
                if seen.insert(text.clone()) {
                    samples.push(text);
                }
            }
        }
        samples
    }
}

/// An in-memory table: ordered named columns of equal length
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }
}

/// Which columns to pseudonymize, and under which prefix. Built by the CLI
/// layer from already-validated input; the engine never sees raw user strings.
#[derive(Debug, Clone, Default)]
pub struct ColumnAssignments {
    by_column: BTreeMap<String, Prefix>,
}

impl ColumnAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, column: impl Into<String>, prefix: Prefix) {
        self.by_column.insert(column.into(), prefix);
    }

    pub fn prefix_for(&self, column: &str) -> Option<&Prefix> {
        self.by_column.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_column.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prefix)> + '_ {
        self.by_column.iter().map(|(c, p)| (c.as_str(), p))
    }

    pub fn contains(&self, column: &str) -> bool {
        self.by_column.contains_key(column)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Tsv,
    Excel,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" | "tab" => Some(FileFormat::Tsv),
            "xlsx" | "xls" | "xlsm" | "xlsb" => Some(FileFormat::Excel),
            _ => None,
        }
    }
}

/// Summary of one pseudonymization run, for reporting only
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Input file name (without path)
    pub file_name: String,

    /// Number of data rows processed
    pub row_count: usize,

    /// One entry per pseudonymized column
    pub columns: Vec<ColumnReport>,

    /// Distinct values mapped under each prefix
    pub prefixes: BTreeMap<String, usize>,
}

/// Per-column summary entry
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    /// Column name in the input table
    pub column: String,

    /// Prefix used for replacement labels
    pub prefix: String,

    /// Distinct non-missing values replaced in this column
    pub distinct_values: usize,
}

/// Result type for the application
pub type Result<T> = std::result::Result<T, crate::error::Error>;
