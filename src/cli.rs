use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config;
use crate::error::Error;
use crate::output;
use crate::pseudonym::{pseudonymize, SessionMapper};
use crate::readers::create_reader;
use crate::types::{
    ColumnAssignments, ColumnReport, Prefix, Result, RunReport, Table,
};
use crate::writers::create_writer;

/// Longest example value shown when listing columns
const EXAMPLE_VALUE_WIDTH: usize = 30;

/// Longest sample value shown when choosing prefixes
const SAMPLE_VALUE_WIDTH: usize = 20;

/// Replace sensitive report values with randomized placeholder labels
#[derive(Parser, Debug)]
#[command(name = "pseudobank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File to pseudonymize interactively
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pseudonymize a file without prompts
    Clean {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (output/CLEAN_<name> if not specified)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Column to pseudonymize, as COLUMN=PREFIX (repeatable)
        #[arg(long = "map", value_name = "COLUMN=PREFIX", required = true)]
        map: Vec<String>,

        /// Print a JSON summary of the run to stdout
        #[arg(long, default_value_t = false)]
        summary: bool,

        /// Write a JSON summary of the run to this path
        #[arg(long)]
        summary_out: Option<PathBuf>,
    },
}

/// Parse a COLUMN=PREFIX mapping argument
pub fn parse_assignment(raw: &str) -> Result<(String, Prefix)> {
    let (column, label) = raw.split_once('=').ok_or_else(|| {
        Error::InvalidInput(format!("Expected COLUMN=PREFIX, got {:?}", raw))
    })?;

    let column = column.trim();
    if column.is_empty() {
        return Err(Error::InvalidInput(format!(
            "Missing column name in {:?}",
            raw
        )));
    }

    Ok((column.to_string(), Prefix::new(label)?))
}

/// Normalize a free-text prefix the way the prompts suggest: spaces become
/// underscores and each underscore-separated word is title-cased.
pub fn normalize_prefix(raw: &str) -> String {
    raw.trim()
        .replace(' ', "_")
        .split('_')
        .map(title_case)
        .collect::<Vec<_>>()
        .join("_")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Parse a column selection like "1, 3, 5" into validated 0-based indexes
fn parse_selection(
    response: &str,
    column_count: usize,
) -> std::result::Result<Vec<usize>, String> {
    let mut selected = Vec::new();
    for part in response.split(',') {
        let number: usize = part.trim().parse().map_err(|_| {
            "Please enter numbers separated by commas (e.g., 1, 3, 5)".to_string()
        })?;
        if number < 1 || number > column_count {
            return Err(format!(
                "'{}' is not a valid column number. Please try again.",
                number
            ));
        }
        if !selected.contains(&(number - 1)) {
            selected.push(number - 1);
        }
    }
    Ok(selected)
}

/// Per-column report entries, using distinct counts taken before any cell is
/// replaced
fn collect_column_reports(
    table: &Table,
    assignments: &ColumnAssignments,
) -> Vec<ColumnReport> {
    assignments
        .iter()
        .filter_map(|(column, prefix)| {
            table.column(column).map(|col| ColumnReport {
                column: column.to_string(),
                prefix: prefix.as_str().to_string(),
                distinct_values: col.distinct_count(),
            })
        })
        .collect()
}

/// Write the clean table, creating the destination folder if needed
fn save_table(table: &Table, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    create_writer(out_path)?.write(table)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Run the non-interactive clean subcommand
pub fn run_clean(
    input: &Path,
    out: Option<PathBuf>,
    map: &[String],
    summary: bool,
    summary_out: Option<PathBuf>,
) -> Result<()> {
    let input = config::resolve_input_path(input);
    let mut table = create_reader(&input)?.read()?;

    let mut assignments = ColumnAssignments::new();
    for entry in map {
        let (column, prefix) = parse_assignment(entry)?;
        assignments.assign(column, prefix);
    }

    let columns = collect_column_reports(&table, &assignments);

    let mut mapper = SessionMapper::new();
    pseudonymize(&mut table, &assignments, &mut mapper)?;

    let out_path = out.unwrap_or_else(|| config::default_output_path(&input));
    save_table(&table, &out_path)?;
    eprintln!("Clean file written to: {}", out_path.display());

    let report = RunReport {
        file_name: file_name_of(&input),
        row_count: table.row_count(),
        columns,
        prefixes: mapper.summary(),
    };

    for entry in &report.columns {
        eprintln!(
            "  Replaced {} unique values in '{}' with random {}_XXX",
            entry.distinct_values, entry.column, entry.prefix
        );
    }

    if summary {
        output::write_json_stdout(&report)?;
    }

    if let Some(path) = summary_out {
        output::write_json_file(&report, &path)?;
        eprintln!("Summary written to: {}", path.display());
    }

    Ok(())
}

fn print_header(text: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", text);
    println!("{}", "=".repeat(60));
}

fn print_step(step_num: u32, text: &str) {
    println!("\n--- Step {}: {} ---\n", step_num, text);
}

fn prompt(text: &str) -> Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn get_yes_no(question: &str) -> Result<bool> {
    loop {
        let response = prompt(&format!("{} (y/n): ", question))?.to_lowercase();
        match response.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please enter 'y' for yes or 'n' for no."),
        }
    }
}

/// Interactive mode: walks through pseudonymizing a file step by step
pub fn interactive(input: &Path) -> Result<()> {
    print_header("PSEUDOBANK - Interactive Mode");

    println!(
        "
WHAT THIS DOES:
    This tool helps you replace sensitive information in your report
    (like vendor names, program names) with fake placeholder names
    (like Vendor_047, Program_012).

    After this, you can safely share your data with AI tools.
    The numbers and dates stay the same - only the names change.

    NOTE: Each time you run this tool, you get FRESH random assignments.
    This makes it harder for anyone to reverse-engineer patterns.
"
    );

    print_step(1, "Loading your file");

    let mut table = match create_reader(input).and_then(|mut r| r.read()) {
        Ok(table) => table,
        Err(e) => {
            println!("ERROR: Could not load file. {}", e);
            return Ok(());
        }
    };

    let file_name = file_name_of(input);
    println!("Loaded: {}", file_name);
    println!("Found {} rows of data", table.row_count());

    print_step(2, "Looking at your columns");

    println!("Your file has these columns:\n");
    for (i, column) in table.columns().iter().enumerate() {
        let sample = column
            .first_value()
            .unwrap_or_else(|| "(empty)".to_string());
        println!("  {}. {}", i + 1, column.name());
        println!(
            "      Example value: {}",
            truncate(&sample, EXAMPLE_VALUE_WIDTH)
        );
        println!();
    }

    print_step(3, "Select columns to hide");

    println!(
        "
WHICH COLUMNS CONTAIN SENSITIVE INFORMATION?

Think about columns that have:
  - Company names (vendors, contractors, suppliers)
  - Program or project names
  - Organization names
  - Any other names you don't want to share

Columns you should usually KEEP as-is (don't select these):
  - Dollar amounts (these are usually fine)
  - Dates
  - Document numbers
  - Generic codes
"
    );

    println!("Enter the NUMBERS of the columns you want to hide.");
    println!("Separate multiple numbers with commas.");
    println!("Example: 1, 3, 5");
    println!();

    let selected: Vec<usize> = loop {
        let response = prompt("Column numbers to hide (or 'none' to skip): ")?;
        if response.eq_ignore_ascii_case("none") {
            break Vec::new();
        }
        match parse_selection(&response, table.column_count()) {
            Ok(indexes) => break indexes,
            Err(message) => println!("  {}", message),
        }
    };

    if selected.is_empty() {
        println!("\nNo columns selected. Your file will not be changed.");
        return Ok(());
    }

    println!("\nYou selected these columns to hide:");
    for &idx in &selected {
        println!("  - {}", table.columns()[idx].name());
    }

    print_step(4, "Choose replacement names");

    println!(
        "
WHAT ARE PREFIXES?

When we hide a value like \"Acme Corporation\", we replace it with a
fake name like \"Vendor_047\".

The PREFIX is the word that comes before the number.

COMMON PREFIXES TO USE:

  For company/vendor columns:     Vendor
  For program/project columns:    Program
  For contractor columns:         Contractor
  For organization columns:       Org

You can use any word you want! The prefix just helps you remember
what type of data it was.
"
    );

    let mut assignments = ColumnAssignments::new();
    for &idx in &selected {
        let column = &table.columns()[idx];
        let samples: Vec<String> = column
            .sample_values(3)
            .iter()
            .map(|s| truncate(s, SAMPLE_VALUE_WIDTH))
            .collect();

        println!("\nColumn: '{}'", column.name());
        println!("Sample values: {}", samples.join(", "));
        println!();

        let prefix = loop {
            let raw = prompt(&format!(
                "What prefix should I use for '{}'? (e.g., Vendor, Program): ",
                column.name()
            ))?;
            match Prefix::new(&normalize_prefix(&raw)) {
                Ok(prefix) => break prefix,
                Err(_) => println!("  Please enter a prefix (like 'Vendor' or 'Program')"),
            }
        };

        println!(
            "  Got it! Values in '{}' will become {}_XXX (random numbers)",
            column.name(),
            prefix
        );
        assignments.assign(column.name().to_string(), prefix);
    }

    print_step(5, "Confirm your choices");

    println!("Here's what I'm about to do:\n");
    println!("  File: {}", file_name);
    println!("  Rows: {}", table.row_count());
    println!();
    println!("  Columns to hide:");
    for (column, prefix) in assignments.iter() {
        let distinct = table.column(column).map_or(0, |c| c.distinct_count());
        println!(
            "    '{}' -> {}_XXX (random numbers, {} unique values)",
            column, prefix, distinct
        );
    }
    println!();
    println!("  Columns that will stay the same:");
    for column in table.columns() {
        if !assignments.contains(column.name()) {
            println!("    '{}'", column.name());
        }
    }
    println!();

    if !get_yes_no("Does this look right?")? {
        println!("\nCancelled. No changes made.");
        return Ok(());
    }

    print_step(6, "Replacing values");

    let report_columns = collect_column_reports(&table, &assignments);

    // Fresh mapper for this session
    let mut mapper = SessionMapper::new();
    pseudonymize(&mut table, &assignments, &mut mapper)?;

    for entry in &report_columns {
        println!(
            "  Replaced {} unique values in '{}' with random {}_XXX",
            entry.distinct_values, entry.column, entry.prefix
        );
    }

    print_step(7, "Saving your clean file");

    let output_path = config::default_output_path(input);
    save_table(&table, &output_path)?;

    print_header("DONE!");

    println!(
        "
YOUR CLEAN FILE IS READY:

  {}

WHAT TO DO NEXT:

  1. Open the clean file and verify it looks right
  2. Share the clean file with Claude or other AI tools
  3. When you get code back, run it on your ORIGINAL file
     (the code uses column names, not the fake values)

SECURITY NOTE:

  Each time you run this tool, values get NEW random numbers.
  \"Acme Corp\" might be Vendor_047 this time and Vendor_283 next time.
  This makes patterns harder to reverse-engineer.
",
        output_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        let (column, prefix) = parse_assignment("Vendor Name=Vendor").unwrap();
        assert_eq!(column, "Vendor Name");
        assert_eq!(prefix.as_str(), "Vendor");
    }

    #[test]
    fn test_parse_assignment_missing_separator() {
        assert!(matches!(
            parse_assignment("VendorName"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_assignment_empty_column() {
        assert!(matches!(
            parse_assignment("=Vendor"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_assignment_bad_prefix() {
        assert!(matches!(
            parse_assignment("Vendor Name="),
            Err(Error::InvalidPrefix(_))
        ));
        assert!(matches!(
            parse_assignment("Vendor Name=9th"),
            Err(Error::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("vendor"), "Vendor");
        assert_eq!(normalize_prefix("cost center"), "Cost_Center");
        assert_eq!(normalize_prefix("ACME corp"), "Acme_Corp");
        assert_eq!(normalize_prefix("  Program  "), "Program");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        let long = "a".repeat(35);
        let cut = truncate(&long, 30);
        assert_eq!(cut.chars().count(), 30);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1, 3, 5", 5).unwrap(), vec![0, 2, 4]);
        assert_eq!(parse_selection("2", 3).unwrap(), vec![1]);
        assert_eq!(parse_selection("2,2", 3).unwrap(), vec![1]);
    }

    #[test]
    fn test_parse_selection_rejects_out_of_range() {
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("1, x", 3).is_err());
    }

    #[test]
    fn test_collect_column_reports_uses_pre_transform_counts() {
        use crate::types::{CellValue, Column};

        let table = Table::new(vec![Column::new(
            "Vendor",
            vec![
                CellValue::Text("Acme".to_string()),
                CellValue::Text("Boeing".to_string()),
                CellValue::Text("Acme".to_string()),
                CellValue::Missing,
            ],
        )]);
        let mut assignments = ColumnAssignments::new();
        assignments.assign("Vendor", Prefix::new("Vendor").unwrap());

        let reports = collect_column_reports(&table, &assignments);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].column, "Vendor");
        assert_eq!(reports[0].prefix, "Vendor");
        assert_eq!(reports[0].distinct_values, 2);
    }
}
