use crate::types::{Result, RunReport};
use std::io::Write;
use std::path::Path;

/// Write run report to JSON file
pub fn write_json_file(report: &RunReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Write run report to JSON string
pub fn to_json_string(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write run report to stdout
pub fn write_json_stdout(report: &RunReport) -> Result<()> {
    let json = to_json_string(report)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json)?;
    Ok(())
}
