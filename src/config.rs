use std::path::{Path, PathBuf};

/// Folder searched for relative input paths that do not resolve directly
pub const INPUT_FOLDER: &str = "sample_data";

/// Folder where clean output files are written
pub const OUTPUT_FOLDER: &str = "output";

/// Name prefix for clean output files
pub const OUTPUT_PREFIX: &str = "CLEAN_";

/// Resolve a user-supplied input path. A relative path that does not exist is
/// also tried inside the sample data folder before giving up.
pub fn resolve_input_path(raw: &Path) -> PathBuf {
    if !raw.is_absolute() && !raw.exists() {
        let fallback = Path::new(INPUT_FOLDER).join(raw);
        if fallback.exists() {
            return fallback;
        }
    }
    raw.to_path_buf()
}

/// Default destination for the clean copy of an input file
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("report");
    Path::new(OUTPUT_FOLDER).join(format!("{}{}", OUTPUT_PREFIX, name))
}
