// Candidate file discovery and reading

use std::io;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

/// A price-list file picked up from the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// File name as shown in diagnostics and reports.
    pub name: String,
}

/// Regular files in `dir` whose name contains `token` and whose extension is
/// `extension`, sorted by name. Both comparisons are case-sensitive.
pub fn list_candidates(dir: &Path, token: &str, extension: &str) -> Result<Vec<SourceFile>, CatalogError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CatalogError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CatalogError::io(dir, e))?;
        let path = entry.path();
        // Non-UTF-8 names cannot contain the token in a meaningful way
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.contains(token) {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if !path.is_file() {
            continue;
        }
        files.push(SourceFile { path, name });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Read a whole file as UTF-8, dropping a leading byte-order mark.
pub fn read_text(path: &Path) -> Result<String, CatalogError> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        CatalogError::io(path, io::Error::new(io::ErrorKind::InvalidData, e.utf8_error()))
    })?;
    match text.strip_prefix('\u{feff}') {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(text),
    }
}
