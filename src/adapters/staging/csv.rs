//! CSV staging loader
//!
//! Reads every `*.csv` file in the source directory, in file name order,
//! into [`StagedRecord`]s. Column headers follow the staging template
//! (`issueTitle`, `sectionAbbrev`, `articleTitle`, ...); unknown columns are
//! ignored and absent ones default to empty.

use super::memory::MemoryRecordStore;
use crate::domain::{FolioError, Result, StagedRecord};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Lists the CSV files of a directory, sorted by name
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FolioError::MissingInput(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Parses staged rows from any reader
pub fn read_records<R: Read>(reader: R) -> Result<Vec<StagedRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.deserialize::<StagedRecord>() {
        records.push(row?);
    }
    Ok(records)
}

/// Loads all staged rows of a directory
///
/// # Errors
///
/// Fails when the directory is missing, holds no CSV file, or a file is
/// malformed.
pub fn load_directory(dir: &Path) -> Result<Vec<StagedRecord>> {
    let files = discover_csv_files(dir)?;
    if files.is_empty() {
        return Err(FolioError::Staging(format!(
            "no CSV file found in {}",
            dir.display()
        )));
    }

    let mut records = Vec::new();
    for path in &files {
        let file = fs::File::open(path)?;
        let mut rows = read_records(file).map_err(|e| match e {
            FolioError::Staging(msg) => {
                FolioError::Staging(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        tracing::debug!(file = %path.display(), rows = rows.len(), "Staged CSV file");
        records.append(&mut rows);
    }

    tracing::info!(
        files = files.len(),
        rows = records.len(),
        "Staged records loaded"
    );
    Ok(records)
}

/// Convenience: load a directory straight into a [`MemoryRecordStore`]
pub fn load_store(dir: &Path) -> Result<MemoryRecordStore> {
    Ok(MemoryRecordStore::new(load_directory(dir)?))
}
