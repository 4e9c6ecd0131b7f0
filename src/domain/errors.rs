//! Domain error types
//!
//! All errors are domain-specific; third-party error types (csv, quick-xml,
//! toml, io) are converted at the boundary and never exposed.

use std::path::PathBuf;
use thiserror::Error;

/// Main Folio error type
#[derive(Debug, Error)]
pub enum FolioError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required input file or directory is absent
    #[error("Missing input: {}", .0.display())]
    MissingInput(PathBuf),

    /// Staged records could not be read
    #[error("Staging error: {0}")]
    Staging(String),

    /// Two articles in one output file would share an internal ID
    #[error("Identifier collision: {id} already issued in this file ({context})")]
    IdCollision { id: u64, context: String },

    /// XML serialization failures
    #[error("XML error: {0}")]
    Xml(String),

    /// The schema file cannot be found or the validator cannot run
    #[error("Schema error: {0}")]
    Schema(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization errors (run summaries)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        FolioError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        FolioError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for FolioError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => FolioError::Staging(format!("line {}: {err}", pos.line())),
            None => FolioError::Staging(err.to_string()),
        }
    }
}
