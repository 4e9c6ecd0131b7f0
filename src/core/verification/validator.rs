//! Schema validation of emitted documents
//!
//! Validation shells out to `xmllint --noout --schema`. The validator sits
//! behind [`SchemaValidator`] so the export coordinator can be driven with a
//! stub in tests.

use super::report::{ValidationDiagnostic, ValidationReport};
use crate::config::FolioConfig;
use crate::domain::{FolioError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

/// File name looked up in the output directory when nothing else is set
pub const DEFAULT_SCHEMA_FILE: &str = "schema_3_5.xsd";

/// xmllint exit status for a document that does not conform
const XMLLINT_INVALID: i32 = 3;

/// Validation outcome of a single document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOutcome {
    Valid,
    Invalid(Vec<ValidationDiagnostic>),
}

/// Validates one XML document against an XSD
pub trait SchemaValidator {
    /// # Errors
    ///
    /// Returns `FolioError::Schema` when the validator itself cannot run or
    /// the schema cannot be loaded. A non-conforming document is not an
    /// error; it is reported as [`SchemaOutcome::Invalid`].
    fn validate(&self, document: &Path, schema: &Path) -> Result<SchemaOutcome>;
}

/// Runs the `xmllint` binary
#[derive(Debug, Clone)]
pub struct XmllintValidator {
    program: PathBuf,
}

impl XmllintValidator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &FolioConfig) -> Self {
        Self::new(&config.validation.xmllint_path)
    }
}

impl SchemaValidator for XmllintValidator {
    fn validate(&self, document: &Path, schema: &Path) -> Result<SchemaOutcome> {
        let output = Command::new(&self.program)
            .arg("--noout")
            .arg("--schema")
            .arg(schema)
            .arg(document)
            .output()
            .map_err(|e| {
                FolioError::Schema(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.success() {
            return Ok(SchemaOutcome::Valid);
        }

        match output.status.code() {
            Some(XMLLINT_INVALID) => Ok(SchemaOutcome::Invalid(parse_diagnostics(
                document, &stderr,
            ))),
            code => Err(FolioError::Schema(format!(
                "{} exited with {}: {}",
                self.program.display(),
                code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")),
                stderr.trim()
            ))),
        }
    }
}

/// Extracts `file:line: message` diagnostics from validator output
///
/// Lines without a line number (such as the trailing "fails to validate")
/// are ignored; when nothing matches, the whole output becomes a single
/// diagnostic so the failure is never silent.
pub fn parse_diagnostics(document: &Path, output: &str) -> Vec<ValidationDiagnostic> {
    let pattern = match Regex::new(r"^(?P<file>.+?):(?P<line>\d+): (?P<message>.+)$") {
        Ok(pattern) => pattern,
        Err(_) => return vec![fallback_diagnostic(document, output)],
    };

    let diagnostics: Vec<ValidationDiagnostic> = output
        .lines()
        .filter_map(|line| pattern.captures(line.trim_end()))
        .map(|caps| ValidationDiagnostic {
            file: PathBuf::from(&caps["file"]),
            line: caps["line"].parse().ok(),
            message: caps["message"].trim().to_string(),
        })
        .collect();

    if diagnostics.is_empty() {
        vec![fallback_diagnostic(document, output)]
    } else {
        diagnostics
    }
}

fn fallback_diagnostic(document: &Path, output: &str) -> ValidationDiagnostic {
    let message = output.trim();
    ValidationDiagnostic {
        file: document.to_path_buf(),
        line: None,
        message: if message.is_empty() {
            "document fails to validate".to_string()
        } else {
            message.to_string()
        },
    }
}

/// Locates the schema file
///
/// Order: explicit path, `validation.schema_path`, then
/// `<output_dir>/schema_3_5.xsd`. Relative candidates are tried as given and
/// then against the source directory.
///
/// # Errors
///
/// Returns `FolioError::Schema` listing every path tried when none exists.
pub fn resolve_schema_path(explicit: Option<&Path>, config: &FolioConfig) -> Result<PathBuf> {
    let default = config.paths.output_dir.join(DEFAULT_SCHEMA_FILE);
    let candidates = [explicit, config.validation.schema_path.as_deref(), Some(default.as_path())];

    let mut tried = Vec::new();
    for candidate in candidates.into_iter().flatten() {
        let mut paths = vec![candidate.to_path_buf()];
        if candidate.is_relative() {
            paths.push(config.paths.source_dir.join(candidate));
        }
        for path in paths {
            if path.is_file() {
                tracing::debug!(schema = %path.display(), "Using schema");
                return Ok(path);
            }
            tried.push(path.display().to_string());
        }
    }

    Err(FolioError::Schema(format!(
        "schema file not found (tried: {})",
        tried.join(", ")
    )))
}

/// Validates every file and collects the results
///
/// Stops at the first file the validator cannot process; non-conforming
/// files are recorded and validation continues.
pub fn validate_files<V>(
    validator: &V,
    files: &[PathBuf],
    schema: &Path,
) -> Result<ValidationReport>
where
    V: SchemaValidator + ?Sized,
{
    let started = Instant::now();
    let mut report = ValidationReport::new(schema);

    for file in files {
        match validator.validate(file, schema)? {
            SchemaOutcome::Valid => {
                tracing::info!(file = %file.display(), "Document validates");
                report.record_pass(file);
            }
            SchemaOutcome::Invalid(diagnostics) => {
                for diagnostic in &diagnostics {
                    tracing::error!(
                        file = %diagnostic.file.display(),
                        line = ?diagnostic.line,
                        message = %diagnostic.message,
                        "Schema violation"
                    );
                }
                report.record_failure(file, diagnostics);
            }
        }
    }

    report.set_duration(started.elapsed().as_millis() as u64);
    Ok(report)
}
