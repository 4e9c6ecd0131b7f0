//! Schema validation report structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One diagnostic reported by the validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDiagnostic {
    pub file: PathBuf,
    /// Line in the document, when the validator reported one
    pub line: Option<u32>,
    pub message: String,
}

impl std::fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file.display(), line, self.message),
            None => write!(f, "{}: {}", self.file.display(), self.message),
        }
    }
}

/// Outcome of validating one output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileValidation {
    pub file: PathBuf,
    pub valid: bool,
    pub error_count: usize,
}

/// Validation results of a set of files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// When validation was performed
    pub validated_at: DateTime<Utc>,

    /// Schema the files were checked against
    pub schema: PathBuf,

    pub files: Vec<FileValidation>,

    pub diagnostics: Vec<ValidationDiagnostic>,

    /// Duration of validation in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    pub fn new(schema: impl Into<PathBuf>) -> Self {
        Self {
            validated_at: Utc::now(),
            schema: schema.into(),
            files: Vec::new(),
            diagnostics: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Record a file that conforms to the schema
    pub fn record_pass(&mut self, file: impl Into<PathBuf>) {
        self.files.push(FileValidation {
            file: file.into(),
            valid: true,
            error_count: 0,
        });
    }

    /// Record a file that does not conform, with its diagnostics
    pub fn record_failure(
        &mut self,
        file: impl Into<PathBuf>,
        diagnostics: Vec<ValidationDiagnostic>,
    ) {
        self.files.push(FileValidation {
            file: file.into(),
            valid: false,
            error_count: diagnostics.len().max(1),
        });
        self.diagnostics.extend(diagnostics);
    }

    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    pub fn passed(&self) -> usize {
        self.files.iter().filter(|f| f.valid).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.passed()
    }

    /// Check if every file passed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("📊 Validation Report\n");
        summary.push_str(&format!("  Schema: {}\n", self.schema.display()));
        summary.push_str(&format!("  Validated at: {}\n", self.validated_at));
        summary.push_str(&format!("  Duration: {} ms\n", self.duration_ms));
        summary.push_str(&format!("  Files: {}\n", self.files.len()));
        summary.push_str(&format!("  ✅ Valid: {}\n", self.passed()));
        summary.push_str(&format!("  ❌ Invalid: {}\n", self.failed()));

        if !self.diagnostics.is_empty() {
            summary.push_str("\n❌ Diagnostics:\n");
            for diagnostic in &self.diagnostics {
                summary.push_str(&format!("  {diagnostic}\n"));
            }
        }

        summary
    }
}
