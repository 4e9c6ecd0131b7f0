//! Schema validation of written documents
//!
//! Every output file is checked against the native import XSD after the run;
//! `check` reuses the same path for files written earlier.

pub mod report;
pub mod validator;

pub use report::{FileValidation, ValidationDiagnostic, ValidationReport};
pub use validator::{
    parse_diagnostics, resolve_schema_path, validate_files, SchemaOutcome, SchemaValidator,
    XmllintValidator, DEFAULT_SCHEMA_FILE,
};
