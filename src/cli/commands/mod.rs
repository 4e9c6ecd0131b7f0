//! CLI command implementations
//!
//! Every command returns its process exit code:
//! 0 success, 2 configuration error, 3 schema validation failure, 5 fatal error.

pub mod check;
pub mod convert;
pub mod init;
pub mod validate;

/// Exit code of a successful run
pub const EXIT_OK: i32 = 0;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code when a document fails schema validation
pub const EXIT_INVALID: i32 = 3;
/// Exit code for any other fatal error
pub const EXIT_FATAL: i32 = 5;
