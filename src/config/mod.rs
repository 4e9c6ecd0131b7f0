//! Configuration management for Folio.
//!
//! Folio uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `FOLIO_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use folio::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("folio.toml")?;
//!
//! println!("Source: {}", config.paths.source_dir.display());
//! println!("Issues per file: {}", config.export.issues_per_file);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`JournalConfig`] - Primary locale, uploader, genre
//! - [`PathsConfig`] - Source, output and asset directories
//! - [`ExportConfig`] - Pagination, ID scheme, file naming
//! - [`ValidationConfig`] - Schema validation
//! - [`LoggingConfig`] - Log file output
//!
//! # Example Configuration
//!
//! ```toml
//! [journal]
//! primary_locale = "en"
//! uploader = "admin"
//!
//! [paths]
//! source_dir = "/srv/staging/spring"
//! output_dir = "/srv/staging/out"
//!
//! [export]
//! issues_per_file = 10
//!
//! [validation]
//! schema_path = "${FOLIO_SCHEMA}"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, ExportConfig, FolioConfig, IdScheme, JournalConfig, LoggingConfig,
    PathsConfig, ValidationConfig,
};
