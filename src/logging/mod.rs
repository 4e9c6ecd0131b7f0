//! Logging and observability
//!
//! Structured logging on top of `tracing`, with:
//! - Configurable log levels (overridable through `RUST_LOG`)
//! - Optional JSON log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use folio::logging::init_logging;
//! use folio::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Conversion started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a successfully converted issue
///
/// # Example
///
/// ```no_run
/// use folio::log_issue_converted;
/// use folio::domain::IssueKey;
///
/// let key = IssueKey::new("Spring", Some(2), Some(1));
/// log_issue_converted!(&key, 12);
/// ```
#[macro_export]
macro_rules! log_issue_converted {
    ($issue_key:expr, $articles:expr) => {
        tracing::info!(
            issue = %$issue_key,
            articles = $articles,
            "Issue successfully converted"
        );
    };
}

/// Log an asset that could not be embedded
///
/// # Example
///
/// ```no_run
/// use folio::log_asset_skipped;
///
/// log_asset_skipped!("issue cover", "/data/cover.jpg", "file not found");
/// ```
#[macro_export]
macro_rules! log_asset_skipped {
    ($kind:expr, $path:expr, $reason:expr) => {
        tracing::warn!(
            kind = $kind,
            path = %$path,
            reason = %$reason,
            "Asset skipped"
        );
    };
}
