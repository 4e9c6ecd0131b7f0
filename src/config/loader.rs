//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{FolioConfig, IdScheme};
use crate::domain::errors::FolioError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FolioConfig
/// 4. Applies environment variable overrides (FOLIO_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use folio::config::loader::load_config;
///
/// let config = load_config("folio.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FolioConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FolioError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FolioError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: FolioConfig = toml::from_str(&contents)
        .map_err(|e| FolioError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads the configuration file if it exists, otherwise starts from the
/// built-in defaults. Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<FolioConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        config_path = %path.display(),
        "Configuration file not found, using defaults"
    );
    let mut config = FolioConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut FolioConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        FolioError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FolioError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comments may mention ${VARS} without defining them
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FolioError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    value.trim().parse().map_err(|_| {
        FolioError::Configuration(format!("{name} must be 'true' or 'false', got '{value}'"))
    })
}

/// Applies environment variable overrides using FOLIO_* prefix
///
/// Environment variables follow the pattern: FOLIO_<SECTION>_<KEY>
/// For example: FOLIO_PATHS_SOURCE_DIR, FOLIO_EXPORT_ISSUES_PER_FILE
fn apply_env_overrides(config: &mut FolioConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("FOLIO_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Journal overrides
    if let Ok(val) = std::env::var("FOLIO_JOURNAL_PRIMARY_LOCALE") {
        config.journal.primary_locale = val;
    }
    if let Ok(val) = std::env::var("FOLIO_JOURNAL_UPLOADER") {
        config.journal.uploader = val;
    }
    if let Ok(val) = std::env::var("FOLIO_JOURNAL_GENRE_NAME") {
        config.journal.genre_name = val;
    }

    // Path overrides
    if let Ok(val) = std::env::var("FOLIO_PATHS_SOURCE_DIR") {
        config.paths.source_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("FOLIO_PATHS_OUTPUT_DIR") {
        config.paths.output_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("FOLIO_PATHS_ISSUE_COVER_DIR") {
        config.paths.issue_cover_dir = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("FOLIO_PATHS_ARTICLE_COVER_DIR") {
        config.paths.article_cover_dir = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("FOLIO_PATHS_GALLEY_DIR") {
        config.paths.galley_dir = Some(PathBuf::from(val));
    }

    // Export overrides
    if let Ok(val) = std::env::var("FOLIO_EXPORT_ISSUES_PER_FILE") {
        config.export.issues_per_file = val.trim().parse().map_err(|_| {
            FolioError::Configuration(format!(
                "FOLIO_EXPORT_ISSUES_PER_FILE must be a positive integer, got '{val}'"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("FOLIO_EXPORT_ID_SCHEME") {
        config.export.id_scheme = match val.trim().to_lowercase().as_str() {
            "prefixed" => IdScheme::Prefixed,
            "sequential" => IdScheme::Sequential,
            other => {
                return Err(FolioError::Configuration(format!(
                    "FOLIO_EXPORT_ID_SCHEME must be 'prefixed' or 'sequential', got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("FOLIO_EXPORT_EMIT_SECTIONS") {
        config.export.emit_sections = parse_bool("FOLIO_EXPORT_EMIT_SECTIONS", &val)?;
    }
    if let Ok(val) = std::env::var("FOLIO_EXPORT_FILE_PREFIX") {
        config.export.file_prefix = val;
    }

    // Validation overrides
    if let Ok(val) = std::env::var("FOLIO_VALIDATION_ENABLED") {
        config.validation.enabled = parse_bool("FOLIO_VALIDATION_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("FOLIO_VALIDATION_SCHEMA_PATH") {
        config.validation.schema_path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("FOLIO_VALIDATION_XMLLINT_PATH") {
        config.validation.xmllint_path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FOLIO_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("FOLIO_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("FOLIO_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("FOLIO_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
