//! Configuration schema types
//!
//! This module defines the configuration structure for Folio. Every section
//! has defaults, so an empty file (or no file at all) is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Article identifier scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// Issue prefix concatenated with a per-issue counter (10 + 0 -> 100)
    #[default]
    Prefixed,
    /// Monotonic per-file counter starting at 1
    Sequential,
}

impl std::fmt::Display for IdScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdScheme::Prefixed => write!(f, "prefixed"),
            IdScheme::Sequential => write!(f, "sequential"),
        }
    }
}

/// Main Folio configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FolioConfig {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub journal: JournalConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FolioConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.journal.validate()?;
        self.paths.validate()?;
        self.export.validate()?;
        self.validation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Journal-wide settings applied to every emitted document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Locale of every primary localized element
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,

    /// Username recorded as uploader of embedded submission files
    #[serde(default = "default_uploader")]
    pub uploader: String,

    /// Genre name attached to submission files
    #[serde(default = "default_genre_name")]
    pub genre_name: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            primary_locale: default_primary_locale(),
            uploader: default_uploader(),
            genre_name: default_genre_name(),
        }
    }
}

impl JournalConfig {
    fn validate(&self) -> Result<(), String> {
        crate::domain::LocaleCode::new(self.primary_locale.as_str())
            .map_err(|e| format!("journal.primary_locale: {e}"))?;

        if self.uploader.trim().is_empty() {
            return Err("journal.uploader cannot be empty".to_string());
        }
        if self.genre_name.trim().is_empty() {
            return Err("journal.genre_name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the staged CSV files and their asset folders
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory the XML documents are written to (must exist)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Issue cover images; defaults to the source directory itself
    #[serde(default)]
    pub issue_cover_dir: Option<PathBuf>,

    /// Article cover images; defaults to `<source>/issue_cover_images`
    #[serde(default)]
    pub article_cover_dir: Option<PathBuf>,

    /// Galley files; defaults to `<source>/article_galleys`
    #[serde(default)]
    pub galley_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            issue_cover_dir: None,
            article_cover_dir: None,
            galley_dir: None,
        }
    }
}

impl PathsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.source_dir.as_os_str().is_empty() {
            return Err("paths.source_dir cannot be empty".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("paths.output_dir cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn resolved_issue_cover_dir(&self) -> PathBuf {
        self.issue_cover_dir
            .clone()
            .unwrap_or_else(|| self.source_dir.clone())
    }

    pub fn resolved_article_cover_dir(&self) -> PathBuf {
        self.article_cover_dir
            .clone()
            .unwrap_or_else(|| self.source_dir.join("issue_cover_images"))
    }

    pub fn resolved_galley_dir(&self) -> PathBuf {
        self.galley_dir
            .clone()
            .unwrap_or_else(|| self.source_dir.join("article_galleys"))
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Maximum number of issues written to one output file
    #[serde(default = "default_issues_per_file")]
    pub issues_per_file: usize,

    /// Article identifier scheme
    #[serde(default)]
    pub id_scheme: IdScheme,

    /// Emit a `<sections>` block per issue
    #[serde(default)]
    pub emit_sections: bool,

    /// Output file name prefix (`issues` -> `issues_0.xml`)
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            issues_per_file: default_issues_per_file(),
            id_scheme: IdScheme::default(),
            emit_sections: false,
            file_prefix: default_file_prefix(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.issues_per_file == 0 {
            return Err("export.issues_per_file must be >= 1".to_string());
        }

        if self.file_prefix.trim().is_empty() {
            return Err("export.file_prefix cannot be empty".to_string());
        }

        if self
            .file_prefix
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace())
        {
            return Err(format!(
                "export.file_prefix '{}' must not contain path separators or whitespace",
                self.file_prefix
            ));
        }

        Ok(())
    }
}

/// Schema validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Validate every emitted file after writing
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Path to the native XSD; falls back to `<output_dir>/schema_3_5.xsd`
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    /// libxml2 command-line validator
    #[serde(default = "default_xmllint_path")]
    pub xmllint_path: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            schema_path: None,
            xmllint_path: default_xmllint_path(),
        }
    }
}

impl ValidationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.xmllint_path.trim().is_empty() {
            return Err(
                "validation.xmllint_path cannot be empty when validation is enabled".to_string(),
            );
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_uploader() -> String {
    "admin".to_string()
}

fn default_genre_name() -> String {
    "Article Text".to_string()
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("input")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_issues_per_file() -> usize {
    10
}

fn default_file_prefix() -> String {
    "issues".to_string()
}

fn default_true() -> bool {
    true
}

fn default_xmllint_path() -> String {
    "xmllint".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_journal_config_validation() {
        let mut config = JournalConfig::default();
        assert!(config.validate().is_ok());

        config.primary_locale = "".to_string();
        assert!(config.validate().is_err());

        config.primary_locale = "fr_CA".to_string();
        config.uploader = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.issues_per_file = 0;
        assert!(config.validate().is_err());

        config.issues_per_file = 5;
        config.file_prefix = "out/issues".to_string();
        assert!(config.validate().is_err());

        config.file_prefix = "batch".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_paths_resolution_defaults() {
        let paths = PathsConfig {
            source_dir: PathBuf::from("/data/run1"),
            ..Default::default()
        };

        assert_eq!(paths.resolved_issue_cover_dir(), PathBuf::from("/data/run1"));
        assert_eq!(
            paths.resolved_article_cover_dir(),
            PathBuf::from("/data/run1/issue_cover_images")
        );
        assert_eq!(
            paths.resolved_galley_dir(),
            PathBuf::from("/data/run1/article_galleys")
        );
    }

    #[test]
    fn test_paths_resolution_overrides() {
        let paths = PathsConfig {
            source_dir: PathBuf::from("/data/run1"),
            galley_dir: Some(PathBuf::from("/pdfs")),
            ..Default::default()
        };

        assert_eq!(paths.resolved_galley_dir(), PathBuf::from("/pdfs"));
    }

    #[test]
    fn test_validation_config_requires_tool_when_enabled() {
        let mut config = ValidationConfig::default();
        assert!(config.validate().is_ok());

        config.xmllint_path = String::new();
        assert!(config.validate().is_err());

        config.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_invalid_rotation() {
        let config = LoggingConfig {
            local_rotation: "size".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_id_scheme_deserialize() {
        let config: ExportConfig = toml::from_str("id_scheme = \"sequential\"").unwrap();
        assert_eq!(config.id_scheme, IdScheme::Sequential);
        assert_eq!(config.issues_per_file, 10);
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_primary_locale(), "en");
        assert_eq!(default_uploader(), "admin");
        assert_eq!(default_genre_name(), "Article Text");
        assert_eq!(default_issues_per_file(), 10);
        assert_eq!(default_file_prefix(), "issues");
        assert!(FolioConfig::default().validate().is_ok());
    }
}
