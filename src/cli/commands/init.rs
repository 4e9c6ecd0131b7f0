//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "folio.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Folio configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your journal settings", self.output);
                println!("  2. Place the staging CSV files in the source directory");
                println!("  3. Put galleys in <source>/article_galleys");
                println!("     and article covers in <source>/issue_cover_images");
                println!("  4. Copy the OJS native schema to <output>/schema_3_5.xsd");
                println!("  5. Validate configuration: folio validate-config");
                println!("  6. Run the conversion: folio convert");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Folio Configuration File
# Staged bibliographic records to OJS native XML

[application]
log_level = "info"

[journal]
primary_locale = "en"
uploader = "admin"
genre_name = "Article Text"

[paths]
source_dir = "input"
output_dir = "output"

[export]
issues_per_file = 10
id_scheme = "prefixed"
emit_sections = false
file_prefix = "issues"

[validation]
enabled = true
xmllint_path = "xmllint"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Folio Configuration File
# Staged bibliographic records to OJS native XML
#
# Every value can be overridden with an environment variable named
# FOLIO_<SECTION>_<KEY>, e.g. FOLIO_EXPORT_ISSUES_PER_FILE=5.
# Values may reference the environment with ${VAR}.

[application]
# trace | debug | info | warn | error (RUST_LOG takes precedence)
log_level = "info"

[journal]
# Locale of every primary-language element
primary_locale = "en"
# Username recorded as uploader of every submission file
uploader = "admin"
# Genre assigned to galley files; must exist in the target journal
genre_name = "Article Text"

[paths]
# Holds the CSV files plus the covers and galleys they reference
source_dir = "input"
# Must exist before the run; receives issues_<n>.xml
output_dir = "output"
# Defaults: issue covers in source_dir, article covers in
# source_dir/issue_cover_images, galleys in source_dir/article_galleys
# issue_cover_dir = "input"
# article_cover_dir = "input/issue_cover_images"
# galley_dir = "input/article_galleys"

[export]
# Issues written to each output file
issues_per_file = 10
# prefixed: 10-prefixed per issue (100, 101, ... 200, ...)
# sequential: 1, 2, 3, ... across the whole file
id_scheme = "prefixed"
# Write the <sections> block for each issue
emit_sections = false
# Output files are named <file_prefix>_<n>.xml
file_prefix = "issues"

[validation]
# Validate every written file with xmllint
enabled = true
# Defaults to <output_dir>/schema_3_5.xsd
# schema_path = "schema/native.xsd"
xmllint_path = "xmllint"

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FolioConfig, IdScheme};
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "folio.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "folio.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config: FolioConfig = toml::from_str(&InitArgs::generate_minimal_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.export.issues_per_file, 10);
        assert_eq!(config.export.id_scheme, IdScheme::Prefixed);
    }

    #[test]
    fn test_generate_config_with_examples() {
        let content = InitArgs::generate_config_with_examples();
        assert!(content.contains("FOLIO_<SECTION>_<KEY>"));
        let config: FolioConfig = toml::from_str(&content).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.validation.schema_path.is_none());
    }

    #[test]
    fn test_existing_file_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, "keep").unwrap();

        let args = InitArgs {
            output: path.to_str().unwrap().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), EXIT_CONFIG);
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().unwrap(), EXIT_OK);
        assert!(fs::read_to_string(&path).unwrap().contains("[journal]"));
    }
}
