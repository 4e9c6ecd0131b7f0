//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Folio using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Folio - Staged bibliographic records to OJS native XML
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
#[command(author = "Folio Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml", env = "FOLIO_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FOLIO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert staged CSV records into native XML import files
    Convert(commands::convert::ConvertArgs),

    /// Validate existing XML files against the import schema
    Check(commands::check::CheckArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from(["folio", "convert"]);
        assert_eq!(cli.config, "folio.toml");
        assert!(matches!(cli.command, Commands::Convert(_)));
    }

    #[test]
    fn test_cli_parse_convert_overrides() {
        let cli = Cli::parse_from([
            "folio",
            "convert",
            "--source",
            "staging",
            "--issues-per-file",
            "5",
            "--user",
            "editor",
            "--no-validate",
        ]);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.source, Some(PathBuf::from("staging")));
                assert_eq!(args.issues_per_file, Some(5));
                assert_eq!(args.user.as_deref(), Some("editor"));
                assert!(args.no_validate);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["folio", "--config", "custom.toml", "convert"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["folio", "--log-level", "debug", "convert"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_check_files() {
        let cli = Cli::parse_from(["folio", "check", "a.xml", "b.xml"]);
        match cli.command {
            Commands::Check(args) => assert_eq!(args.files.len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_check_requires_files() {
        assert!(Cli::try_parse_from(["folio", "check"]).is_err());
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["folio", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["folio", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
