// Folio - Staged bibliographic records to OJS native XML
// Copyright (c) 2025 Folio Contributors
// Licensed under the MIT License

//! # Folio - staged bibliographic records to OJS native XML
//!
//! Folio reads staged, per-article bibliographic rows (one CSV row per
//! article) and renders them into OJS "native" import documents: a strict,
//! schema-validated XML hierarchy of issues, sections, articles,
//! publications, authors, galleys and embedded files.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Staging** flat article rows from CSV into a queryable record store
//! - **Building** the issue -> section -> article tree with stable internal IDs
//! - **Embedding** cover images and galley files inline as base64
//! - **Paginating** issues across bounded output files
//! - **Validating** every emitted file against the native XSD
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Document building, export orchestration, schema validation
//! - [`adapters`] - Record store implementations (CSV, in-memory)
//! - [`domain`] - Core domain types and the document tree
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use folio::config::load_config;
//! use folio::core::export::ExportCoordinator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("folio.toml")?;
//!     let coordinator = ExportCoordinator::from_config(config)?;
//!     let summary = coordinator.execute_export()?;
//!
//!     println!("Wrote {} files", summary.files.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Folio uses [`domain::FolioError`] for all errors. Missing cover images and
//! galley files are not errors: they are skipped, logged and counted in the
//! [`core::export::ExportSummary`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
