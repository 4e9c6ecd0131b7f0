//! Core conversion logic for Folio.
//!
//! # Modules
//!
//! - [`tokens`] - keyword, citation and author list parsing
//! - [`locale`] - primary/secondary locale resolution
//! - [`assets`] - base64 embedding of covers and galleys
//! - [`document`] - ID allocation, issue trees and XML serialization
//! - [`export`] - pagination and run coordination
//! - [`verification`] - schema validation of written documents
//!
//! # Conversion Workflow
//!
//! 1. **Load**: Read the staged CSV rows into a record store
//! 2. **Paginate**: Split the issues into pages of `issues_per_file`
//! 3. **Build**: Turn each issue into a typed tree, allocating article IDs
//! 4. **Write**: Serialize each page into one `<issues>` document
//! 5. **Validate** (optional): Check every document against the XSD
//! 6. **Report**: Generate the run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use folio::config::load_config;
//! use folio::core::export::ExportCoordinator;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("folio.toml")?;
//! let coordinator = ExportCoordinator::from_config(config)?;
//! let summary = coordinator.execute_export()?;
//!
//! println!("Files: {}", summary.files.len());
//! println!("Articles: {}", summary.total_articles);
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod document;
pub mod export;
pub mod locale;
pub mod tokens;
pub mod verification;
