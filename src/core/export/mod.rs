//! Conversion orchestration
//!
//! - [`pagination`] - issues split into fixed-size output documents
//! - [`coordinator`] - the conversion run from staged CSV to validated files
//! - [`summary`] - run summary and JSON report

pub mod coordinator;
pub mod pagination;
pub mod summary;

pub use coordinator::{ExportCoordinator, LAST_FILE_MARKER};
pub use pagination::PagePlan;
pub use summary::{ExportSummary, WrittenFile};
