//! Domain models and types for Folio.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ArticleId`], [`IssueKey`], [`LocaleCode`])
//! - **Staged rows** ([`StagedRecord`], [`IssueRow`], [`SectionRow`])
//! - **The document tree** ([`IssueNode`] and its children)
//! - **Error types** ([`FolioError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FolioError>`]:
//!
//! ```rust
//! use folio::domain::{FolioError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(FolioError::Export("nothing to do".to_string()))
//! }
//! ```

pub mod document;
pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

pub use document::{
    ArticleNode, AuthorNode, CoverNode, EmbeddedAsset, GalleyNode, IssueIdentification, IssueNode,
    KeywordsNode, Localized, PublicationNode, SectionNode, SubmissionFileNode,
};
pub use errors::FolioError;
pub use ids::{ArticleId, IssueKey, LocaleCode};
pub use record::{IssueRow, SectionRow, StagedRecord};
pub use result::Result;
