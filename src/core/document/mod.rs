//! Issue document construction and serialization
//!
//! - [`allocator`] - per-file article ID allocation
//! - [`grouping`] - section grouping and publication sequencing
//! - [`builder`] - staged rows to typed [`IssueNode`](crate::domain::IssueNode) trees
//! - [`writer`] - quick-xml serialization in schema order

pub mod allocator;
pub mod builder;
pub mod grouping;
pub mod writer;

pub use allocator::IdAllocator;
pub use builder::{
    parse_publication_date, AssetKind, BuildContext, BuildDiagnostics, BuilderSettings,
    DocumentBuilder, SkippedAsset,
};
pub use grouping::{group_issue, GroupedSection, SequencedArticle};
pub use writer::IssuesXmlWriter;
