//! Record store abstraction
//!
//! The document builder only sees staged data through these aggregation
//! queries, so the backing store can be anything that answers them.

use crate::domain::{IssueKey, IssueRow, Result, SectionRow, StagedRecord};

/// Query interface over staged article rows
///
/// Ordering contract: issues come back in a stable order across pages;
/// sections and articles come back in first-seen (staging) order.
pub trait RecordStore {
    /// Number of distinct issues
    fn issue_count(&self) -> Result<usize>;

    /// One page of issues (`page` is zero-based)
    fn issues_page(&self, page: usize, per_page: usize) -> Result<Vec<IssueRow>>;

    /// Distinct sections of an issue
    fn sections(&self, issue: &IssueKey) -> Result<Vec<SectionRow>>;

    /// Articles of one section of an issue
    fn articles_by_section(&self, issue: &IssueKey, section_abbrev: &str)
        -> Result<Vec<StagedRecord>>;
}
