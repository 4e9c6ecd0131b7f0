//! Article identifier allocation
//!
//! IDs are scoped to one output file. The allocator is created per file and
//! remembers every ID it handed out, so a duplicate is reported instead of
//! silently producing a document with clashing references.

use crate::config::IdScheme;
use crate::domain::{ArticleId, FolioError, Result};
use std::collections::HashSet;

/// Per-file identifier allocator
#[derive(Debug, Clone)]
pub struct IdAllocator {
    scheme: IdScheme,
    issued: HashSet<u64>,
    /// Position of the current issue within the file
    issue_index: Option<usize>,
    /// Article counter within the current issue
    article_index: u64,
    next_sequential: u64,
}

impl IdAllocator {
    pub fn new(scheme: IdScheme) -> Self {
        Self {
            scheme,
            issued: HashSet::new(),
            issue_index: None,
            article_index: 0,
            next_sequential: 1,
        }
    }

    /// Starts the next issue of the file and returns its position
    pub fn begin_issue(&mut self) -> usize {
        let next = self.issue_index.map_or(0, |i| i + 1);
        self.issue_index = Some(next);
        self.article_index = 0;
        next
    }

    /// Prefix of the current issue under the prefixed scheme: 10, 20, 30...
    pub fn issue_prefix(&self) -> Option<u64> {
        self.issue_index.map(|k| 10 + 10 * k as u64)
    }

    /// Allocates the ID of the next article of the current issue
    ///
    /// # Errors
    ///
    /// Fails when no issue was started or the ID was already issued in this
    /// file.
    pub fn next_article(&mut self) -> Result<ArticleId> {
        let prefix = self.issue_prefix().ok_or_else(|| {
            FolioError::Export("article ID requested before any issue was started".to_string())
        })?;

        let id = match self.scheme {
            IdScheme::Prefixed => format!("{}{}", prefix, self.article_index)
                .parse::<u64>()
                .map_err(|e| FolioError::Export(format!("article ID overflow: {e}")))?,
            IdScheme::Sequential => self.next_sequential,
        };

        if !self.issued.insert(id) {
            return Err(FolioError::IdCollision {
                id,
                context: format!(
                    "issue position {}, article {}; use export.id_scheme = \"sequential\"",
                    self.issue_index.unwrap_or(0),
                    self.article_index
                ),
            });
        }

        self.article_index += 1;
        self.next_sequential += 1;
        Ok(ArticleId::new(id))
    }

    /// Number of IDs handed out in this file
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(alloc: &mut IdAllocator, n: usize) -> Vec<u64> {
        (0..n).map(|_| alloc.next_article().unwrap().value()).collect()
    }

    #[test]
    fn test_prefixed_first_issue() {
        let mut alloc = IdAllocator::new(IdScheme::Prefixed);
        assert_eq!(alloc.begin_issue(), 0);
        assert_eq!(ids(&mut alloc, 3), vec![100, 101, 102]);
    }

    #[test]
    fn test_prefixed_counter_resets_per_issue() {
        let mut alloc = IdAllocator::new(IdScheme::Prefixed);
        alloc.begin_issue();
        ids(&mut alloc, 8);
        assert_eq!(alloc.begin_issue(), 1);
        assert_eq!(alloc.issue_prefix(), Some(20));
        assert_eq!(ids(&mut alloc, 2), vec![200, 201]);
    }

    #[test]
    fn test_prefixed_seventh_article() {
        let mut alloc = IdAllocator::new(IdScheme::Prefixed);
        alloc.begin_issue();
        assert_eq!(ids(&mut alloc, 8)[7], 107);
    }

    #[test]
    fn test_prefixed_collision_detected() {
        // prefix 10 + counter 100 and prefix 1010 + counter 0 both read 10100
        let mut alloc = IdAllocator::new(IdScheme::Prefixed);
        alloc.begin_issue();
        ids(&mut alloc, 101);
        for _ in 0..100 {
            alloc.begin_issue();
        }
        assert_eq!(alloc.issue_prefix(), Some(1010));
        let err = alloc.next_article().unwrap_err();
        assert!(matches!(err, FolioError::IdCollision { id: 10100, .. }));
    }

    #[test]
    fn test_sequential_is_monotonic_across_issues() {
        let mut alloc = IdAllocator::new(IdScheme::Sequential);
        alloc.begin_issue();
        assert_eq!(ids(&mut alloc, 2), vec![1, 2]);
        alloc.begin_issue();
        assert_eq!(ids(&mut alloc, 2), vec![3, 4]);
        assert_eq!(alloc.issued_count(), 4);
    }

    #[test]
    fn test_next_article_without_issue_fails() {
        let mut alloc = IdAllocator::new(IdScheme::Prefixed);
        assert!(alloc.next_article().is_err());
    }
}
