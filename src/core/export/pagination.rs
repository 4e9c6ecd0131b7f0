//! Output file pagination
//!
//! Splits the issue list into fixed-size pages, one output document each.

use crate::domain::{FolioError, Result};
use std::ops::Range;

/// Page layout of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    issue_count: usize,
    per_file: usize,
}

impl PagePlan {
    /// # Errors
    ///
    /// Returns a configuration error when `per_file` is zero.
    pub fn new(issue_count: usize, per_file: usize) -> Result<Self> {
        if per_file == 0 {
            return Err(FolioError::Configuration(
                "issues_per_file must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            issue_count,
            per_file,
        })
    }

    pub fn per_file(&self) -> usize {
        self.per_file
    }

    pub fn file_count(&self) -> usize {
        self.issue_count.div_ceil(self.per_file)
    }

    pub fn is_empty(&self) -> bool {
        self.issue_count == 0
    }

    /// File name of page `page`, zero-padded to the width of the last index
    ///
    /// ```
    /// use folio::core::export::PagePlan;
    ///
    /// let plan = PagePlan::new(250, 10).unwrap();
    /// assert_eq!(plan.file_name("issues", 3), "issues_03.xml");
    /// ```
    pub fn file_name(&self, prefix: &str, page: usize) -> String {
        let last = self.file_count().saturating_sub(1);
        let width = last.to_string().len();
        format!("{prefix}_{page:0width$}.xml")
    }

    pub fn pages(&self) -> Range<usize> {
        0..self.file_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_twenty_five_issues_ten_per_file() {
        let plan = PagePlan::new(25, 10).unwrap();
        assert_eq!(plan.file_count(), 3);
        assert_eq!(plan.pages(), 0..3);
        assert_eq!(plan.per_file(), 10);
    }

    #[test]
    fn test_zero_issues() {
        let plan = PagePlan::new(0, 10).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.file_count(), 0);
    }

    #[test]
    fn test_zero_per_file_rejected() {
        assert!(PagePlan::new(5, 0).is_err());
    }

    #[test_case(5, 10, 0, "issues_0.xml" ; "single file")]
    #[test_case(25, 10, 2, "issues_2.xml" ; "single digit")]
    #[test_case(110, 10, 3, "issues_03.xml" ; "padded to two digits")]
    #[test_case(110, 10, 10, "issues_10.xml" ; "last of eleven")]
    fn test_file_name(count: usize, per_file: usize, page: usize, expected: &str) {
        let plan = PagePlan::new(count, per_file).unwrap();
        assert_eq!(plan.file_name("issues", page), expected);
    }
}
