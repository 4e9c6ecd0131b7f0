//! In-memory record store

use super::traits::RecordStore;
use crate::domain::{IssueKey, IssueRow, Result, SectionRow, StagedRecord};

/// Record store over rows held in memory, in staging order
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<StagedRecord>,
    issues: Vec<IssueRow>,
}

impl MemoryRecordStore {
    pub fn new(records: Vec<StagedRecord>) -> Self {
        let mut issues: Vec<IssueRow> = Vec::new();
        for record in &records {
            let key = record.issue_key();
            if !issues.iter().any(|i| i.key == key) {
                issues.push(IssueRow::from_record(record));
            }
        }
        Self { records, issues }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn records_of<'a>(&'a self, issue: &'a IssueKey) -> impl Iterator<Item = &'a StagedRecord> {
        self.records.iter().filter(move |r| {
            r.issue_title == issue.title && r.volume == issue.volume && r.issue == issue.number
        })
    }
}

impl RecordStore for MemoryRecordStore {
    fn issue_count(&self) -> Result<usize> {
        Ok(self.issues.len())
    }

    fn issues_page(&self, page: usize, per_page: usize) -> Result<Vec<IssueRow>> {
        Ok(self
            .issues
            .iter()
            .skip(page.saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect())
    }

    fn sections(&self, issue: &IssueKey) -> Result<Vec<SectionRow>> {
        let mut sections: Vec<SectionRow> = Vec::new();
        for record in self.records_of(issue) {
            if !sections.iter().any(|s| s.abbrev == record.section_abbrev) {
                sections.push(SectionRow::from_record(record));
            }
        }
        Ok(sections)
    }

    fn articles_by_section(
        &self,
        issue: &IssueKey,
        section_abbrev: &str,
    ) -> Result<Vec<StagedRecord>> {
        Ok(self
            .records_of(issue)
            .filter(|r| r.section_abbrev == section_abbrev)
            .cloned()
            .collect())
    }
}
