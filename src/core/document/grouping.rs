//! Section grouping
//!
//! Rebuilds the section layer of one issue from the record store: sections in
//! first-seen order, each with its articles in staging order, and a
//! publication sequence number running across the whole issue.

use crate::adapters::staging::RecordStore;
use crate::domain::{IssueKey, Result, SectionRow, StagedRecord};

/// An article with its position within the issue
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedArticle {
    pub seq: usize,
    pub record: StagedRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSection {
    pub section: SectionRow,
    pub articles: Vec<SequencedArticle>,
}

/// Groups the articles of one issue under its sections
///
/// Duplicate abbreviations from the store are collapsed to their first
/// occurrence; the list is rebuilt for every issue.
pub fn group_issue<S>(store: &S, issue: &IssueKey) -> Result<Vec<GroupedSection>>
where
    S: RecordStore + ?Sized,
{
    let mut seen: Vec<String> = Vec::new();
    let mut grouped = Vec::new();
    let mut seq = 0usize;

    for section in store.sections(issue)? {
        if seen.contains(&section.abbrev) {
            continue;
        }
        seen.push(section.abbrev.clone());

        let articles = store
            .articles_by_section(issue, &section.abbrev)?
            .into_iter()
            .map(|record| {
                let article = SequencedArticle { seq, record };
                seq += 1;
                article
            })
            .collect();

        grouped.push(GroupedSection { section, articles });
    }

    Ok(grouped)
}
