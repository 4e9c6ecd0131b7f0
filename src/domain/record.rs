//! Staged record models
//!
//! A [`StagedRecord`] is one flat, denormalized row per article as it arrives
//! from the staging CSV. [`IssueRow`] and [`SectionRow`] are the aggregate
//! projections the record store hands to the document builder.

use crate::domain::ids::IssueKey;
use serde::{Deserialize, Serialize};

/// One staged article row
///
/// Every textual column defaults to the empty string; integer columns are
/// `None` when empty or unparsable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagedRecord {
    #[serde(rename = "issueTitle")]
    pub issue_title: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub volume: Option<u32>,
    #[serde(alias = "Issue", deserialize_with = "csv::invalid_option")]
    pub issue: Option<u32>,
    pub year: String,
    #[serde(rename = "datePublished")]
    pub date_published: String,
    #[serde(rename = "sectionTitle")]
    pub section_title: String,
    #[serde(rename = "sectionAbbrev")]
    pub section_abbrev: String,
    #[serde(rename = "articleTitle")]
    pub article_title: String,
    #[serde(rename = "subTitle")]
    pub subtitle: String,
    #[serde(rename = "articleAbstract")]
    pub article_abstract: String,
    #[serde(rename = "DOI")]
    pub doi: String,
    pub keywords: String,
    pub citations: String,
    pub authors: String,
    #[serde(rename = "authorEmail")]
    pub author_email: String,
    #[serde(alias = "affiliation", alias = "authorAffiliation")]
    pub affiliations: String,
    pub orcid: String,
    pub country: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "galleyLabel")]
    pub galley_label: String,
    pub cover_image_filename: String,
    pub cover_image_alt_text: String,
    pub issue_cover_image_filename: String,
    pub issue_cover_image_alt_text: String,
    #[serde(rename = "licenseUrl")]
    pub license_url: String,
    #[serde(rename = "copyrightHolder")]
    pub copyright_holder: String,
    #[serde(rename = "copyrightYear")]
    pub copyright_year: String,
    #[serde(rename = "startPage")]
    pub start_page: String,
    #[serde(rename = "endPage")]
    pub end_page: String,
    pub language: String,
    pub locale_2: String,
    #[serde(rename = "issueTitle_2")]
    pub issue_title_2: String,
    #[serde(rename = "sectionTitle_2")]
    pub section_title_2: String,
    #[serde(rename = "articleTitle_2")]
    pub article_title_2: String,
    #[serde(rename = "articleAbstract_2")]
    pub article_abstract_2: String,
}

impl StagedRecord {
    /// The issue this row belongs to
    pub fn issue_key(&self) -> IssueKey {
        IssueKey::new(self.issue_title.clone(), self.volume, self.issue)
    }

    /// Page range with stray separators removed: `12` + `` gives `12`
    pub fn pages(&self) -> String {
        format!("{}-{}", self.start_page.trim(), self.end_page.trim())
            .trim_matches('-')
            .to_string()
    }
}

/// Issue-level fields, taken from the first staged row of each issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRow {
    pub key: IssueKey,
    pub year: String,
    pub date_published: String,
    pub title_2: String,
    pub locale_2: String,
    pub cover_image_filename: String,
    pub cover_image_alt_text: String,
}

impl IssueRow {
    pub fn from_record(record: &StagedRecord) -> Self {
        Self {
            key: record.issue_key(),
            year: record.year.clone(),
            date_published: record.date_published.clone(),
            title_2: record.issue_title_2.clone(),
            locale_2: record.locale_2.clone(),
            cover_image_filename: record.issue_cover_image_filename.clone(),
            cover_image_alt_text: record.issue_cover_image_alt_text.clone(),
        }
    }
}

/// Distinct section of one issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRow {
    pub abbrev: String,
    pub title: String,
    pub title_2: String,
    pub locale_2: String,
}

impl SectionRow {
    pub fn from_record(record: &StagedRecord) -> Self {
        Self {
            abbrev: record.section_abbrev.clone(),
            title: record.section_title.clone(),
            title_2: record.section_title_2.clone(),
            locale_2: record.locale_2.clone(),
        }
    }
}
