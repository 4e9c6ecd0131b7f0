//! Typed document tree
//!
//! The builder turns staged rows into one [`IssueNode`] per issue; the writer
//! serializes it in schema order. Nodes only hold values that will actually
//! be emitted, so the writer never has to decide whether a field is empty.

use crate::domain::ids::ArticleId;
use chrono::NaiveDate;
use serde::Serialize;

/// A text value tagged with the locale it is written in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Localized {
    pub locale: String,
    pub text: String,
}

impl Localized {
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }
}

/// A binary file ready to be embedded inline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedAsset {
    pub file_name: String,
    /// Standard base64 with padding
    pub payload: String,
    /// Size of the original content in bytes
    pub byte_len: u64,
    /// Lower-cased, without the leading dot; empty when the name has none
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverNode {
    pub locale: String,
    pub alt_text: String,
    pub asset: EmbeddedAsset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueIdentification {
    pub volume: Option<u32>,
    pub number: Option<u32>,
    pub year: Option<String>,
    pub titles: Vec<Localized>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueNode {
    pub identification: IssueIdentification,
    pub date_published: Option<NaiveDate>,
    pub cover: Option<CoverNode>,
    pub sections: Vec<SectionNode>,
}

impl IssueNode {
    pub fn article_count(&self) -> usize {
        self.sections.iter().map(|s| s.articles.len()).sum()
    }

    pub fn articles(&self) -> impl Iterator<Item = &ArticleNode> {
        self.sections.iter().flat_map(|s| s.articles.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionNode {
    pub abbrev: String,
    pub titles: Vec<Localized>,
    pub articles: Vec<ArticleNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleNode {
    pub id: ArticleId,
    pub submission_file: Option<SubmissionFileNode>,
    pub publication: PublicationNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionFileNode {
    pub name: Localized,
    pub genre: String,
    pub uploader: String,
    pub asset: EmbeddedAsset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordsNode {
    pub locale: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorNode {
    pub seq: usize,
    pub given_name: Localized,
    pub family_name: Option<Localized>,
    pub affiliation: Option<Localized>,
    pub country: Option<String>,
    /// Required by the schema, written even when empty
    pub email: String,
    pub orcid: Option<String>,
}

impl AuthorNode {
    pub fn is_primary_contact(&self) -> bool {
        self.seq == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleyNode {
    pub locale: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicationNode {
    pub date_published: Option<NaiveDate>,
    pub section_ref: String,
    pub seq: usize,
    pub doi: Option<String>,
    pub titles: Vec<Localized>,
    pub subtitle: Option<Localized>,
    pub abstracts: Vec<Localized>,
    pub license_url: String,
    pub copyright_holder: Localized,
    pub copyright_year: Option<String>,
    pub keywords: Option<KeywordsNode>,
    pub authors: Vec<AuthorNode>,
    pub galley: GalleyNode,
    pub citations: Vec<String>,
    pub issue_identification: IssueIdentification,
    pub pages: String,
    pub cover: Option<CoverNode>,
}
