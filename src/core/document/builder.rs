//! Document builder
//!
//! Turns the staged rows of one issue into an [`IssueNode`] tree. All
//! decisions about what gets emitted (optional elements, locale variants,
//! asset skips) are made here; the writer only serializes.

use super::allocator::IdAllocator;
use super::grouping::{group_issue, GroupedSection, SequencedArticle};
use crate::adapters::staging::RecordStore;
use crate::config::{FolioConfig, IdScheme};
use crate::core::assets::{file_extension, AssetEmbedder, AssetResolution};
use crate::core::locale::{LocaleResolution, LocaleResolver};
use crate::core::tokens::{self, AuthorColumns};
use crate::domain::{
    ArticleNode, AuthorNode, CoverNode, EmbeddedAsset, GalleyNode, IssueIdentification, IssueNode,
    IssueRow, KeywordsNode, Localized, PublicationNode, Result, SectionNode, StagedRecord,
    SubmissionFileNode,
};
use crate::log_asset_skipped;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::path::PathBuf;

/// Kind of asset a skip refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    IssueCover,
    ArticleCover,
    Galley,
}

impl AssetKind {
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::IssueCover => "issue cover",
            AssetKind::ArticleCover => "article cover",
            AssetKind::Galley => "galley",
        }
    }
}

/// An asset that was requested but could not be embedded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedAsset {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub reason: String,
    pub issue: String,
}

/// Soft problems found while building
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildDiagnostics {
    pub skipped_assets: Vec<SkippedAsset>,
    pub locale_warnings: usize,
    pub date_warnings: usize,
    pub articles_without_authors: usize,
}

impl BuildDiagnostics {
    pub fn merge(&mut self, other: BuildDiagnostics) {
        self.skipped_assets.extend(other.skipped_assets);
        self.locale_warnings += other.locale_warnings;
        self.date_warnings += other.date_warnings;
        self.articles_without_authors += other.articles_without_authors;
    }
}

/// Mutable state of one output file
///
/// Created fresh for every file; nothing in it survives into the next one.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub allocator: IdAllocator,
    pub diagnostics: BuildDiagnostics,
}

impl BuildContext {
    pub fn new(scheme: IdScheme) -> Self {
        Self {
            allocator: IdAllocator::new(scheme),
            diagnostics: BuildDiagnostics::default(),
        }
    }
}

/// Journal-wide values stamped on every document
#[derive(Debug, Clone)]
pub struct BuilderSettings {
    pub primary_locale: String,
    pub uploader: String,
    pub genre_name: String,
    pub issue_cover_dir: PathBuf,
    pub article_cover_dir: PathBuf,
    pub galley_dir: PathBuf,
}

impl BuilderSettings {
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            primary_locale: config.journal.primary_locale.clone(),
            uploader: config.journal.uploader.clone(),
            genre_name: config.journal.genre_name.clone(),
            issue_cover_dir: config.paths.resolved_issue_cover_dir(),
            article_cover_dir: config.paths.resolved_article_cover_dir(),
            galley_dir: config.paths.resolved_galley_dir(),
        }
    }
}

/// Builds issue trees from a record store
pub struct DocumentBuilder<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    locales: LocaleResolver,
    uploader: String,
    genre_name: String,
    issue_covers: AssetEmbedder,
    article_covers: AssetEmbedder,
    galleys: AssetEmbedder,
}

impl<'a, S: RecordStore + ?Sized> DocumentBuilder<'a, S> {
    pub fn new(store: &'a S, settings: BuilderSettings) -> Self {
        Self {
            store,
            locales: LocaleResolver::new(settings.primary_locale),
            uploader: settings.uploader,
            genre_name: settings.genre_name,
            issue_covers: AssetEmbedder::new(settings.issue_cover_dir),
            article_covers: AssetEmbedder::new(settings.article_cover_dir),
            galleys: AssetEmbedder::new(settings.galley_dir),
        }
    }

    pub fn store(&self) -> &S {
        self.store
    }

    /// Builds the tree of one issue, allocating its article IDs from `ctx`
    pub fn build_issue(&self, issue: &IssueRow, ctx: &mut BuildContext) -> Result<IssueNode> {
        let label = issue.key.to_string();
        ctx.allocator.begin_issue();

        let titles = self.resolve(
            &issue.key.title,
            &issue.title_2,
            &issue.locale_2,
            "issueTitle",
            &label,
            ctx,
        );

        let identification = IssueIdentification {
            volume: issue.key.volume,
            number: issue.key.number,
            year: Some(issue.year.trim().to_string()),
            titles,
        };

        let date_published = self.publication_date(&issue.date_published, &label, ctx);

        let cover = self
            .embed(
                &self.issue_covers,
                AssetKind::IssueCover,
                &issue.cover_image_filename,
                &label,
                ctx,
            )
            .map(|asset| CoverNode {
                locale: self.locales.primary().to_string(),
                alt_text: issue.cover_image_alt_text.trim().to_string(),
                asset,
            });

        let mut sections = Vec::new();
        for grouped in group_issue(self.store, &issue.key)? {
            sections.push(self.build_section(grouped, &label, ctx)?);
        }

        Ok(IssueNode {
            identification,
            date_published,
            cover,
            sections,
        })
    }

    fn build_section(
        &self,
        grouped: GroupedSection,
        label: &str,
        ctx: &mut BuildContext,
    ) -> Result<SectionNode> {
        let GroupedSection { section, articles } = grouped;
        let titles = self.resolve(
            &section.title,
            &section.title_2,
            &section.locale_2,
            "sectionTitle",
            label,
            ctx,
        );

        let mut nodes = Vec::with_capacity(articles.len());
        for article in articles {
            nodes.push(self.build_article(article, label, ctx)?);
        }

        Ok(SectionNode {
            abbrev: section.abbrev,
            titles,
            articles: nodes,
        })
    }

    fn build_article(
        &self,
        article: SequencedArticle,
        label: &str,
        ctx: &mut BuildContext,
    ) -> Result<ArticleNode> {
        let SequencedArticle { seq, record } = article;
        let id = ctx.allocator.next_article()?;
        tracing::debug!(article_id = %id, seq, title = %record.article_title, "Building article");

        let submission_file = self
            .embed(&self.galleys, AssetKind::Galley, &record.file_name, label, ctx)
            .map(|asset| SubmissionFileNode {
                name: self.locales.localize(&record.file_name),
                genre: self.genre_name.clone(),
                uploader: self.uploader.clone(),
                asset,
            });

        if submission_file.is_none() && !record.file_name.trim().is_empty() {
            tracing::warn!(
                article_id = %id,
                file = %record.file_name,
                "Galley references a submission file that was not embedded"
            );
        }

        let publication = self.build_publication(&record, seq, label, ctx);

        Ok(ArticleNode {
            id,
            submission_file,
            publication,
        })
    }

    fn build_publication(
        &self,
        record: &StagedRecord,
        seq: usize,
        label: &str,
        ctx: &mut BuildContext,
    ) -> PublicationNode {
        let primary = self.locales.primary().to_string();

        let titles = self.resolve(
            &record.article_title,
            &record.article_title_2,
            &record.locale_2,
            "articleTitle",
            label,
            ctx,
        );
        let abstracts = self.resolve(
            &record.article_abstract,
            &record.article_abstract_2,
            &record.locale_2,
            "articleAbstract",
            label,
            ctx,
        );

        let keywords = (!record.keywords.trim().is_empty()).then(|| KeywordsNode {
            locale: primary.clone(),
            keywords: tokens::keywords(&record.keywords)
                .map(str::to_string)
                .collect(),
        });

        let authors = self.build_authors(record);
        if authors.is_empty() {
            ctx.diagnostics.articles_without_authors += 1;
            tracing::warn!(issue = %label, title = %record.article_title, "Article has no authors");
        }

        let galley_name = match record.galley_label.trim() {
            "" => file_extension(&record.file_name).to_uppercase(),
            custom => custom.to_string(),
        };

        let cover = self
            .embed(
                &self.article_covers,
                AssetKind::ArticleCover,
                &record.cover_image_filename,
                label,
                ctx,
            )
            .map(|asset| CoverNode {
                locale: primary.clone(),
                alt_text: record.cover_image_alt_text.trim().to_string(),
                asset,
            });

        PublicationNode {
            date_published: self.publication_date(&record.date_published, label, ctx),
            section_ref: record.section_abbrev.clone(),
            seq,
            doi: non_empty(&record.doi),
            titles,
            subtitle: non_empty(&record.subtitle).map(|s| Localized::new(primary.as_str(), s)),
            abstracts,
            license_url: record.license_url.trim().to_string(),
            copyright_holder: self.locales.localize(&record.copyright_holder),
            copyright_year: non_empty(&record.copyright_year),
            keywords,
            authors,
            galley: GalleyNode {
                locale: primary.clone(),
                name: galley_name,
            },
            citations: tokens::citations(&record.citations)
                .map(str::to_string)
                .collect(),
            issue_identification: IssueIdentification {
                volume: record.volume,
                number: record.issue,
                year: non_empty(&record.year),
                titles: vec![self.locales.localize(&record.issue_title)],
            },
            pages: record.pages(),
            cover,
        }
    }

    fn build_authors(&self, record: &StagedRecord) -> Vec<AuthorNode> {
        let parsed = tokens::parse_authors(AuthorColumns {
            names: &record.authors,
            emails: &record.author_email,
            affiliations: &record.affiliations,
            orcids: &record.orcid,
            countries: &record.country,
        });

        parsed
            .into_iter()
            .enumerate()
            .map(|(seq, author)| AuthorNode {
                seq,
                given_name: self.locales.localize(author.given_name),
                family_name: non_empty(author.family_name).map(|f| self.locales.localize(&f)),
                affiliation: non_empty(author.affiliation).map(|a| self.locales.localize(&a)),
                country: non_empty(author.country),
                email: author.email.to_string(),
                orcid: non_empty(author.orcid),
            })
            .collect()
    }

    fn resolve(
        &self,
        primary: &str,
        secondary: &str,
        secondary_locale: &str,
        field: &'static str,
        label: &str,
        ctx: &mut BuildContext,
    ) -> Vec<Localized> {
        let LocaleResolution {
            values,
            inconsistent,
        } = self.locales.resolve(primary, secondary, secondary_locale);
        if inconsistent {
            ctx.diagnostics.locale_warnings += 1;
            tracing::warn!(
                issue = %label,
                field,
                "Secondary-language value without locale_2, variant omitted"
            );
        }
        values
    }

    fn publication_date(
        &self,
        raw: &str,
        label: &str,
        ctx: &mut BuildContext,
    ) -> Option<NaiveDate> {
        let parsed = parse_publication_date(raw);
        if parsed.is_none() {
            ctx.diagnostics.date_warnings += 1;
            tracing::warn!(
                issue = %label,
                value = %raw,
                "Publication date missing or unparsable, omitted"
            );
        }
        parsed
    }

    fn embed(
        &self,
        embedder: &AssetEmbedder,
        kind: AssetKind,
        file_name: &str,
        label: &str,
        ctx: &mut BuildContext,
    ) -> Option<EmbeddedAsset> {
        let (path, reason) = match embedder.embed(file_name) {
            AssetResolution::Found(asset) => return Some(asset),
            AssetResolution::NotRequested => return None,
            AssetResolution::Missing(path) => (path, "file not found".to_string()),
            AssetResolution::Unreadable { path, reason } => (path, reason),
        };

        log_asset_skipped!(kind.label(), path.display(), &reason);
        ctx.diagnostics.skipped_assets.push(SkippedAsset {
            kind,
            path,
            reason,
            issue: label.to_string(),
        });
        None
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parses a staged publication date into a calendar date
///
/// Accepts ISO dates and datetimes, RFC 3339, `DD.MM.YYYY` and `MM/DD/YYYY`.
pub fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    ["%d.%m.%Y", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}
