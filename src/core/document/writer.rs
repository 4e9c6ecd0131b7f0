//! Native XML serializer
//!
//! Streams [`IssueNode`] trees into an `<issues>` document with quick-xml.
//! Element order follows the native import schema; text and attribute values
//! are always escaped by the writer, never pre-formatted by callers.

use crate::domain::{
    ArticleNode, AuthorNode, CoverNode, FolioError, IssueIdentification, IssueNode, Localized,
    PublicationNode, Result, SectionNode, SubmissionFileNode,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

const NATIVE_NS: &str = "http://pkp.sfu.ca";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://pkp.sfu.ca native.xsd";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Writes one `<issues>` document
///
/// ```
/// use folio::core::document::IssuesXmlWriter;
///
/// let writer = IssuesXmlWriter::begin(Vec::new(), false).unwrap();
/// let bytes = writer.finish().unwrap();
/// let xml = String::from_utf8(bytes).unwrap();
/// assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
/// assert!(xml.contains("</issues>"));
/// ```
pub struct IssuesXmlWriter<W: Write> {
    writer: Writer<W>,
    emit_sections: bool,
    issues_written: usize,
}

impl<W: Write> IssuesXmlWriter<W> {
    /// Writes the declaration and opens the root element
    pub fn begin(inner: W, emit_sections: bool) -> Result<Self> {
        let mut this = Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
            emit_sections,
            issues_written: 0,
        };

        this.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let root = BytesStart::new("issues").with_attributes([
            ("xmlns", NATIVE_NS),
            ("xmlns:xsi", XSI_NS),
            ("xsi:schemaLocation", SCHEMA_LOCATION),
        ]);
        this.emit(Event::Start(root))?;
        Ok(this)
    }

    pub fn issues_written(&self) -> usize {
        self.issues_written
    }

    /// Serializes one issue with all its articles
    pub fn write_issue(&mut self, issue: &IssueNode) -> Result<()> {
        self.start("issue", &[("published", "1")])?;

        self.write_identification(&issue.identification, true)?;
        if let Some(date) = issue.date_published {
            self.text_element("date_published", &[], &date.format(DATE_FORMAT).to_string())?;
        }

        if self.emit_sections && !issue.sections.is_empty() {
            self.start("sections", &[])?;
            for section in &issue.sections {
                self.write_section(section)?;
            }
            self.end("sections")?;
        }

        if let Some(cover) = &issue.cover {
            self.write_cover(cover)?;
        }

        self.start("articles", &[])?;
        for article in issue.articles() {
            self.write_article(article)?;
        }
        self.end("articles")?;

        self.end("issue")?;
        self.issues_written += 1;
        Ok(())
    }

    /// Closes the root element and hands back the sink
    pub fn finish(mut self) -> Result<W> {
        self.end("issues")?;
        let mut inner = self.writer.into_inner();
        inner.write_all(b"\n")?;
        inner.flush()?;
        Ok(inner)
    }

    fn write_identification(
        &mut self,
        identification: &IssueIdentification,
        year_required: bool,
    ) -> Result<()> {
        self.start("issue_identification", &[])?;
        if let Some(volume) = identification.volume {
            self.text_element("volume", &[], &volume.to_string())?;
        }
        if let Some(number) = identification.number {
            self.text_element("number", &[], &number.to_string())?;
        }
        match &identification.year {
            Some(year) => self.text_element("year", &[], year)?,
            None if year_required => self.text_element("year", &[], "")?,
            None => {}
        }
        for title in &identification.titles {
            self.localized("title", title)?;
        }
        self.end("issue_identification")
    }

    fn write_section(&mut self, section: &SectionNode) -> Result<()> {
        let locale = section
            .titles
            .first()
            .map(|t| t.locale.clone())
            .unwrap_or_default();

        self.start("section", &[("ref", section.abbrev.as_str())])?;
        self.text_element("abbrev", &[("locale", locale.as_str())], &section.abbrev)?;
        self.emit(Event::Empty(
            BytesStart::new("policy").with_attributes([("locale", locale.as_str())]),
        ))?;
        for title in &section.titles {
            self.localized("title", title)?;
        }
        self.end("section")
    }

    fn write_cover(&mut self, cover: &CoverNode) -> Result<()> {
        self.start("covers", &[])?;
        self.start("cover", &[("locale", cover.locale.as_str())])?;
        self.text_element("cover_image", &[], &cover.asset.file_name)?;
        self.text_element("cover_image_alt_text", &[], &cover.alt_text)?;
        self.text_element("embed", &[("encoding", "base64")], &cover.asset.payload)?;
        self.end("cover")?;
        self.end("covers")
    }

    fn write_article(&mut self, article: &ArticleNode) -> Result<()> {
        let id = article.id.to_string();
        self.start(
            "article",
            &[
                ("status", "3"),
                ("stage", "production"),
                ("current_publication_id", id.as_str()),
            ],
        )?;
        self.internal_id(&id)?;
        if let Some(file) = &article.submission_file {
            self.write_submission_file(&id, file)?;
        }
        self.write_publication(&id, &article.publication)?;
        self.end("article")
    }

    fn write_submission_file(&mut self, id: &str, file: &SubmissionFileNode) -> Result<()> {
        self.start(
            "submission_file",
            &[
                ("id", id),
                ("file_id", id),
                ("stage", "proof"),
                ("viewable", "true"),
                ("genre", file.genre.as_str()),
                ("uploader", file.uploader.as_str()),
            ],
        )?;
        self.localized("name", &file.name)?;

        let size = file.asset.byte_len.to_string();
        self.start(
            "file",
            &[
                ("id", id),
                ("filesize", size.as_str()),
                ("extension", file.asset.extension.as_str()),
            ],
        )?;
        self.text_element("embed", &[("encoding", "base64")], &file.asset.payload)?;
        self.end("file")?;
        self.end("submission_file")
    }

    fn write_publication(&mut self, id: &str, publication: &PublicationNode) -> Result<()> {
        let seq = publication.seq.to_string();
        let date = publication
            .date_published
            .map(|d| d.format(DATE_FORMAT).to_string());

        let mut attrs = vec![("version", "1"), ("status", "3")];
        if let Some(date) = date.as_deref() {
            attrs.push(("date_published", date));
        }
        attrs.push(("section_ref", publication.section_ref.as_str()));
        attrs.push(("seq", seq.as_str()));
        self.start("publication", &attrs)?;

        self.internal_id(id)?;
        if let Some(doi) = &publication.doi {
            self.text_element("id", &[("type", "doi"), ("advice", "update")], doi)?;
        }
        for title in &publication.titles {
            self.localized("title", title)?;
        }
        if let Some(subtitle) = &publication.subtitle {
            self.localized("subtitle", subtitle)?;
        }
        for abstract_text in &publication.abstracts {
            self.localized("abstract", abstract_text)?;
        }
        self.text_element("licenseUrl", &[], &publication.license_url)?;
        self.localized("copyrightHolder", &publication.copyright_holder)?;
        if let Some(year) = &publication.copyright_year {
            self.text_element("copyrightYear", &[], year)?;
        }

        if let Some(keywords) = &publication.keywords {
            self.start("keywords", &[("locale", keywords.locale.as_str())])?;
            for keyword in &keywords.keywords {
                self.text_element("keyword", &[], keyword)?;
            }
            self.end("keywords")?;
        }

        if !publication.authors.is_empty() {
            self.start("authors", &[])?;
            for author in &publication.authors {
                self.write_author(id, author)?;
            }
            self.end("authors")?;
        }

        let galley = &publication.galley;
        self.start(
            "article_galley",
            &[("locale", galley.locale.as_str()), ("approved", "false")],
        )?;
        self.internal_id(id)?;
        self.text_element("name", &[("locale", galley.locale.as_str())], &galley.name)?;
        self.text_element("seq", &[], "0")?;
        self.emit(Event::Empty(
            BytesStart::new("submission_file_ref").with_attributes([("id", id)]),
        ))?;
        self.end("article_galley")?;

        if !publication.citations.is_empty() {
            self.start("citations", &[])?;
            for citation in &publication.citations {
                self.text_element("citation", &[], citation)?;
            }
            self.end("citations")?;
        }

        self.write_identification(&publication.issue_identification, false)?;
        self.text_element("pages", &[], &publication.pages)?;

        if let Some(cover) = &publication.cover {
            self.write_cover(cover)?;
        }

        self.end("publication")
    }

    fn write_author(&mut self, id: &str, author: &AuthorNode) -> Result<()> {
        let seq = author.seq.to_string();
        let mut attrs = vec![("user_group_ref", "Author")];
        if author.is_primary_contact() {
            attrs.push(("primary_contact", "true"));
        }
        attrs.push(("seq", seq.as_str()));
        attrs.push(("id", id));
        self.start("author", &attrs)?;

        self.localized("givenname", &author.given_name)?;
        if let Some(family) = &author.family_name {
            self.localized("familyname", family)?;
        }
        if let Some(affiliation) = &author.affiliation {
            self.start("affiliation", &[])?;
            self.localized("name", affiliation)?;
            self.end("affiliation")?;
        }
        if let Some(country) = &author.country {
            self.text_element("country", &[], country)?;
        }
        self.text_element("email", &[], &author.email)?;
        if let Some(orcid) = &author.orcid {
            self.text_element("orcid", &[], orcid)?;
        }
        self.end("author")
    }

    fn internal_id(&mut self, id: &str) -> Result<()> {
        self.text_element("id", &[("type", "internal"), ("advice", "ignore")], id)
    }

    fn localized(&mut self, name: &str, value: &Localized) -> Result<()> {
        self.text_element(name, &[("locale", value.locale.as_str())], &value.text)
    }

    fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        if text.is_empty() {
            let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
            return self.emit(Event::Empty(element));
        }
        self.start(name, attrs)?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.emit(Event::Start(element))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| FolioError::Xml(e.to_string()))
    }
}
