//! Export coordinator - main orchestrator for a conversion run
//!
//! Checks the input layout, loads the staged records, writes one document per
//! page of issues and validates the written files against the schema.

use crate::adapters::staging::csv::load_store;
use crate::adapters::staging::RecordStore;
use crate::config::FolioConfig;
use crate::core::document::{
    BuildContext, BuildDiagnostics, BuilderSettings, DocumentBuilder, IssuesXmlWriter,
};
use crate::core::export::pagination::PagePlan;
use crate::core::export::summary::{ExportSummary, WrittenFile};
use crate::core::verification::{
    resolve_schema_path, validate_files, SchemaValidator, XmllintValidator,
};
use crate::domain::{FolioError, Result};
use crate::log_issue_converted;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Marker file in the output directory naming the last document written
pub const LAST_FILE_MARKER: &str = ".last_xml_filename";

/// Export coordinator
pub struct ExportCoordinator {
    config: FolioConfig,
    validator: Box<dyn SchemaValidator>,
}

impl ExportCoordinator {
    /// Create a coordinator that validates with `xmllint`
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` does not validate.
    pub fn from_config(config: FolioConfig) -> Result<Self> {
        config.validate().map_err(FolioError::Configuration)?;
        let validator = Box::new(XmllintValidator::from_config(&config));
        Ok(Self { config, validator })
    }

    /// Replace the schema validator
    pub fn with_validator(mut self, validator: Box<dyn SchemaValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Execute the conversion
    ///
    /// 1. Checks the source layout and the output directory
    /// 2. Loads every CSV file of the source directory
    /// 3. Writes `ceil(issues / issues_per_file)` documents
    /// 4. Records the last file name and validates the written files
    pub fn execute_export(&self) -> Result<ExportSummary> {
        self.check_layout()?;
        let store = load_store(&self.config.paths.source_dir)?;
        tracing::info!(records = store.len(), "Staged records loaded");
        self.export_store(&store)
    }

    /// Convert the issues of an already loaded store
    pub fn export_store<S>(&self, store: &S) -> Result<ExportSummary>
    where
        S: RecordStore + ?Sized,
    {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        let output_dir = &self.config.paths.output_dir;
        require_dir(output_dir)?;

        summary.total_issues = store.issue_count()?;
        let plan = PagePlan::new(summary.total_issues, self.config.export.issues_per_file)?;

        if plan.is_empty() {
            tracing::warn!("No issues found in the staging data, no file written");
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        let schema = if self.config.validation.enabled {
            Some(resolve_schema_path(None, &self.config)?)
        } else {
            None
        };

        tracing::info!(
            issues = summary.total_issues,
            files = plan.file_count(),
            per_file = plan.per_file(),
            id_scheme = %self.config.export.id_scheme,
            "Starting conversion"
        );

        let builder = DocumentBuilder::new(store, BuilderSettings::from_config(&self.config));
        let mut last_name = String::new();
        for page in plan.pages() {
            let name = plan.file_name(&self.config.export.file_prefix, page);
            let path = output_dir.join(&name);
            let (written, diagnostics) = self.write_page(&builder, &plan, page, &path)?;
            tracing::info!(
                file = %path.display(),
                issues = written.issues,
                articles = written.articles,
                "Document written"
            );
            summary.add_file(written, diagnostics);
            last_name = name;
        }

        fs::write(output_dir.join(LAST_FILE_MARKER), &last_name).map_err(|e| {
            FolioError::Export(format!("cannot record last file name: {e}"))
        })?;

        match schema {
            Some(schema) => {
                let report =
                    validate_files(self.validator.as_ref(), &summary.file_paths(), &schema)?;
                summary.set_validation_report(report);
            }
            None => {
                tracing::warn!("Schema validation disabled, documents were not checked");
                summary.validation_skipped = true;
            }
        }

        Ok(summary.with_duration(start_time.elapsed()))
    }

    fn write_page<S>(
        &self,
        builder: &DocumentBuilder<'_, S>,
        plan: &PagePlan,
        page: usize,
        path: &Path,
    ) -> Result<(WrittenFile, BuildDiagnostics)>
    where
        S: RecordStore + ?Sized,
    {
        let result = self.write_page_contents(builder, plan, page, path);
        if result.is_err() && path.exists() {
            if let Err(e) = fs::remove_file(path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Cannot remove partial document"
                );
            }
        }
        result
    }

    fn write_page_contents<S>(
        &self,
        builder: &DocumentBuilder<'_, S>,
        plan: &PagePlan,
        page: usize,
        path: &Path,
    ) -> Result<(WrittenFile, BuildDiagnostics)>
    where
        S: RecordStore + ?Sized,
    {
        let issues = builder.store().issues_page(page, plan.per_file())?;
        let mut ctx = BuildContext::new(self.config.export.id_scheme);

        let file = File::create(path)
            .map_err(|e| FolioError::Export(format!("cannot create {}: {}", path.display(), e)))?;
        let mut writer =
            IssuesXmlWriter::begin(BufWriter::new(file), self.config.export.emit_sections)?;

        let mut articles = 0;
        for row in &issues {
            let node = builder.build_issue(row, &mut ctx)?;
            writer.write_issue(&node)?;
            articles += node.article_count();
            log_issue_converted!(&row.key, node.article_count());
        }

        let issues_written = writer.issues_written();
        writer.finish()?;

        let written = WrittenFile {
            path: path.to_path_buf(),
            issues: issues_written,
            articles,
            ids_issued: ctx.allocator.issued_count(),
        };
        Ok((written, ctx.diagnostics))
    }

    /// Fails when the source directory or a required sub-directory is absent
    fn check_layout(&self) -> Result<()> {
        let paths = &self.config.paths;
        let required: [PathBuf; 3] = [
            paths.source_dir.clone(),
            paths.resolved_galley_dir(),
            paths.resolved_article_cover_dir(),
        ];
        for dir in &required {
            require_dir(dir)?;
        }
        require_dir(&paths.output_dir)
    }
}

fn require_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(FolioError::MissingInput(dir.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::staging::MemoryRecordStore;
    use crate::core::verification::SchemaOutcome;
    use crate::domain::StagedRecord;
    use tempfile::TempDir;

    struct AcceptAll;

    impl SchemaValidator for AcceptAll {
        fn validate(&self, _document: &Path, _schema: &Path) -> Result<SchemaOutcome> {
            Ok(SchemaOutcome::Valid)
        }
    }

    fn config(dir: &TempDir) -> FolioConfig {
        let mut config = FolioConfig::default();
        config.paths.source_dir = dir.path().join("input");
        config.paths.output_dir = dir.path().join("output");
        config.validation.enabled = false;
        fs::create_dir_all(&config.paths.output_dir).unwrap();
        config
    }

    fn records(issues: usize, articles_each: usize) -> Vec<StagedRecord> {
        (0..issues)
            .flat_map(|i| {
                (0..articles_each).map(move |a| StagedRecord {
                    issue_title: format!("Issue {i}"),
                    volume: Some(1),
                    issue: Some(i as u32 + 1),
                    year: "2024".to_string(),
                    date_published: "2024-01-15".to_string(),
                    section_abbrev: "ART".to_string(),
                    section_title: "Articles".to_string(),
                    article_title: format!("Article {i}.{a}"),
                    ..Default::default()
                })
            })
            .collect()
    }

    #[test]
    fn test_pages_and_marker() {
        let dir = TempDir::new().unwrap();
        let coordinator = ExportCoordinator::from_config(config(&dir)).unwrap();
        let store = MemoryRecordStore::new(records(25, 1));

        let summary = coordinator.export_store(&store).unwrap();

        let issues: Vec<usize> = summary.files.iter().map(|f| f.issues).collect();
        assert_eq!(issues, vec![10, 10, 5]);
        assert!(summary.validation_skipped);
        let marker = fs::read_to_string(dir.path().join("output").join(LAST_FILE_MARKER)).unwrap();
        assert_eq!(marker, "issues_2.xml");
    }

    #[test]
    fn test_zero_issues_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let coordinator = ExportCoordinator::from_config(config(&dir)).unwrap();
        let summary = coordinator
            .export_store(&MemoryRecordStore::new(Vec::new()))
            .unwrap();

        assert!(summary.files.is_empty());
        assert!(!dir.path().join("output").join(LAST_FILE_MARKER).exists());
    }

    #[test]
    fn test_missing_output_dir_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.paths.output_dir = dir.path().join("absent");
        let coordinator = ExportCoordinator::from_config(config).unwrap();

        let err = coordinator
            .export_store(&MemoryRecordStore::new(records(1, 1)))
            .unwrap_err();
        assert!(matches!(err, FolioError::MissingInput(_)));
    }

    #[test]
    fn test_missing_source_layout_is_fatal() {
        let dir = TempDir::new().unwrap();
        let coordinator = ExportCoordinator::from_config(config(&dir)).unwrap();
        let err = coordinator.execute_export().unwrap_err();
        assert!(matches!(err, FolioError::MissingInput(p) if p.ends_with("input")));
    }

    #[test]
    fn test_missing_schema_is_fatal_when_validating() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.validation.enabled = true;
        let coordinator = ExportCoordinator::from_config(config)
            .unwrap()
            .with_validator(Box::new(AcceptAll));

        let err = coordinator
            .export_store(&MemoryRecordStore::new(records(1, 1)))
            .unwrap_err();
        assert!(matches!(err, FolioError::Schema(_)));
    }

    #[test]
    fn test_validation_runs_on_every_file() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.validation.enabled = true;
        config.export.issues_per_file = 2;
        fs::write(config.paths.output_dir.join("schema_3_5.xsd"), "<xs:schema/>").unwrap();
        let coordinator = ExportCoordinator::from_config(config)
            .unwrap()
            .with_validator(Box::new(AcceptAll));

        let summary = coordinator
            .export_store(&MemoryRecordStore::new(records(3, 2)))
            .unwrap();

        let report = summary.validation_report.as_ref().unwrap();
        assert_eq!(report.passed(), 2);
        assert!(summary.is_valid());
        assert_eq!(summary.total_articles, 6);
    }

    #[test]
    fn test_ids_restart_per_file() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.export.issues_per_file = 1;
        let coordinator = ExportCoordinator::from_config(config).unwrap();

        coordinator
            .export_store(&MemoryRecordStore::new(records(2, 1)))
            .unwrap();

        for name in ["issues_0.xml", "issues_1.xml"] {
            let xml = fs::read_to_string(dir.path().join("output").join(name)).unwrap();
            assert!(xml.contains(r#"current_publication_id="100""#));
        }
    }

    #[test]
    fn test_failed_page_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.export.issues_per_file = 101;
        let coordinator = ExportCoordinator::from_config(config).unwrap();

        // issue 0 article 100 and issue 100 article 0 both get ID 10100
        let mut rows = records(101, 1);
        rows.extend(records(1, 101).into_iter().skip(1));

        let err = coordinator
            .export_store(&MemoryRecordStore::new(rows))
            .unwrap_err();

        assert!(matches!(err, FolioError::IdCollision { id: 10100, .. }));
        let output = dir.path().join("output");
        assert!(!output.join("issues_0.xml").exists());
        assert!(!output.join(LAST_FILE_MARKER).exists());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = FolioConfig::default();
        config.export.issues_per_file = 0;
        assert!(matches!(
            ExportCoordinator::from_config(config),
            Err(FolioError::Configuration(_))
        ));
    }
}
