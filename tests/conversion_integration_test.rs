//! End-to-end conversion tests
//!
//! Each test lays out a staging directory on disk, runs the coordinator with
//! schema validation disabled and inspects the written documents.

use folio::config::FolioConfig;
use folio::core::export::{ExportCoordinator, LAST_FILE_MARKER};
use folio::domain::FolioError;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "issueTitle,volume,issue,year,datePublished,sectionTitle,sectionAbbrev,\
articleTitle,authors,authorEmail,fileName,locale_2,articleTitle_2,issue_cover_image_filename";

struct Staging {
    dir: TempDir,
}

impl Staging {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("input/article_galleys")).unwrap();
        fs::create_dir_all(dir.path().join("input/issue_cover_images")).unwrap();
        fs::create_dir_all(dir.path().join("output")).unwrap();
        Self { dir }
    }

    fn input(&self) -> std::path::PathBuf {
        self.dir.path().join("input")
    }

    fn output(&self) -> std::path::PathBuf {
        self.dir.path().join("output")
    }

    fn write_csv(&self, name: &str, rows: &[String]) {
        let mut content = String::from(HEADER);
        content.push('\n');
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(self.input().join(name), content).unwrap();
    }

    fn config(&self, issues_per_file: usize) -> FolioConfig {
        let mut config = FolioConfig::default();
        config.paths.source_dir = self.input();
        config.paths.output_dir = self.output();
        config.export.issues_per_file = issues_per_file;
        config.validation.enabled = false;
        config
    }

    fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output().join(name)).unwrap()
    }
}

fn row(issue: u32, article: u32) -> String {
    row_with_cover(issue, article, "")
}

fn row_with_cover(issue: u32, article: u32, cover: &str) -> String {
    format!(
        "Issue {issue},1,{issue},2024,2024-03-01,Articles,ART,Article {issue}.{article},\
Ada Lovelace,ada@example.org,,,,{cover}"
    )
}

fn publication_ids(xml: &str) -> Vec<String> {
    let re = Regex::new(r#"current_publication_id="(\d+)""#).unwrap();
    re.captures_iter(xml).map(|c| c[1].to_string()).collect()
}

#[test]
fn test_twenty_five_issues_make_three_files() {
    let staging = Staging::new();
    let rows: Vec<String> = (1..=25)
        .flat_map(|i| (1..=2).map(move |a| row(i, a)))
        .collect();
    staging.write_csv("staging.csv", &rows);

    let summary = ExportCoordinator::from_config(staging.config(10))
        .unwrap()
        .execute_export()
        .unwrap();

    let per_file: Vec<usize> = summary.files.iter().map(|f| f.issues).collect();
    assert_eq!(per_file, vec![10, 10, 5]);
    assert_eq!(summary.total_articles, 50);
    assert!(summary.validation_skipped);

    let marker = fs::read_to_string(staging.output().join(LAST_FILE_MARKER)).unwrap();
    assert_eq!(marker, "issues_2.xml");

    for name in ["issues_0.xml", "issues_1.xml", "issues_2.xml"] {
        let xml = staging.read_output(name);
        assert!(xml.starts_with("<?xml"));
        let ids = publication_ids(&xml);
        let distinct: HashSet<&String> = ids.iter().collect();
        assert_eq!(distinct.len(), ids.len(), "duplicate article id in {name}");
    }
    assert_eq!(publication_ids(&staging.read_output("issues_2.xml")).len(), 10);
}

#[test]
fn test_csv_files_are_read_in_name_order() {
    let staging = Staging::new();
    staging.write_csv("b.csv", &[row(2, 1)]);
    staging.write_csv("a.csv", &[row(1, 1)]);

    ExportCoordinator::from_config(staging.config(10))
        .unwrap()
        .execute_export()
        .unwrap();

    let xml = staging.read_output("issues_0.xml");
    let first = xml.find("Article 1.1").unwrap();
    let second = xml.find("Article 2.1").unwrap();
    assert!(first < second);
}

#[test]
fn test_missing_cover_is_skipped_not_fatal() {
    let staging = Staging::new();
    staging.write_csv("staging.csv", &[row_with_cover(1, 1, "absent.jpg")]);

    let summary = ExportCoordinator::from_config(staging.config(10))
        .unwrap()
        .execute_export()
        .unwrap();

    assert_eq!(summary.diagnostics.skipped_assets.len(), 1);
    assert!(summary.diagnostics.skipped_assets[0]
        .path
        .ends_with("absent.jpg"));
    let xml = staging.read_output("issues_0.xml");
    assert!(!xml.contains("<covers>"));
    assert!(xml.contains("Article 1.1"));
}

#[test]
fn test_present_cover_is_embedded() {
    let staging = Staging::new();
    fs::write(staging.input().join("cover.png"), b"png").unwrap();
    staging.write_csv("staging.csv", &[row_with_cover(1, 1, "cover.png")]);

    ExportCoordinator::from_config(staging.config(10))
        .unwrap()
        .execute_export()
        .unwrap();

    let xml = staging.read_output("issues_0.xml");
    assert!(xml.contains("<covers>"));
    assert!(xml.contains("<cover_image>cover.png</cover_image>"));
    assert!(xml.contains(r#"<embed encoding="base64">cG5n</embed>"#));
}

#[test]
fn test_secondary_title_written_with_its_locale() {
    let staging = Staging::new();
    staging.write_csv(
        "staging.csv",
        &["Issue 1,1,1,2024,2024-03-01,Articles,ART,On Rivers,\
Ada Lovelace,ada@example.org,,fr_CA,Des rivières,"
            .to_string()],
    );

    let summary = ExportCoordinator::from_config(staging.config(10))
        .unwrap()
        .execute_export()
        .unwrap();

    let xml = staging.read_output("issues_0.xml");
    assert!(xml.contains(r#"<title locale="en">On Rivers</title>"#));
    assert!(xml.contains(r#"<title locale="fr_CA">Des rivières</title>"#));
    assert_eq!(summary.diagnostics.locale_warnings, 0);
}

#[test]
fn test_secondary_title_without_locale_is_omitted() {
    let staging = Staging::new();
    staging.write_csv(
        "staging.csv",
        &["Issue 1,1,1,2024,2024-03-01,Articles,ART,On Rivers,\
Ada Lovelace,ada@example.org,,,Des rivières,"
            .to_string()],
    );

    let summary = ExportCoordinator::from_config(staging.config(10))
        .unwrap()
        .execute_export()
        .unwrap();

    let xml = staging.read_output("issues_0.xml");
    assert!(!xml.contains("Des rivières"));
    assert_eq!(summary.diagnostics.locale_warnings, 1);
}

#[test]
fn test_galley_embedded_when_file_exists() {
    let staging = Staging::new();
    fs::write(staging.input().join("article_galleys/paper.pdf"), b"%PDF-1.4").unwrap();
    staging.write_csv(
        "staging.csv",
        &["Issue 1,1,1,2024,2024-03-01,Articles,ART,On Rivers,\
Ada Lovelace,ada@example.org,paper.pdf,,,"
            .to_string()],
    );

    ExportCoordinator::from_config(staging.config(10))
        .unwrap()
        .execute_export()
        .unwrap();

    let xml = staging.read_output("issues_0.xml");
    assert!(xml.contains("<submission_file"));
    assert!(xml.contains(r#"extension="pdf""#));
    assert!(xml.contains(r#"<embed encoding="base64">JVBERi0xLjQ=</embed>"#));
    assert!(xml.contains("<article_galley"));
}

#[test]
fn test_missing_galley_directory_is_fatal() {
    let staging = Staging::new();
    staging.write_csv("staging.csv", &[row(1, 1)]);
    fs::remove_dir(staging.input().join("article_galleys")).unwrap();

    let err = ExportCoordinator::from_config(staging.config(10))
        .unwrap()
        .execute_export()
        .unwrap_err();

    match err {
        FolioError::MissingInput(path) => assert!(path.ends_with("article_galleys")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!staging.output().join("issues_0.xml").exists());
}

#[test]
fn test_summary_json_describes_run() {
    let staging = Staging::new();
    staging.write_csv("staging.csv", &[row(1, 1), row(1, 2), row(2, 1)]);

    let summary = ExportCoordinator::from_config(staging.config(1))
        .unwrap()
        .execute_export()
        .unwrap();
    let json_path = staging.dir.path().join("summary.json");
    summary.write_json(&json_path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["total_issues"], 2);
    assert_eq!(value["total_articles"], 3);
    assert_eq!(value["files"].as_array().unwrap().len(), 2);
    assert!(Path::new(value["files"][1]["path"].as_str().unwrap()).ends_with("issues_1.xml"));
}

#[test]
fn test_secondary_abstract_and_section_title_doubled() {
    let staging = Staging::new();
    fs::write(
        staging.input().join("staging.csv"),
        "issueTitle,volume,issue,year,sectionTitle,sectionAbbrev,articleTitle,articleAbstract,\
locale_2,articleAbstract_2,sectionTitle_2\n\
Issue 1,1,1,2024,Articles,ART,On Rivers,Summary,fr_CA,Résumé,Articles FR\n\
Issue 2,1,2,2024,Articles,ART,On Lakes,Summary,,,\n",
    )
    .unwrap();
    let mut config = staging.config(1);
    config.export.emit_sections = true;

    ExportCoordinator::from_config(config)
        .unwrap()
        .execute_export()
        .unwrap();

    let localized = staging.read_output("issues_0.xml");
    assert_eq!(localized.matches("<abstract ").count(), 2);
    assert!(localized.contains(r#"<abstract locale="fr_CA">Résumé</abstract>"#));
    assert_eq!(
        localized
            .matches(r#"<title locale="fr_CA">Articles FR</title>"#)
            .count(),
        1
    );

    let plain = staging.read_output("issues_1.xml");
    assert_eq!(plain.matches("<abstract ").count(), 1);
    assert!(!plain.contains("fr_CA"));
}

#[test]
fn test_keyword_separators_keep_empty_elements() {
    let staging = Staging::new();
    fs::write(
        staging.input().join("staging.csv"),
        "issueTitle,volume,issue,sectionAbbrev,articleTitle,keywords\n\
Issue 1,1,1,ART,Blank keywords, ; \n\
Issue 1,1,1,ART,Mixed keywords,a; ;b\n\
Issue 1,1,1,ART,No keywords,\n",
    )
    .unwrap();

    ExportCoordinator::from_config(staging.config(10))
        .unwrap()
        .execute_export()
        .unwrap();

    let xml = staging.read_output("issues_0.xml");
    assert_eq!(xml.matches("<keywords ").count(), 2);
    assert_eq!(xml.matches("<keyword/>").count(), 3);
    assert!(xml.contains("<keyword>a</keyword>"));
    assert!(xml.contains("<keyword>b</keyword>"));
}
