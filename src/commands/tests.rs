use std::path::{Path, PathBuf};

use specseg::model::{Fragment, Header, MatchTier, SpecRecord};
use specseg::segment::FallbackPolicy;
use specseg::session::Session;
use specseg::specs::SortKey;

use super::*;
use crate::cli::{FallbackMode, LinesArgs, SectionsArgs, WindowArgs};
use crate::config::EngineConfig;

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("fixture should be written");
    path
}

const DOCUMENT: &str = r#"{
  "items": [
    {"type": "text", "content": "1 Intro", "page": 1},
    {"type": "text", "content": "a", "page": 1},
    {"type": "table", "content": "b\r\nc", "page": 1},
    {"type": "text", "content": "2 Scope", "page": 2},
    {"type": "text", "content": "d", "page": null}
  ]
}"#;

const HEADERS: &str = r#"[
  {"section_number": "1", "section_name": "Intro"},
  {"section_number": "2", "section_name": "Scope"},
  {"section_number": "9", "section_name": "Missing"}
]"#;

fn sections_args(document: PathBuf, headers: PathBuf) -> SectionsArgs {
    SectionsArgs {
        document,
        headers,
        section: None,
        fallback: None,
        output: None,
        json: true,
    }
}

#[test]
fn lines_report_flattens_paged_document() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let args = LinesArgs {
        document: write(dir.path(), "doc.json", DOCUMENT),
        json: true,
    };

    let report = lines::build_report(&args).expect("lines report should build");
    assert_eq!(report.line_count, 6);
    assert_eq!(report.lines, vec!["1 Intro", "a", "b", "c", "2 Scope", "d"]);
}

#[test]
fn image_fragments_load_and_list_without_lines() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let document = write(
        dir.path(),
        "doc.json",
        r#"{"items": [
            {"type": "text", "content": "1 Intro", "page": 1},
            {"type": "image", "content": "", "page": 1},
            {"type": "text", "content": "body", "page": 2}
        ], "total": 3}"#,
    );

    let report = lines::build_report(&LinesArgs {
        document: document.clone(),
        json: true,
    })
    .expect("document with an image should load");
    assert_eq!(report.lines, vec!["1 Intro", "body"]);

    let fragments = input::load_fragments(&document).expect("fragments should load");
    let args = WindowArgs {
        document,
        scroll_offset: 0.0,
        viewport_height: 720.0,
        row_height: None,
        overscan: None,
        json: true,
    };
    let window = window::build_report(fragments, &args, &EngineConfig::default());
    assert_eq!(window.rows.len(), 3);
    assert_eq!(window.rows[1].badge, "image");
}

#[test]
fn numeric_section_numbers_in_specs_mark_progress() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = write(
        dir.path(),
        "specs.json",
        r#"[{"section_number": 3, "specification": "Max load 5 kN"}]"#,
    );

    let specs = input::load_specs(&path).expect("numeric section numbers should load");
    let report = progress::build_report(&[Header::new("3", "Design")], &specs);
    assert_eq!(report.completed, vec!["3"]);
}

#[test]
fn sections_report_flags_unmatched_header() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let args = sections_args(
        write(dir.path(), "doc.json", DOCUMENT),
        write(dir.path(), "headers.json", HEADERS),
    );

    let report = sections::build_report(&args, &EngineConfig::default())
        .expect("sections report should build");
    assert_eq!(report.sections.len(), 3);
    assert_eq!(report.sections[0].text, "1 Intro\na\nb\nc");
    assert_eq!(report.sections[1].text, "2 Scope\nd");
    assert_eq!(report.sections[0].tier, Some(MatchTier::Combo));
    assert!(!report.sections[2].matched);
    assert_eq!(report.sections[2].tier, None);
    assert_eq!(report.sections[2].text, "1 Intro\na\nb\nc");
    assert_eq!(report.low_confidence_count, 1);
}

#[test]
fn sections_flag_overrides_config_fallback() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let mut args = sections_args(
        write(dir.path(), "doc.json", DOCUMENT),
        write(dir.path(), "headers.json", HEADERS),
    );
    args.section = Some("9".to_string());
    args.fallback = Some(FallbackMode::Empty);

    let report = sections::build_report(&args, &EngineConfig::default())
        .expect("sections report should build");
    assert_eq!(report.fallback, FallbackPolicy::Empty);
    assert_eq!(report.sections.len(), 1);
    assert_eq!(report.sections[0].text, "");
}

#[test]
fn sections_rejects_unknown_section() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let mut args = sections_args(
        write(dir.path(), "doc.json", DOCUMENT),
        write(dir.path(), "headers.json", HEADERS),
    );
    args.section = Some("42".to_string());

    let error = sections::build_report(&args, &EngineConfig::default())
        .expect_err("unknown section should fail");
    assert!(error.to_string().contains("42"));
}

#[test]
fn malformed_headers_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let args = sections_args(
        write(dir.path(), "doc.json", DOCUMENT),
        write(dir.path(), "broken.json", "{not json"),
    );

    let error = sections::build_report(&args, &EngineConfig::default())
        .expect_err("broken headers should fail");
    assert!(format!("{error:#}").contains("broken.json"));
}

#[test]
fn outline_rows_nest_and_flatten() {
    let headers = vec![
        Header::new("10", "Annex"),
        Header::new("2.1", "Limits"),
        Header::new("2", "Scope"),
    ];

    let tree = outline::build_rows(&headers, false);
    let nested = tree
        .iter()
        .map(|row| (row.section_number.as_str(), row.depth))
        .collect::<Vec<(&str, usize)>>();
    assert_eq!(nested, vec![("2", 1), ("2.1", 2), ("10", 1)]);

    let flat = outline::build_rows(&headers, true);
    assert_eq!(flat, tree);
}

#[test]
fn progress_report_lists_completed_sections() {
    let headers = vec![Header::new("3", "Design"), Header::new("3.1", "Loads")];
    let specs = vec![SpecRecord {
        section: Some("3.1".to_string()),
        specification: "Max load 5 kN".to_string(),
        ..SpecRecord::default()
    }];

    let report = progress::build_report(&headers, &specs);
    assert_eq!(report.completed, vec!["3.1"]);
    assert_eq!(report.tracked, 2);
    assert!(!report.rows[0].complete);
    assert!(report.rows[1].complete);
}

#[test]
fn window_report_uses_config_unless_overridden() {
    let fragments = (0..1000)
        .map(|index| Fragment::text(format!("row {index}")))
        .collect::<Vec<Fragment>>();
    let mut args = WindowArgs {
        document: PathBuf::from("unused.json"),
        scroll_offset: 720.0,
        viewport_height: 360.0,
        row_height: None,
        overscan: None,
        json: true,
    };

    let report = window::build_report(fragments.clone(), &args, &EngineConfig::default());
    assert_eq!((report.range.start, report.range.end), (5, 20));
    assert_eq!(report.rows.len(), 15);
    assert_eq!(report.rows[0].content, "row 5");
    assert_eq!(report.total_extent, 72_000.0);

    args.overscan = Some(0);
    let report = window::build_report(fragments, &args, &EngineConfig::default());
    assert_eq!((report.range.start, report.range.end), (10, 15));
}

#[test]
fn specs_report_filters_rows() {
    let specs = vec![
        SpecRecord {
            section_number: Some("2".to_string()),
            specification: "Bolt M8".to_string(),
            ..SpecRecord::default()
        },
        SpecRecord {
            section_number: Some("1".to_string()),
            specification: "Paint".to_string(),
            ..SpecRecord::default()
        },
    ];

    let report = specs::build_report(&specs, "bolt", SortKey::SectionNumber);
    assert_eq!(report.returned, 1);
    assert_eq!(report.rows[0].specification, "Bolt M8");
}

#[test]
fn status_summary_counts_matches() {
    let session = Session::with_document(
        vec![Fragment::text("1 Intro"), Fragment::text("body")],
        FallbackPolicy::DocumentStart,
    )
    .with_headers(vec![Header::new("1", "Intro"), Header::new("5", "Absent")]);

    let summary = status::summarize(&session);
    assert_eq!(summary.fragments, 2);
    assert_eq!(summary.lines, 2);
    assert_eq!(summary.headers, 2);
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.low_confidence, 1);
}
