//! DOM summary tests against testdata/page.html.

use std::path::PathBuf;

use lexmetrics::{Analyzer, Operation, Registry, Status};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyzer() -> Analyzer<'static> {
    Analyzer::new(Registry::builtin().expect("builtin registry should be valid"))
}

#[test]
fn test_page_summary() {
    let report = analyzer().analyze_file(&testdata_path().join("page.html"), Operation::DomSummary);
    assert_eq!(report.status, Status::Success);
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);

    let dom = report.dom.expect("dom summary should be present");
    assert_eq!(dom.total_elements, 11);
    assert_eq!(report.counts.elements, 11);
    assert_eq!(dom.max_depth, 3);
    assert_eq!(dom.element_counts["a"], 2);
    assert!(!dom.element_counts.contains_key("div"));

    let html = &dom.tree[0];
    assert_eq!(html.tag_name, "html");
    assert_eq!(html.attributes["lang"], "en");

    let body = &html.children[1];
    let nav = &body.children[0];
    assert_eq!(nav.id.as_deref(), Some("top"));
    assert_eq!(nav.classes, vec!["menu", "main"]);
    assert_eq!(nav.children[1].text_content, "About");
}

#[test]
fn test_source_files_are_unsupported_for_dom() {
    let report = analyzer().analyze_file(&testdata_path().join("sample.py"), Operation::DomSummary);
    assert_eq!(report.status, Status::Unsupported);
    assert!(report.dom.is_none());
}
