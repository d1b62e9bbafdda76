//! Tests for the JSON report shape consumed by the visualizer.
//!
//! Keys are camelCase, one report renders as an object and several as an
//! array, and optional sections only appear when they carry data.

use std::path::PathBuf;

use lexmetrics::report::to_json;
use lexmetrics::{Analyzer, Operation, Registry, Report};
use serde_json::Value;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyze(file: &str, operation: Operation) -> Report {
    let registry = Registry::builtin().expect("builtin registry should be valid");
    Analyzer::new(registry).analyze_file(&testdata_path().join(file), operation)
}

fn as_json(reports: &[Report]) -> Value {
    let text = to_json(reports).expect("reports should serialize");
    serde_json::from_str(&text).expect("output should be valid JSON")
}

#[test]
fn test_single_report_is_object() {
    let json = as_json(&[analyze("sample.rs", Operation::ReturnCount)]);
    assert!(json.is_object());
    assert_eq!(json["operation"], "return-count");
    assert_eq!(json["status"], "success");
    assert_eq!(json["language"], "rust");
    assert_eq!(json["counts"]["returns"], 3);
    assert_eq!(json["counts"]["functions"], 3);
    assert!(json.get("error").is_none());
    assert!(json.get("dom").is_none());
}

#[test]
fn test_record_fields() {
    let json = as_json(&[analyze("sample.rs", Operation::ReturnCount)]);
    let record = &json["records"][1];
    assert_eq!(record["name"], "manhattan");
    assert_eq!(record["kind"], "function");
    assert_eq!(record["keyword"], "fn");
    assert_eq!(record["line"], 16);
    assert_eq!(record["endLine"], 21);
    assert_eq!(record["returns"], 2);
    assert_eq!(record["implicitReturn"], true);
    assert!(record.get("lowConfidence").is_none());
    assert!(record.get("complexity").is_none());
}

#[test]
fn test_class_records() {
    let json = as_json(&[analyze("sample.py", Operation::ClassCount)]);
    assert_eq!(json["counts"]["classes"], 2);
    assert_eq!(json["records"][0]["kind"], "class");
    assert_eq!(json["records"][0]["keyword"], "class");
    assert!(json["records"][0].get("returns").is_none());
}

#[test]
fn test_multiple_reports_form_array() {
    let reports = vec![
        analyze("sample.py", Operation::CommentCount),
        analyze("unknown.xyz", Operation::CommentCount),
    ];
    let json = as_json(&reports);
    let array = json.as_array().expect("several reports should form an array");
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["counts"]["commentLines"], 4);
    assert_eq!(array[1]["status"], "unsupported");
    assert_eq!(array[1]["counts"]["commentLines"], 0);
}

#[test]
fn test_dom_section() {
    let json = as_json(&[analyze("page.html", Operation::DomSummary)]);
    let dom = &json["dom"];
    assert_eq!(dom["totalElements"], 11);
    assert_eq!(dom["maxDepth"], 3);
    assert_eq!(dom["elementCounts"]["a"], 2);
    assert_eq!(dom["tree"][0]["tagName"], "html");
    assert_eq!(dom["tree"][0]["children"][0]["depth"], 1);
}

#[test]
fn test_error_report_shape() {
    let json = as_json(&[analyze("nope.rs", Operation::ClassCount)]);
    assert_eq!(json["status"], "error");
    assert!(json["error"].as_str().unwrap_or("").contains("nope.rs"));
    assert_eq!(json["counts"]["classes"], 0);
    assert!(json.get("language").is_none());
}
