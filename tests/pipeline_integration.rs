//! End-to-end tests of the per-file pipeline against the fixtures in testdata/.

use std::fs;
use std::path::PathBuf;

use lexmetrics::{Analyzer, Operation, Registry, Report, Status};
use tempfile::TempDir;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyzer() -> Analyzer<'static> {
    Analyzer::new(Registry::builtin().expect("builtin registry should be valid"))
}

fn run(file: &str, operation: Operation) -> Report {
    analyzer().analyze_file(&testdata_path().join(file), operation)
}

fn names(report: &Report) -> Vec<&str> {
    report.records.iter().map(|r| r.name.as_str()).collect()
}

fn returns(report: &Report) -> Vec<(&str, usize)> {
    report
        .records
        .iter()
        .map(|r| (r.name.as_str(), r.extra.returns.unwrap_or(0)))
        .collect()
}

// =============================================================================
// Python
// =============================================================================

#[test]
fn test_python_classes() {
    let report = run("sample.py", Operation::ClassCount);
    assert_eq!(report.status, Status::Success);
    assert_eq!(report.language.as_deref(), Some("python"));
    assert_eq!(report.counts.classes, 2);
    assert_eq!(names(&report), vec!["Shape", "Square"]);
}

#[test]
fn test_python_comments_include_docstrings() {
    let report = run("sample.py", Operation::CommentCount);
    assert_eq!(report.counts.comment_lines, 4);
}

#[test]
fn test_python_returns() {
    let report = run("sample.py", Operation::ReturnCount);
    assert_eq!(
        returns(&report),
        vec![("area", 1), ("__init__", 0), ("area", 2), ("describe", 1)]
    );
    assert_eq!(report.counts.functions, 4);
    assert_eq!(report.counts.returns, 4);
}

// =============================================================================
// Rust
// =============================================================================

#[test]
fn test_rust_classes_skip_unit_structs_and_literals() {
    let report = run("sample.rs", Operation::ClassCount);
    assert_eq!(names(&report), vec!["Point", "Area"]);
    let keywords: Vec<&str> = report.records.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["struct", "trait"]);
    assert_eq!(report.records[0].line, 4);
    assert_eq!(report.records[0].end_line, 7);
}

#[test]
fn test_rust_comments() {
    let report = run("sample.rs", Operation::CommentCount);
    assert_eq!(report.counts.comment_lines, 4);
}

#[test]
fn test_rust_returns_with_trailing_expressions() {
    let report = run("sample.rs", Operation::ReturnCount);
    assert_eq!(
        returns(&report),
        vec![("new", 1), ("manhattan", 2), ("reset", 0)]
    );
    assert_eq!(report.counts.returns, 3);
    assert!(report.warnings.is_empty());
}

// =============================================================================
// Ruby and TypeScript
// =============================================================================

#[test]
fn test_ruby_keyword_pairs() {
    let classes = run("sample.rb", Operation::ClassCount);
    assert_eq!(names(&classes), vec!["Shapes", "Circle"]);
    assert_eq!(classes.records[0].keyword, "module");

    let comments = run("sample.rb", Operation::CommentCount);
    assert_eq!(comments.counts.comment_lines, 5);

    let report = run("sample.rb", Operation::ReturnCount);
    assert_eq!(
        returns(&report),
        vec![("initialize", 1), ("area", 1), ("describe", 2)]
    );
}

#[test]
fn test_typescript_fixture() {
    let classes = run("sample.ts", Operation::ClassCount);
    assert_eq!(names(&classes), vec!["Shape", "Square", "Color"]);

    let comments = run("sample.ts", Operation::CommentCount);
    assert_eq!(comments.counts.comment_lines, 4);

    let report = run("sample.ts", Operation::ReturnCount);
    assert_eq!(
        returns(&report),
        vec![("constructor", 0), ("area", 1), ("double", 1)]
    );
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn test_unsupported_extension() {
    let report = run("unknown.xyz", Operation::ClassCount);
    assert_eq!(report.status, Status::Unsupported);
    assert_eq!(report.counts.classes, 0);
    assert!(report.records.is_empty());
    assert!(report.warnings[0].contains("xyz"));
    assert!(!report.warnings[0].contains("Ignored"));
}

#[test]
fn test_missing_file_is_error() {
    let report = run("missing.py", Operation::CommentCount);
    assert!(report.is_error());
    assert!(report.error.as_deref().unwrap_or("").contains("missing.py"));
}

#[test]
fn test_non_utf8_input_is_decoded_lossily() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("latin1.c");
    let mut bytes = b"/* caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b" */\nstruct Menu {\n  int items;\n};\n");
    fs::write(&path, bytes).unwrap();

    let report = analyzer().analyze_file(&path, Operation::ClassCount);
    assert_eq!(report.status, Status::Success);
    assert_eq!(report.counts.classes, 1);
    assert!(report.warnings.iter().any(|w| w.contains("UTF-8")));
}

#[test]
fn test_alias_extends_registry() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("module.pyx");
    fs::write(&path, "class A:\n    pass\n").unwrap();

    let report = analyzer().analyze_file(&path, Operation::ClassCount);
    assert_eq!(report.status, Status::Unsupported);

    let aliased = analyzer().with_aliases([("pyx", "python")]);
    let report = aliased.analyze_file(&path, Operation::ClassCount);
    assert_eq!(report.language.as_deref(), Some("python"));
    assert_eq!(report.counts.classes, 1);
}

#[test]
fn test_string_contents_never_count() {
    let source = "const s = \"class A { return 1; }\";\n// class B {}\n";
    let report = analyzer().analyze_source("x.js", "js", source, Operation::ClassCount);
    assert_eq!(report.counts.classes, 0);
}
