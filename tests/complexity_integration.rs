//! Complexity aggregation over saved analyzer output.

use std::path::PathBuf;

use lexmetrics::complexity::SavedJsonAnalyzer;
use lexmetrics::{Analyzer, Operation, Registry, Status, Thresholds};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/complexity")
}

fn analyzer() -> Analyzer<'static> {
    Analyzer::new(Registry::builtin().expect("builtin registry should be valid"))
        .with_complexity(Box::new(SavedJsonAnalyzer))
}

#[test]
fn test_saved_analysis_summary() {
    let report = analyzer().analyze_file(&testdata_path().join("service.py"), Operation::Complexity);
    assert_eq!(report.status, Status::Success);
    assert_eq!(report.language.as_deref(), Some("python"));
    assert_eq!(report.counts.functions, 3);

    let summary = report.complexity.expect("summary should be present");
    assert_eq!(summary.lines_of_code, 11);
    assert_eq!(summary.average_complexity, 14.7);
    assert_eq!(summary.max_complexity, 27);
    assert_eq!(summary.high_complexity_functions, 2);
    assert_eq!(summary.critical_complexity_functions, 1);

    let route = &report.records[1];
    assert_eq!(route.name, "route");
    assert_eq!(route.extra.complexity, Some(14));
    assert_eq!(route.extra.max_nesting_depth, Some(2));
    assert_eq!(route.extra.line_count, Some(4));
}

#[test]
fn test_custom_thresholds() {
    let report = analyzer()
        .with_thresholds(Thresholds { high: 2, critical: 14 })
        .analyze_file(&testdata_path().join("service.py"), Operation::Complexity);
    let summary = report.complexity.expect("summary should be present");
    assert_eq!(summary.high_complexity_functions, 3);
    assert_eq!(summary.critical_complexity_functions, 1);
}

#[test]
fn test_missing_saved_analysis_is_error() {
    let report = analyzer().analyze_file(&testdata_path().join("orphan.py"), Operation::Complexity);
    assert!(report.is_error());
    assert!(report
        .error
        .as_deref()
        .unwrap_or("")
        .contains("orphan.py.complexity.json"));
}
