//! Per-file analysis driver.
//!
//! `Analyzer` resolves a file's language, reads it, runs the lexical
//! pipeline and folds the outcome into a `Report`. Every failure mode lands
//! on the report; nothing escapes as an error or a panic.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::complexity::{self, ComplexityAnalyzer, Thresholds};
use crate::count::{
    count_classes, count_comment_lines, count_returns, ConstructRecord, RecordExtra,
};
use crate::dom;
use crate::error::AnalysisError;
use crate::profile::{normalize_extension, CompiledProfile, ConstructKind, Registry};
use crate::report::{Operation, Report};
use crate::scan::{extract_spans, strip};

/// Runs operations against files using a compiled registry.
pub struct Analyzer<'r> {
    registry: &'r Registry,
    aliases: HashMap<String, String>,
    thresholds: Thresholds,
    complexity: Option<Box<dyn ComplexityAnalyzer>>,
}

impl<'r> Analyzer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            aliases: HashMap::new(),
            thresholds: Thresholds::default(),
            complexity: None,
        }
    }

    /// Map extra extensions onto a registered extension or profile id.
    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.aliases = aliases
            .into_iter()
            .map(|(k, v)| (normalize_extension(k.as_ref()), v.into()))
            .collect();
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_complexity(mut self, analyzer: Box<dyn ComplexityAnalyzer>) -> Self {
        self.complexity = Some(analyzer);
        self
    }

    /// Find the profile for an extension, honoring aliases.
    pub fn profile_for(&self, ext: &str) -> Option<&'r CompiledProfile> {
        let key = normalize_extension(ext);
        match self.aliases.get(&key) {
            Some(target) => self.registry.resolve(target),
            None => self.registry.for_extension(&key),
        }
    }

    /// Whether `operation` can run on files with this extension.
    pub fn supports(&self, ext: &str, operation: Operation) -> bool {
        match operation {
            Operation::DomSummary => dom::is_dom_extension(ext),
            _ => self.profile_for(ext).is_some(),
        }
    }

    /// Analyze one file on disk.
    pub fn analyze_file(&self, path: &Path, operation: Operation) -> Report {
        let file = path.display().to_string();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();

        match fs::metadata(path) {
            Ok(meta) if !meta.is_file() => {
                let err = AnalysisError::NotAFile(file.clone());
                return Report::error(file, operation, err.to_string());
            }
            Ok(_) => {}
            Err(source) => {
                let err = AnalysisError::Io {
                    path: file.clone(),
                    source,
                };
                warn!("{}", err);
                return Report::error(file, operation, err.to_string());
            }
        }

        if !self.supports(&ext, operation) {
            debug!(file = %file, ext = %ext, %operation, "unsupported file type");
            return Report::unsupported(file, operation, &ext);
        }

        if operation == Operation::Complexity {
            return self.complexity_report(path, file, &ext);
        }

        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(source) => {
                let err = AnalysisError::Io {
                    path: file.clone(),
                    source,
                };
                warn!("{}", err);
                return Report::error(file, operation, err.to_string());
            }
        };

        let (source, lossy) = match String::from_utf8(bytes) {
            Ok(s) => (s, false),
            Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
        };

        let mut report = self.analyze_source(&file, &ext, &source, operation);
        if lossy {
            report
                .warnings
                .insert(0, "file is not valid UTF-8; decoded lossily".to_string());
        }
        report
    }

    /// Analyze in-memory source as though it came from a file with `ext`.
    pub fn analyze_source(&self, file: &str, ext: &str, source: &str, operation: Operation) -> Report {
        if operation == Operation::DomSummary {
            if !dom::is_dom_extension(ext) {
                return Report::unsupported(file, operation, ext);
            }
            let (summary, warnings) = dom::summarize(source);
            let mut report = Report::success(file, operation, "html");
            report.counts.elements = summary.total_elements;
            report.dom = Some(summary);
            report.warnings = warnings;
            return report;
        }

        let Some(profile) = self.profile_for(ext) else {
            return Report::unsupported(file, operation, ext);
        };
        if operation == Operation::Complexity {
            return Report::error(
                file,
                operation,
                "complexity needs a file on disk for the external analyzer",
            );
        }

        let stripped = strip(source, profile);
        let mut report = Report::success(file, operation, profile.id);

        match operation {
            Operation::CommentCount => {
                report.counts.comment_lines = count_comment_lines(&stripped);
            }
            Operation::ClassCount => {
                let spans = extract_spans(&stripped, profile);
                report.records = count_classes(&spans);
                report.counts.classes = report.records.len();
            }
            Operation::ReturnCount => {
                let spans = extract_spans(&stripped, profile);
                let tally = count_returns(&spans, &stripped, profile);
                report.counts.functions = tally.functions;
                report.counts.returns = tally.total;
                report.records = tally.records;
                report.warnings = tally.warnings;
            }
            Operation::DomSummary | Operation::Complexity => unreachable!("handled above"),
        }

        debug!(file, language = profile.id, %operation, "analyzed");
        report
    }

    fn complexity_report(&self, path: &Path, file: String, ext: &str) -> Report {
        let operation = Operation::Complexity;
        let Some(analyzer) = &self.complexity else {
            return Report::error(
                file,
                operation,
                "no complexity analyzer configured (set complexity.command or pass --saved)",
            );
        };
        let language = self.profile_for(ext).map_or("", |p| p.id);

        let analysis = match analyzer.analyze(path) {
            Ok(a) => a,
            Err(err) => {
                warn!(analyzer = analyzer.name(), "{}", err);
                return Report::error(file, operation, err.to_string());
            }
        };

        let summary = complexity::summarize(&analysis, self.thresholds);
        let mut report = Report::success(file, operation, language);
        report.counts.functions = analysis.functions.len();
        report.records = analysis
            .functions
            .iter()
            .map(|f| ConstructRecord {
                name: f.name.clone(),
                kind: ConstructKind::Function,
                keyword: "function".to_string(),
                line: f.start_line,
                end_line: f.end_line,
                extra: RecordExtra {
                    complexity: Some(f.cyclomatic_complexity),
                    parameters: Some(f.parameter_count),
                    max_nesting_depth: Some(f.max_nesting_depth),
                    line_count: Some(f.line_count),
                    ..RecordExtra::default()
                },
            })
            .collect();
        report.complexity = Some(summary);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Status;

    fn analyzer() -> Analyzer<'static> {
        Analyzer::new(Registry::builtin().unwrap())
    }

    #[test]
    fn test_comment_count_from_source() {
        let report = analyzer().analyze_source("a.py", "py", "# a\nx = 1  # b\n", Operation::CommentCount);
        assert_eq!(report.status, Status::Success);
        assert_eq!(report.language.as_deref(), Some("python"));
        assert_eq!(report.counts.comment_lines, 2);
    }

    #[test]
    fn test_nested_class_scenario() {
        let report = analyzer().analyze_source(
            "a.java",
            "java",
            "class A {\n  class B {\n  }\n}",
            Operation::ClassCount,
        );
        assert_eq!(report.counts.classes, 2);
        let ranges: Vec<_> = report
            .records
            .iter()
            .map(|r| (r.name.as_str(), r.line, r.end_line))
            .collect();
        assert_eq!(ranges, vec![("A", 1, 4), ("B", 2, 3)]);
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let report = analyzer().analyze_source("a.xyz", "xyz", "class A {}", Operation::ClassCount);
        assert_eq!(report.status, Status::Unsupported);
        assert_eq!(report.counts.classes, 0);
        assert!(report.records.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_dom_requires_html_extension() {
        let report = analyzer().analyze_source("a.py", "py", "<p>x</p>", Operation::DomSummary);
        assert_eq!(report.status, Status::Unsupported);
        let report = analyzer().analyze_source("a.html", "html", "<p>x</p>", Operation::DomSummary);
        assert_eq!(report.counts.elements, 1);
    }

    #[test]
    fn test_alias_maps_extension() {
        let analyzer = analyzer().with_aliases([("pyx", "python"), ("jsm", "js")]);
        assert_eq!(analyzer.profile_for("pyx").map(|p| p.id), Some("python"));
        assert_eq!(analyzer.profile_for(".JSM").map(|p| p.id), Some("javascript"));
        assert!(analyzer.profile_for("zzz").is_none());
    }

    #[test]
    fn test_complexity_without_analyzer_is_an_error() {
        let report = analyzer().analyze_file(Path::new("Cargo.toml"), Operation::Complexity);
        assert_eq!(report.status, Status::Unsupported);

        let report = analyzer().analyze_file(Path::new("src/lib.rs"), Operation::Complexity);
        assert!(report.is_error());
        assert!(report.error.unwrap().contains("no complexity analyzer"));
    }

    #[test]
    fn test_missing_file_is_an_error_report() {
        let report = analyzer().analyze_file(Path::new("does/not/exist.py"), Operation::ReturnCount);
        assert!(report.is_error());
        assert!(report.error.unwrap().contains("exist.py"));
        assert_eq!(report.counts.returns, 0);
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let report = analyzer().analyze_file(Path::new("src"), Operation::CommentCount);
        assert!(report.is_error());
    }
}
