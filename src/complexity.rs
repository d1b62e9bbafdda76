//! Cyclomatic complexity aggregation.
//!
//! Measuring complexity needs a real parser, so it stays behind the
//! `ComplexityAnalyzer` boundary: an external tool is run as a subprocess, or
//! its saved JSON output is read back. This module only owns the boundary
//! types and the summary arithmetic.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;

pub const DEFAULT_HIGH_THRESHOLD: u32 = 10;
pub const DEFAULT_CRITICAL_THRESHOLD: u32 = 25;

/// Per-function metrics reported by the external analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionComplexity {
    pub name: String,
    #[serde(alias = "lineStart")]
    pub start_line: usize,
    #[serde(alias = "lineEnd")]
    pub end_line: usize,
    #[serde(default)]
    pub line_count: usize,
    #[serde(alias = "complexity")]
    pub cyclomatic_complexity: u32,
    #[serde(default, alias = "parameters")]
    pub parameter_count: u32,
    #[serde(default)]
    pub max_nesting_depth: u32,
}

/// Analyzer output for one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityAnalysis {
    pub lines_of_code: usize,
    pub functions: Vec<FunctionComplexity>,
}

/// Accepts both the flat form and the `{file: {nloc}, functions, error}`
/// wrapper form written by the analyzer scripts.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    lines_of_code: Option<usize>,
    #[serde(default)]
    file: Option<RawFile>,
    #[serde(default)]
    functions: Vec<FunctionComplexity>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct RawFile {
    #[serde(default)]
    nloc: usize,
}

impl ComplexityAnalysis {
    /// Parse analyzer JSON output.
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let raw: RawAnalysis = serde_json::from_str(json)
            .map_err(|e| AnalysisError::Complexity(format!("invalid analyzer output: {}", e)))?;
        if let Some(error) = raw.error {
            return Err(AnalysisError::Complexity(error));
        }
        let lines_of_code = raw
            .lines_of_code
            .or_else(|| raw.file.map(|f| f.nloc))
            .unwrap_or(0);
        let functions = raw
            .functions
            .into_iter()
            .map(|mut f| {
                if f.line_count == 0 {
                    f.line_count = f.end_line.saturating_sub(f.start_line) + 1;
                }
                f
            })
            .collect();
        Ok(Self {
            lines_of_code,
            functions,
        })
    }
}

/// Thresholds for counting high and critical functions (strictly greater than).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub high: u32,
    pub critical: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_THRESHOLD,
            critical: DEFAULT_CRITICAL_THRESHOLD,
        }
    }
}

/// Aggregate metrics over a file's functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexitySummary {
    pub lines_of_code: usize,
    pub function_count: usize,
    pub average_complexity: f64,
    pub max_complexity: u32,
    pub high_complexity_functions: usize,
    pub critical_complexity_functions: usize,
}

/// Summarize an analysis. An empty function list gives all zeros.
pub fn summarize(analysis: &ComplexityAnalysis, thresholds: Thresholds) -> ComplexitySummary {
    let functions = &analysis.functions;
    if functions.is_empty() {
        return ComplexitySummary {
            lines_of_code: analysis.lines_of_code,
            ..ComplexitySummary::default()
        };
    }

    let total: u64 = functions
        .iter()
        .map(|f| u64::from(f.cyclomatic_complexity))
        .sum();
    let average = total as f64 / functions.len() as f64;

    ComplexitySummary {
        lines_of_code: analysis.lines_of_code,
        function_count: functions.len(),
        average_complexity: (average * 10.0).round() / 10.0,
        max_complexity: functions
            .iter()
            .map(|f| f.cyclomatic_complexity)
            .max()
            .unwrap_or(0),
        high_complexity_functions: functions
            .iter()
            .filter(|f| f.cyclomatic_complexity > thresholds.high)
            .count(),
        critical_complexity_functions: functions
            .iter()
            .filter(|f| f.cyclomatic_complexity > thresholds.critical)
            .count(),
    }
}

/// Source of per-function complexity metrics.
pub trait ComplexityAnalyzer: Send + Sync {
    /// Analyze one file.
    fn analyze(&self, path: &Path) -> Result<ComplexityAnalysis, AnalysisError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Runs an external command with the file path appended and parses its stdout.
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
}

impl CommandAnalyzer {
    /// Build from a command line split into words, e.g. `["python3", "lizard_analyzer.py"]`.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl ComplexityAnalyzer for CommandAnalyzer {
    fn analyze(&self, path: &Path) -> Result<ComplexityAnalysis, AnalysisError> {
        debug!(program = %self.program, path = %path.display(), "running complexity analyzer");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| {
                AnalysisError::Complexity(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AnalysisError::Complexity(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        ComplexityAnalysis::from_json(&String::from_utf8_lossy(&output.stdout))
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Reads analyzer output saved next to the sources as `<file>.complexity.json`.
#[derive(Debug, Clone, Default)]
pub struct SavedJsonAnalyzer;

impl ComplexityAnalyzer for SavedJsonAnalyzer {
    fn analyze(&self, path: &Path) -> Result<ComplexityAnalysis, AnalysisError> {
        let saved = saved_analysis_path(path);
        let json = fs::read_to_string(&saved).map_err(|source| AnalysisError::Io {
            path: saved.display().to_string(),
            source,
        })?;
        ComplexityAnalysis::from_json(&json)
    }

    fn name(&self) -> &str {
        "saved-json"
    }
}

/// Locate a saved analysis for a source file: `<file>.complexity.json`.
pub fn saved_analysis_path(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_owned();
    name.push(".complexity.json");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn func(name: &str, ccn: u32) -> FunctionComplexity {
        FunctionComplexity {
            name: name.to_string(),
            start_line: 1,
            end_line: 5,
            line_count: 5,
            cyclomatic_complexity: ccn,
            parameter_count: 0,
            max_nesting_depth: 0,
        }
    }

    #[test]
    fn test_summary_arithmetic() {
        let analysis = ComplexityAnalysis {
            lines_of_code: 120,
            functions: vec![func("a", 1), func("b", 12), func("c", 30)],
        };
        let summary = summarize(&analysis, Thresholds::default());
        assert_eq!(summary.function_count, 3);
        assert_eq!(summary.average_complexity, 14.3);
        assert_eq!(summary.max_complexity, 30);
        assert_eq!(summary.high_complexity_functions, 2);
        assert_eq!(summary.critical_complexity_functions, 1);
        assert_eq!(summary.lines_of_code, 120);
    }

    #[test]
    fn test_threshold_is_strict() {
        let analysis = ComplexityAnalysis {
            lines_of_code: 0,
            functions: vec![func("a", 10), func("b", 25)],
        };
        let summary = summarize(&analysis, Thresholds::default());
        assert_eq!(summary.high_complexity_functions, 1);
        assert_eq!(summary.critical_complexity_functions, 0);
    }

    #[test]
    fn test_empty_analysis_is_all_zero() {
        let summary = summarize(&ComplexityAnalysis::default(), Thresholds::default());
        assert_eq!(summary, ComplexitySummary::default());
    }

    #[test]
    fn test_parses_wrapper_form() {
        let json = r#"{
            "file": {"path": "x.py", "nloc": 42, "functionCount": 1},
            "functions": [{"name": "f", "lineStart": 3, "lineEnd": 9,
                           "complexity": 4, "parameters": 2, "maxNestingDepth": 1}],
            "status": "success"
        }"#;
        let analysis = ComplexityAnalysis::from_json(json).unwrap();
        assert_eq!(analysis.lines_of_code, 42);
        assert_eq!(analysis.functions[0].cyclomatic_complexity, 4);
        assert_eq!(analysis.functions[0].parameter_count, 2);
        assert_eq!(analysis.functions[0].line_count, 7);
    }

    #[test]
    fn test_analyzer_error_is_reported() {
        let err = ComplexityAnalysis::from_json(r#"{"error": "lizard not installed"}"#).unwrap_err();
        assert!(err.to_string().contains("lizard not installed"));
    }

    #[test]
    fn test_saved_json_analyzer() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.py");
        fs::write(
            temp.path().join("a.py.complexity.json"),
            r#"{"linesOfCode": 10, "functions": [{"name": "g", "startLine": 1, "endLine": 2, "cyclomaticComplexity": 3}]}"#,
        )
        .unwrap();
        let analysis = SavedJsonAnalyzer.analyze(&source).unwrap();
        assert_eq!(analysis.lines_of_code, 10);
        assert_eq!(analysis.functions.len(), 1);
    }

    #[test]
    fn test_missing_saved_analysis_names_the_json_path() {
        let temp = TempDir::new().unwrap();
        let err = SavedJsonAnalyzer.analyze(&temp.path().join("b.py")).unwrap_err();
        assert!(err.to_string().contains("b.py.complexity.json"));
    }

    #[test]
    fn test_saved_analysis_path() {
        assert_eq!(
            saved_analysis_path(Path::new("src/a.py")),
            PathBuf::from("src/a.py.complexity.json")
        );
    }

    #[test]
    fn test_command_analyzer_requires_program() {
        assert!(CommandAnalyzer::new(&[]).is_none());
        let analyzer = CommandAnalyzer::new(&["lizard-json".to_string()]).unwrap();
        assert_eq!(analyzer.name(), "lizard-json");
    }
}
