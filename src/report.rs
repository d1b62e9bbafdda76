//! Reports and output formatting.
//!
//! A `Report` is the only thing the engine ever returns for a file. Failures
//! are data on the report (`status`, `error`, `warnings`), never panics.
//!
//! Supports two output formats:
//! - JSON: camelCase structured output for the visualizer
//! - Pretty: colored terminal output for human readability

use std::fmt;

use colored::*;
use serde::{Deserialize, Serialize};

use crate::complexity::ComplexitySummary;
use crate::count::ConstructRecord;
use crate::dom::DomSummary;

/// What to compute for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    ClassCount,
    CommentCount,
    ReturnCount,
    DomSummary,
    Complexity,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ClassCount => "class-count",
            Operation::CommentCount => "comment-count",
            Operation::ReturnCount => "return-count",
            Operation::DomSummary => "dom-summary",
            Operation::Complexity => "complexity",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of analyzing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Unsupported,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Success => "success",
            Status::Unsupported => "unsupported",
            Status::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub classes: usize,
    pub comment_lines: usize,
    pub functions: usize,
    pub returns: usize,
    pub elements: usize,
}

/// Result for a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub file: String,
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub status: Status,
    pub counts: Counts,
    #[serde(default)]
    pub records: Vec<ConstructRecord>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dom: Option<DomSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<ComplexitySummary>,
}

impl Report {
    pub fn success(file: impl Into<String>, operation: Operation, language: &str) -> Self {
        Self {
            file: file.into(),
            operation,
            language: Some(language.to_string()),
            status: Status::Success,
            counts: Counts::default(),
            records: Vec::new(),
            warnings: Vec::new(),
            error: None,
            dom: None,
            complexity: None,
        }
    }

    /// Zero counts and a warning naming the extension. File content is never echoed.
    pub fn unsupported(file: impl Into<String>, operation: Operation, extension: &str) -> Self {
        let warning = if extension.is_empty() {
            format!("no file extension; {} is not supported", operation)
        } else {
            format!(
                "unsupported file type {:?} for {}",
                extension, operation
            )
        };
        Self {
            language: None,
            status: Status::Unsupported,
            warnings: vec![warning],
            ..Self::success(file, operation, "")
        }
    }

    pub fn error(file: impl Into<String>, operation: Operation, message: impl Into<String>) -> Self {
        Self {
            language: None,
            status: Status::Error,
            error: Some(message.into()),
            ..Self::success(file, operation, "")
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Render reports as JSON: one report as an object, several as an array.
pub fn to_json(reports: &[Report]) -> anyhow::Result<String> {
    let json = match reports {
        [single] => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(reports)?,
    };
    Ok(json)
}

/// Write reports in JSON format to stdout.
pub fn write_json(reports: &[Report]) -> anyhow::Result<()> {
    println!("{}", to_json(reports)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write reports in pretty (human-readable) format.
pub fn write_pretty(reports: &[Report]) {
    println!();
    print!("  ");
    print!("{}", "lexmetrics".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    for report in reports {
        write_report(report);
        println!();
    }

    write_totals(reports);
    println!();
}

fn write_report(report: &Report) {
    write_status_tag(report.status);
    print!(" {}", report.file.blue());
    if let Some(language) = &report.language {
        print!("  {}", format!("[{}]", language).dimmed());
    }
    println!();

    if let Some(error) = &report.error {
        println!("            {}", error.red());
    }

    if report.status == Status::Success {
        write_counts(report);
        for record in &report.records {
            write_record(record);
        }
        if let Some(dom) = &report.dom {
            println!(
                "            {} elements, max depth {}",
                dom.total_elements, dom.max_depth
            );
            for (tag, count) in &dom.element_counts {
                println!("              {:<12} {:>5}", tag.dimmed(), count);
            }
        }
        if let Some(summary) = &report.complexity {
            write_complexity(summary);
        }
    }

    for warning in &report.warnings {
        println!("            {} {}", "warning:".yellow(), warning);
    }
}

fn write_status_tag(status: Status) {
    match status {
        Status::Success => print!("    {}", "OK   ".green()),
        Status::Unsupported => print!("    {}", "SKIP ".yellow()),
        Status::Error => print!("    {}", "ERROR".red()),
    }
}

fn write_counts(report: &Report) {
    let c = &report.counts;
    let line = match report.operation {
        Operation::ClassCount => format!("{} classes", c.classes),
        Operation::CommentCount => format!("{} comment lines", c.comment_lines),
        Operation::ReturnCount => format!("{} returns in {} functions", c.returns, c.functions),
        Operation::DomSummary => format!("{} elements", c.elements),
        Operation::Complexity => format!("{} functions", c.functions),
    };
    println!("            {}", line.bold());
}

fn write_record(record: &ConstructRecord) {
    let mut line = format!(
        "              {:<10} {:<28}",
        record.keyword,
        record.name
    );
    line.push_str(&format!(" {}", format!("{}-{}", record.line, record.end_line).dimmed()));
    if let Some(returns) = record.extra.returns {
        line.push_str(&format!("  returns {}", returns));
        if record.extra.low_confidence {
            line.push_str(&format!(" {}", "(approx)".yellow()));
        }
    }
    if let Some(ccn) = record.extra.complexity {
        line.push_str(&format!("  ccn {}", colored_complexity(ccn)));
    }
    println!("{}", line);
}

fn colored_complexity(ccn: u32) -> ColoredString {
    match ccn {
        c if c > 25 => c.to_string().red().bold(),
        c if c > 10 => c.to_string().yellow(),
        c => c.to_string().green(),
    }
}

fn write_complexity(summary: &ComplexitySummary) {
    println!(
        "            avg {:.1}  max {}  high {}  critical {}",
        summary.average_complexity,
        summary.max_complexity,
        summary.high_complexity_functions,
        summary.critical_complexity_functions
    );
}

fn write_totals(reports: &[Report]) {
    let count = |status: Status| reports.iter().filter(|r| r.status == status).count();
    let totals = reports.iter().fold(Counts::default(), |mut acc, r| {
        acc.classes += r.counts.classes;
        acc.comment_lines += r.counts.comment_lines;
        acc.functions += r.counts.functions;
        acc.returns += r.counts.returns;
        acc.elements += r.counts.elements;
        acc
    });

    print!("  {}", format!("Files: {}", reports.len()).dimmed());
    print!("  {}", format!("{} ok", count(Status::Success)).green());
    print!("  {}", format!("{} skipped", count(Status::Unsupported)).yellow());
    let errors = count(Status::Error);
    if errors > 0 {
        print!("  {}", format!("{} failed", errors).red());
    } else {
        print!("  {}", "0 failed".dimmed());
    }
    println!();

    println!(
        "  {}",
        format!(
            "classes {}  comment lines {}  functions {}  returns {}  elements {}",
            totals.classes, totals.comment_lines, totals.functions, totals.returns, totals.elements
        )
        .dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_report_shape() {
        let report = Report::unsupported("a.bin", Operation::ClassCount, "bin");
        assert_eq!(report.status, Status::Unsupported);
        assert_eq!(report.counts, Counts::default());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let mut report = Report::success("a.py", Operation::CommentCount, "python");
        report.counts.comment_lines = 3;
        let json = to_json(&[report]).unwrap();
        assert!(json.contains("\"commentLines\": 3"));
        assert!(json.contains("\"operation\": \"comment-count\""));
        assert!(json.contains("\"status\": \"success\""));
        assert!(!json.contains("\"error\""));
        assert!(json.trim_start().starts_with('{'));
    }

    #[test]
    fn test_multiple_reports_render_as_array() {
        let reports = vec![
            Report::error("a.py", Operation::ReturnCount, "cannot read a.py"),
            Report::unsupported("b.xyz", Operation::ReturnCount, "xyz"),
        ];
        let json = to_json(&reports).unwrap();
        assert!(json.trim_start().starts_with('['));
        let parsed: Vec<Report> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].is_error());
    }
}
