//! Per-function return counting.
//!
//! Explicit returns are whole-word keyword hits on stripped lines. Languages
//! that return their last expression get one implicit return when the last
//! meaningful body line does not end in the statement terminator. That
//! inference is a line heuristic, so records built on a control-flow line or
//! on the inside of a nested block are flagged `lowConfidence`.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::ConstructRecord;
use crate::profile::{first_word, BlockStyle, CompiledProfile, ConstructKind};
use crate::scan::{Span, StrippedSource};

lazy_static! {
    static ref CLOSING_ONLY: Regex = Regex::new(r"^[\s})\];,]+$").unwrap();
}

const CONTROL_WORDS: &[&str] = &[
    "if", "else", "elif", "elsif", "unless", "for", "foreach", "while", "until", "loop",
    "match", "switch", "case", "when", "do", "try", "catch", "begin",
];

/// Return counts for every function span in a file.
#[derive(Debug, Clone, Default)]
pub struct ReturnTally {
    pub records: Vec<ConstructRecord>,
    pub functions: usize,
    pub total: usize,
    pub warnings: Vec<String>,
}

struct Implicit {
    counted: bool,
    low_confidence: bool,
    basis_line: Option<usize>,
}

impl Implicit {
    fn none() -> Self {
        Self {
            counted: false,
            low_confidence: false,
            basis_line: None,
        }
    }
}

pub fn count_returns(
    spans: &[Span],
    stripped: &StrippedSource,
    profile: &CompiledProfile,
) -> ReturnTally {
    let lines = stripped.line_texts();
    let mut tally = ReturnTally::default();

    for span in spans.iter().filter(|s| s.kind == ConstructKind::Function) {
        let explicit: usize = (span.start_line..=span.end_line)
            .filter_map(|n| lines.get(n - 1))
            .map(|line| profile.count_returns(line))
            .sum();

        let implicit = if span.expression_body {
            Implicit {
                counted: explicit == 0,
                ..Implicit::none()
            }
        } else if profile.implicit_return {
            infer_implicit(span, &lines, stripped, profile, explicit)
        } else {
            Implicit::none()
        };

        let returns = explicit + usize::from(implicit.counted);
        debug!(
            function = %span.name,
            explicit,
            implicit = implicit.counted,
            "counted returns"
        );

        if implicit.low_confidence {
            let basis = implicit.basis_line.unwrap_or(span.end_line);
            tally.warnings.push(format!(
                "implicit return for `{}` (line {}) inferred from line {}; count is approximate",
                span.name, span.start_line, basis
            ));
        }

        let mut record = ConstructRecord::from_span(span);
        record.extra.returns = Some(returns);
        record.extra.implicit_return = Some(implicit.counted);
        record.extra.low_confidence = implicit.low_confidence;

        tally.functions += 1;
        tally.total += returns;
        tally.records.push(record);
    }

    tally
}

fn infer_implicit(
    span: &Span,
    lines: &[&str],
    stripped: &StrippedSource,
    profile: &CompiledProfile,
    explicit: usize,
) -> Implicit {
    let mut skipped_nested_close = false;

    for n in (span.start_line + 1..=span.end_line).rev() {
        if !stripped.line_info(n).has_code {
            continue;
        }
        let text = lines.get(n - 1).map_or("", |l| l.trim());
        if is_closing_line(text, profile) {
            if n != span.end_line {
                skipped_nested_close = true;
            }
            continue;
        }

        if profile.count_returns(text) > 0 {
            return Implicit::none();
        }
        let info = stripped.line_info(n);
        if profile.terminator.is_some() && info.last_code_char == profile.terminator {
            return Implicit::none();
        }

        let control = first_word(text).map_or(false, |w| profile.word_in(w, CONTROL_WORDS));
        return Implicit {
            counted: true,
            low_confidence: control || skipped_nested_close,
            basis_line: Some(n),
        };
    }

    // No body lines: the declaration line holds the whole function.
    Implicit {
        counted: explicit == 0,
        ..Implicit::none()
    }
}

fn is_closing_line(text: &str, profile: &CompiledProfile) -> bool {
    if text.is_empty() {
        return false;
    }
    match profile.block_style {
        BlockStyle::Brace => CLOSING_ONLY.is_match(text),
        BlockStyle::KeywordPair => match (first_word(text), profile.keyword_pairs) {
            (Some(word), Some(pairs)) => profile.word_in(word, pairs.close),
            _ => CLOSING_ONLY.is_match(text),
        },
        BlockStyle::Indentation => false,
    }
}
