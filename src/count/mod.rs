//! Terminal counting stages: classes, comment lines and returns.

pub mod classes;
pub mod comments;
pub mod returns;

use serde::{Deserialize, Serialize};

use crate::profile::ConstructKind;
use crate::scan::Span;

pub use classes::count_classes;
pub use comments::count_comment_lines;
pub use returns::{count_returns, ReturnTally};

/// One detected construct in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructRecord {
    pub name: String,
    pub kind: ConstructKind,
    pub keyword: String,
    pub line: usize,
    pub end_line: usize,
    #[serde(flatten)]
    pub extra: RecordExtra,
}

impl ConstructRecord {
    pub fn from_span(span: &Span) -> Self {
        Self {
            name: span.name.clone(),
            kind: span.kind,
            keyword: span.keyword.clone(),
            line: span.start_line,
            end_line: span.end_line,
            extra: RecordExtra::default(),
        }
    }
}

/// Operation-specific record fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordExtra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit_return: Option<bool>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub low_confidence: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nesting_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
}
