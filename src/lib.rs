//! lexmetrics - structural source metrics across many languages.
//!
//! Counts type declarations, comment lines and per-function return
//! statements without a grammar per language. A single data-driven lexical
//! pipeline handles brace, indentation and keyword-pair delimited languages,
//! and never counts text that sits inside a string literal or a comment.
//!
//! # Architecture
//!
//! - `profile`: static language profiles and the compiled registry
//! - `scan`: comment/string stripping and declaration span extraction
//! - `count`: class, comment-line and return counting over spans
//! - `engine`: per-file driver that always yields a `Report`
//! - `dom`: HTML element tree summary
//! - `complexity`: aggregation over an external complexity analyzer
//! - `config`: YAML configuration
//! - `report`: JSON and pretty output
//!
//! # Adding a New Language
//!
//! Add a `LanguageProfile` entry to `src/profile/languages.rs`. The registry
//! validates it on first use.

pub mod cli;
pub mod complexity;
pub mod config;
pub mod count;
pub mod dom;
pub mod engine;
pub mod error;
pub mod profile;
pub mod report;
pub mod scan;

pub use complexity::{
    ComplexityAnalysis, ComplexityAnalyzer, ComplexitySummary, FunctionComplexity, Thresholds,
};
pub use config::Config;
pub use count::{ConstructRecord, RecordExtra};
pub use dom::{DomNode, DomSummary};
pub use engine::Analyzer;
pub use error::{AnalysisError, ProfileError};
pub use profile::{CompiledProfile, ConstructKind, LanguageProfile, Registry};
pub use report::{Counts, Operation, Report, Status};
pub use scan::{extract_spans, strip, Span, StrippedSource};
