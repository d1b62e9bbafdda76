//! Error types for lexmetrics.
//!
//! `ProfileError` is raised while building the language registry and is only
//! ever fatal at startup. `AnalysisError` describes per-file failures; the
//! engine turns it into data on the report instead of propagating it.

use thiserror::Error;

/// A language profile that fails validation.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("profile {language:?} declares no declaration rules")]
    NoDeclarations { language: &'static str },
    #[error("profile {language:?} has an invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        language: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("profile {language:?} pattern {pattern:?} has no `name` capture group")]
    MissingNameGroup {
        language: &'static str,
        pattern: &'static str,
    },
    #[error("profile {language:?} uses keyword-pair blocks but defines no opening/closing words")]
    MissingKeywordPairs { language: &'static str },
    #[error("extension {extension:?} is claimed by both {first:?} and {second:?}")]
    DuplicateExtension {
        extension: String,
        first: &'static str,
        second: &'static str,
    },
}

/// A failure while analyzing a single file.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("not a regular file: {0}")]
    NotAFile(String),
    #[error("complexity analysis failed: {0}")]
    Complexity(String),
}
