//! Lexical scanning: stripping and block extraction.

pub mod blocks;
pub mod strip;

pub use blocks::{extract_spans, Span};
pub use strip::{strip, LineInfo, StrippedSource};
