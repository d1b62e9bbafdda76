//! Language profiles and the extension registry.
//!
//! A `LanguageProfile` is plain data: comment markers, string delimiters,
//! declaration patterns and the block style that decides how a declaration's
//! body ends. The scanning and counting code never branches on a language
//! name; it only reads these fields. Supporting a new language means adding
//! an entry to `languages.rs`.
//!
//! The `Registry` compiles every profile's patterns once and validates the
//! table. Validation failures are configuration bugs and surface when the
//! registry is built, never while a file is being scanned.

mod languages;

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

pub use languages::BUILTIN_PROFILES;

/// Kind of construct a declaration introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructKind {
    /// Classes and other type declarations (struct, interface, trait, ...).
    Class,
    /// Functions, methods and subroutines.
    Function,
}

impl ConstructKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructKind::Class => "class",
            ConstructKind::Function => "function",
        }
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the body of a declaration is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockStyle {
    /// `{` ... `}`
    Brace,
    /// Body is every following line indented deeper than the declaration.
    Indentation,
    /// Opening and closing words, e.g. `def` ... `end`.
    KeywordPair,
}

impl BlockStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockStyle::Brace => "brace",
            BlockStyle::Indentation => "indentation",
            BlockStyle::KeywordPair => "keyword-pair",
        }
    }
}

/// A block comment delimiter pair. Block comments never nest.
#[derive(Debug, Clone, Copy)]
pub struct BlockComment {
    pub open: &'static str,
    pub close: &'static str,
    /// Both delimiters only count when nothing but whitespace precedes them
    /// on the line (Ruby `=begin`/`=end`, Perl POD).
    pub line_start: bool,
}

impl BlockComment {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            line_start: false,
        }
    }

    pub const fn at_line_start(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            line_start: true,
        }
    }
}

/// A string literal delimiter.
#[derive(Debug, Clone, Copy)]
pub struct StringDelimiter {
    pub open: &'static str,
    pub close: &'static str,
    /// Escape character, if any. The character after it never closes the string.
    pub escape: Option<char>,
    /// Whether the literal may span lines. Single-line literals close at end of line.
    pub multiline: bool,
    /// Doc-strings are stripped like strings but counted as comment lines.
    pub doc: bool,
    /// Character literal (`'a'`, `'\n'`); anything else starting with the
    /// delimiter is left as code, so Rust lifetimes are not mistaken for strings.
    pub char_literal: bool,
}

impl StringDelimiter {
    /// Single-line string with backslash escapes.
    pub const fn quoted(quote: &'static str) -> Self {
        Self {
            open: quote,
            close: quote,
            escape: Some('\\'),
            multiline: false,
            doc: false,
            char_literal: false,
        }
    }

    /// Multi-line string with backslash escapes.
    pub const fn multiline(quote: &'static str) -> Self {
        Self {
            multiline: true,
            ..Self::quoted(quote)
        }
    }

    /// Multi-line string without escapes.
    pub const fn raw(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            escape: None,
            multiline: true,
            doc: false,
            char_literal: false,
        }
    }

    /// Triple-quoted doc-string.
    pub const fn doc(quote: &'static str) -> Self {
        Self {
            doc: true,
            ..Self::multiline(quote)
        }
    }

    /// Single-quoted character literal.
    pub const fn char_literal() -> Self {
        Self {
            char_literal: true,
            ..Self::quoted("'")
        }
    }
}

/// A declaration pattern.
///
/// `pattern` is matched against a stripped line and must contain a `name`
/// capture group. An optional `keyword` group overrides the static keyword
/// label, so one rule can cover `class|struct|interface`.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationRule {
    pub kind: ConstructKind,
    pub keyword: &'static str,
    pub pattern: &'static str,
}

impl DeclarationRule {
    pub const fn class(keyword: &'static str, pattern: &'static str) -> Self {
        Self {
            kind: ConstructKind::Class,
            keyword,
            pattern,
        }
    }

    pub const fn function(keyword: &'static str, pattern: &'static str) -> Self {
        Self {
            kind: ConstructKind::Function,
            keyword,
            pattern,
        }
    }
}

/// An opening word for keyword-pair blocks.
#[derive(Debug, Clone, Copy)]
pub struct PairWord {
    pub word: &'static str,
    /// Only opens when it starts a statement (Ruby's modifier `if` does not).
    pub statement_start: bool,
    /// Ignored when the line's first word is one of these.
    pub not_after: &'static [&'static str],
    /// Ignored when the text right after the word starts with one of these.
    pub not_before: &'static [&'static str],
}

impl PairWord {
    pub const fn new(word: &'static str) -> Self {
        Self {
            word,
            statement_start: false,
            not_after: &[],
            not_before: &[],
        }
    }

    pub const fn statement(word: &'static str) -> Self {
        Self {
            statement_start: true,
            ..Self::new(word)
        }
    }
}

/// Opening and closing words of a keyword-pair language.
#[derive(Debug, Clone, Copy)]
pub struct KeywordPairs {
    pub open: &'static [PairWord],
    pub close: &'static [&'static str],
}

/// Lexical rules for one language family.
#[derive(Debug, Clone, Copy)]
pub struct LanguageProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub line_comments: &'static [&'static str],
    /// Line comment markers that only count in the first column
    /// (fixed-form Fortran `C` and `*`).
    pub column_comments: &'static [&'static str],
    pub block_comments: &'static [BlockComment],
    pub strings: &'static [StringDelimiter],
    /// Heredoc openers such as `<<~` or `<<<`. The tag follows the opener,
    /// bare or quoted, and the body runs from the next line up to a line
    /// holding only the tag.
    pub heredocs: &'static [&'static str],
    pub declarations: &'static [DeclarationRule],
    pub block_style: BlockStyle,
    pub keyword_pairs: Option<KeywordPairs>,
    pub return_keyword: Option<&'static str>,
    /// The last expression of a function body is its return value.
    pub implicit_return: bool,
    pub terminator: Option<char>,
    pub case_insensitive: bool,
    /// A declaration match whose name is one of these is rejected.
    pub reserved_names: &'static [&'static str],
    /// A line whose first word is one of these never declares anything.
    pub statement_words: &'static [&'static str],
    /// Matched against the text after a declaration's name; a match marks a
    /// single-line expression body (`fun f() = 1`, `const f = () => 1`).
    pub expression_body: Option<&'static str>,
}

impl LanguageProfile {
    /// Base value for profile definitions.
    pub const EMPTY: LanguageProfile = LanguageProfile {
        id: "",
        name: "",
        extensions: &[],
        line_comments: &[],
        column_comments: &[],
        block_comments: &[],
        strings: &[],
        heredocs: &[],
        declarations: &[],
        block_style: BlockStyle::Brace,
        keyword_pairs: None,
        return_keyword: Some("return"),
        implicit_return: false,
        terminator: None,
        case_insensitive: false,
        reserved_names: &[],
        statement_words: &[],
        expression_body: None,
    };
}

/// A declaration found on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationMatch {
    pub kind: ConstructKind,
    pub keyword: String,
    pub name: String,
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset where the match ends.
    pub end: usize,
    /// Byte offset right after the name.
    pub name_end: usize,
}

struct CompiledRule {
    rule: &'static DeclarationRule,
    regex: Regex,
}

/// A profile with its patterns compiled.
pub struct CompiledProfile {
    profile: &'static LanguageProfile,
    rules: Vec<CompiledRule>,
    return_pattern: Option<Regex>,
    expression_body: Option<Regex>,
}

impl Deref for CompiledProfile {
    type Target = LanguageProfile;

    fn deref(&self) -> &LanguageProfile {
        self.profile
    }
}

impl fmt::Debug for CompiledProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledProfile")
            .field("id", &self.profile.id)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl CompiledProfile {
    /// Compile and validate a profile.
    pub fn compile(profile: &'static LanguageProfile) -> Result<Self, ProfileError> {
        if profile.declarations.is_empty() {
            return Err(ProfileError::NoDeclarations {
                language: profile.id,
            });
        }

        if profile.block_style == BlockStyle::KeywordPair {
            let ok = profile
                .keyword_pairs
                .map(|p| !p.open.is_empty() && !p.close.is_empty())
                .unwrap_or(false);
            if !ok {
                return Err(ProfileError::MissingKeywordPairs {
                    language: profile.id,
                });
            }
        }

        let rules = profile
            .declarations
            .iter()
            .map(|rule| {
                let regex = build_regex(profile, rule.pattern)?;
                if !regex.capture_names().flatten().any(|n| n == "name") {
                    return Err(ProfileError::MissingNameGroup {
                        language: profile.id,
                        pattern: rule.pattern,
                    });
                }
                Ok(CompiledRule { rule, regex })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let return_pattern = profile
            .return_keyword
            .map(|kw| build_regex(profile, &format!(r"\b{}\b", regex::escape(kw))))
            .transpose()?;

        let expression_body = profile
            .expression_body
            .map(|p| build_regex(profile, p))
            .transpose()?;

        Ok(Self {
            profile,
            rules,
            return_pattern,
            expression_body,
        })
    }

    pub fn profile(&self) -> &'static LanguageProfile {
        self.profile
    }

    /// Find the declaration on a stripped line, if any.
    ///
    /// When several rules match, the longest match wins, so `export default
    /// class` beats a bare `class` rule and a line never declares twice.
    pub fn match_declaration(&self, line: &str) -> Option<DeclarationMatch> {
        if let Some(word) = first_word(line) {
            if self.word_in(word, self.profile.statement_words) {
                return None;
            }
        }

        let mut best: Option<(usize, DeclarationMatch)> = None;
        for compiled in &self.rules {
            let Some(caps) = compiled.regex.captures(line) else {
                continue;
            };
            let Some(name) = caps.name("name") else {
                continue;
            };
            if name.as_str().is_empty() || self.word_in(name.as_str(), self.profile.reserved_names)
            {
                continue;
            }
            let Some(whole) = caps.get(0) else {
                continue;
            };

            let len = whole.end() - whole.start();
            if best.as_ref().map_or(true, |(best_len, _)| len > *best_len) {
                let keyword = caps
                    .name("keyword")
                    .map(|m| m.as_str().to_lowercase())
                    .unwrap_or_else(|| compiled.rule.keyword.to_string());
                best = Some((
                    len,
                    DeclarationMatch {
                        kind: compiled.rule.kind,
                        keyword,
                        name: name.as_str().to_string(),
                        start: whole.start(),
                        end: whole.end(),
                        name_end: name.end(),
                    },
                ));
            }
        }

        best.map(|(_, m)| m)
    }

    /// Count whole-word return keywords on a stripped line.
    pub fn count_returns(&self, line: &str) -> usize {
        self.return_pattern
            .as_ref()
            .map(|re| re.find_iter(line).count())
            .unwrap_or(0)
    }

    /// Whether the text after a declaration's name is a single-expression body.
    pub fn is_expression_body(&self, rest: &str) -> bool {
        self.expression_body
            .as_ref()
            .map(|re| re.is_match(rest))
            .unwrap_or(false)
    }

    /// Compare a word against a list, honoring the profile's case rules.
    pub fn word_in(&self, word: &str, list: &[&str]) -> bool {
        if self.profile.case_insensitive {
            list.iter().any(|w| w.eq_ignore_ascii_case(word))
        } else {
            list.contains(&word)
        }
    }
}

fn build_regex(profile: &'static LanguageProfile, pattern: &str) -> Result<Regex, ProfileError> {
    let source = if profile.case_insensitive {
        format!("(?i){}", pattern)
    } else {
        pattern.to_string()
    };
    Regex::new(&source).map_err(|source| ProfileError::InvalidPattern {
        language: profile.id,
        pattern: pattern.to_string(),
        source,
    })
}

/// Leading identifier of a line, ignoring indentation.
pub fn first_word(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let end = trimmed
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(trimmed.len());
    if end == 0 {
        None
    } else {
        Some(&trimmed[..end])
    }
}

/// Compiled, validated set of language profiles keyed by extension.
#[derive(Debug)]
pub struct Registry {
    profiles: Vec<CompiledProfile>,
    by_extension: HashMap<String, usize>,
}

static BUILTIN: OnceCell<Registry> = OnceCell::new();

impl Registry {
    /// Build a registry from a static profile table.
    pub fn from_profiles(profiles: &'static [LanguageProfile]) -> Result<Self, ProfileError> {
        let mut compiled = Vec::with_capacity(profiles.len());
        let mut by_extension: HashMap<String, usize> = HashMap::new();

        for (idx, profile) in profiles.iter().enumerate() {
            compiled.push(CompiledProfile::compile(profile)?);
            for ext in profile.extensions {
                let key = normalize_extension(ext);
                if let Some(&prev) = by_extension.get(&key) {
                    return Err(ProfileError::DuplicateExtension {
                        extension: key,
                        first: profiles[prev].id,
                        second: profile.id,
                    });
                }
                by_extension.insert(key, idx);
            }
        }

        Ok(Self {
            profiles: compiled,
            by_extension,
        })
    }

    /// The built-in registry, compiled and validated on first use.
    pub fn builtin() -> Result<&'static Registry, ProfileError> {
        BUILTIN.get_or_try_init(|| Registry::from_profiles(BUILTIN_PROFILES))
    }

    /// Look up a profile by file extension (case-insensitive, leading dot optional).
    pub fn for_extension(&self, ext: &str) -> Option<&CompiledProfile> {
        self.by_extension
            .get(&normalize_extension(ext))
            .map(|&idx| &self.profiles[idx])
    }

    /// Look up a profile by its id (e.g. "python").
    pub fn by_id(&self, id: &str) -> Option<&CompiledProfile> {
        self.profiles
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
    }

    /// Resolve an extension or profile id.
    pub fn resolve(&self, key: &str) -> Option<&CompiledProfile> {
        self.for_extension(key).or_else(|| self.by_id(key))
    }

    pub fn profiles(&self) -> impl Iterator<Item = &CompiledProfile> {
        self.profiles.iter()
    }
}

/// Lower-case an extension and drop a leading dot.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}
