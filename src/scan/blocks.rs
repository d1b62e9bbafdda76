//! Declaration span extraction.
//!
//! Walks stripped lines and turns declaration matches into spans. Brace and
//! keyword-pair languages share one depth-counting walker; only the token
//! source differs. Indentation languages use the declaration line's indent
//! as the span base.

use serde::Serialize;

use super::strip::StrippedSource;
use crate::profile::{
    first_word, BlockStyle, CompiledProfile, ConstructKind, DeclarationMatch, KeywordPairs,
};

/// A declaration's line range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub kind: ConstructKind,
    pub keyword: String,
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Number of enclosing spans.
    pub depth: usize,
    /// Single-line `= expr` / `=> expr` body.
    pub expression_body: bool,
}

impl Span {
    fn new(decl: DeclarationMatch, start_line: usize, end_line: usize, depth: usize) -> Self {
        Self {
            kind: decl.kind,
            keyword: decl.keyword,
            name: decl.name,
            start_line,
            end_line: end_line.max(start_line),
            depth,
            expression_body: false,
        }
    }
}

/// Extract declaration spans, ordered by start line.
pub fn extract_spans(stripped: &StrippedSource, profile: &CompiledProfile) -> Vec<Span> {
    let lines = stripped.line_texts();
    let mut spans = match profile.block_style {
        BlockStyle::Indentation => indentation_spans(&lines, profile),
        BlockStyle::Brace | BlockStyle::KeywordPair => Delimited::new(profile).run(&lines),
    };
    spans.sort_by_key(|s| (s.start_line, s.depth));
    spans
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delim {
    Open,
    Close,
    Terminator,
    ParenOpen,
    ParenClose,
}

struct Pending {
    decl: DeclarationMatch,
    line: usize,
    depth: usize,
    nesting: usize,
    parens: i32,
    sig_end: Option<usize>,
    settled_lines: usize,
}

struct OpenSpan {
    decl: DeclarationMatch,
    line: usize,
    body_depth: usize,
    nesting: usize,
}

/// Depth-counting walker for brace and keyword-pair languages.
struct Delimited<'p> {
    profile: &'p CompiledProfile,
    /// Lines a declaration may wait for its body once its signature is complete.
    grace: usize,
    depth: usize,
    pending: Option<Pending>,
    open: Vec<OpenSpan>,
    spans: Vec<Span>,
}

impl<'p> Delimited<'p> {
    fn new(profile: &'p CompiledProfile) -> Self {
        Self {
            profile,
            grace: if profile.terminator.is_some() { 3 } else { 1 },
            depth: 0,
            pending: None,
            open: Vec::new(),
            spans: Vec::new(),
        }
    }

    fn run(mut self, lines: &[&str]) -> Vec<Span> {
        for (idx, line) in lines.iter().enumerate() {
            self.scan_line(idx + 1, line);
        }

        self.abandon_pending();
        let last = lines.len();
        while let Some(open) = self.open.pop() {
            self.spans
                .push(Span::new(open.decl, open.line, last, open.nesting));
        }
        self.spans
    }

    fn scan_line(&mut self, line_no: usize, line: &str) {
        let mut decl_start = 0;
        if let Some(decl) = self.profile.match_declaration(line) {
            self.abandon_pending();
            if self.profile.is_expression_body(&line[decl.name_end..]) {
                let mut span = Span::new(decl, line_no, line_no, self.open.len());
                span.expression_body = true;
                self.spans.push(span);
            } else {
                decl_start = decl.start;
                self.pending = Some(Pending {
                    decl,
                    line: line_no,
                    depth: self.depth,
                    nesting: self.open.len(),
                    parens: 0,
                    sig_end: None,
                    settled_lines: 0,
                });
            }
        }

        for (offset, delim) in delimiters(line, self.profile) {
            // Tokens before the declaration on its own line belong to the enclosing code.
            let for_pending = self
                .pending
                .as_ref()
                .map_or(false, |p| p.line != line_no || offset >= decl_start);

            match delim {
                Delim::Open => {
                    self.depth += 1;
                    if for_pending {
                        if let Some(p) = self.pending.take() {
                            self.open.push(OpenSpan {
                                decl: p.decl,
                                line: p.line,
                                body_depth: self.depth,
                                nesting: p.nesting,
                            });
                        }
                    }
                }
                Delim::Close => {
                    if self.open.last().map_or(false, |o| o.body_depth == self.depth) {
                        if let Some(o) = self.open.pop() {
                            self.spans.push(Span::new(o.decl, o.line, line_no, o.nesting));
                        }
                    }
                    self.depth = self.depth.saturating_sub(1);
                    if self.pending.as_ref().map_or(false, |p| self.depth < p.depth) {
                        self.abandon_pending();
                    }
                }
                Delim::Terminator => {
                    // Forward declaration or prototype: no body follows.
                    if for_pending && self.pending.as_ref().map_or(false, |p| p.parens <= 0) {
                        self.pending = None;
                    }
                }
                Delim::ParenOpen | Delim::ParenClose => {
                    if let (true, Some(p)) = (for_pending, self.pending.as_mut()) {
                        p.parens += if delim == Delim::ParenOpen { 1 } else { -1 };
                    }
                }
            }
        }

        let has_text = !line.trim().is_empty();
        let expired = match self.pending.as_mut() {
            Some(p) if p.parens <= 0 && (has_text || p.line == line_no) => {
                p.sig_end.get_or_insert(line_no);
                p.settled_lines += 1;
                p.settled_lines > self.grace
            }
            _ => false,
        };
        if expired {
            self.abandon_pending();
        }
    }

    /// Drop a declaration whose body never opened. In languages without a
    /// statement terminator a bodiless class (`data class P(val x: Int)`) is
    /// still a complete declaration and keeps a span over its signature.
    fn abandon_pending(&mut self) {
        let Some(p) = self.pending.take() else {
            return;
        };
        if p.decl.kind == ConstructKind::Class && self.profile.terminator.is_none() {
            let end = p.sig_end.unwrap_or(p.line);
            self.spans.push(Span::new(p.decl, p.line, end, p.nesting));
        }
    }
}

fn delimiters(line: &str, profile: &CompiledProfile) -> Vec<(usize, Delim)> {
    let braces = profile.block_style == BlockStyle::Brace;
    let mut events: Vec<(usize, Delim)> = line
        .char_indices()
        .filter_map(|(idx, c)| {
            let delim = match c {
                '(' | '[' => Delim::ParenOpen,
                ')' | ']' => Delim::ParenClose,
                '{' if braces => Delim::Open,
                '}' if braces => Delim::Close,
                c if Some(c) == profile.terminator => Delim::Terminator,
                _ => return None,
            };
            Some((idx, delim))
        })
        .collect();

    if let (BlockStyle::KeywordPair, Some(pairs)) = (profile.block_style, profile.keyword_pairs) {
        events.extend(keyword_events(line, profile, &pairs));
        events.sort_by_key(|(idx, _)| *idx);
    }
    events
}

/// Opening and closing words on a line.
fn keyword_events(line: &str, profile: &CompiledProfile, pairs: &KeywordPairs) -> Vec<(usize, Delim)> {
    let lead = first_word(line);
    let mut events = Vec::new();
    let mut after_close = false;

    for (start, word) in words(line) {
        let end = start + word.len();
        let swallow = std::mem::replace(&mut after_close, false);

        // Method calls, symbols, sigils and hash keys are not keywords.
        let prev = line[..start].chars().next_back();
        let next = line[end..].chars().next();
        if matches!(prev, Some('.' | ':' | '@' | '$'))
            || matches!(next, Some('?' | '!'))
            || (next == Some(':') && !line[end..].starts_with("::"))
        {
            continue;
        }

        if profile.word_in(word, pairs.close) {
            events.push((start, Delim::Close));
            after_close = true;
            continue;
        }

        let Some(pair) = pairs
            .open
            .iter()
            .find(|p| profile.word_in(word, &[p.word]))
        else {
            continue;
        };
        // `end do`, `end function`
        if swallow {
            continue;
        }
        if pair.statement_start && !at_statement_start(line, start) {
            continue;
        }
        if lead.map_or(false, |w| profile.word_in(w, pair.not_after)) {
            continue;
        }
        let after = line[end..].trim_start();
        if pair
            .not_before
            .iter()
            .any(|token| starts_with_token(after, token))
        {
            continue;
        }
        events.push((start, Delim::Open));
    }
    events
}

fn words(line: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (idx, c) in line.char_indices() {
        let ident = c.is_alphanumeric() || c == '_';
        match (ident, start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                out.push((s, &line[s..idx]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, &line[s..]));
    }
    out.into_iter()
}

fn at_statement_start(line: &str, start: usize) -> bool {
    let before = line[..start].trim_end();
    before.is_empty()
        || before.ends_with(|c: char| {
            matches!(c, '=' | '(' | ';' | '{' | '|' | '&' | '!' | '?' | ':' | ',' | '[')
        })
}

fn starts_with_token(text: &str, token: &str) -> bool {
    let Some(head) = text.get(..token.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(token) {
        return false;
    }
    // Digit tokens match label prefixes (`do 10`), so only words need a boundary.
    let word_token = token.chars().all(|c| c.is_alphabetic() || c == '_');
    !word_token
        || !text[token.len()..]
            .chars()
            .next()
            .map_or(false, |c| c.is_alphanumeric() || c == '_')
}

fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / 8 + 1) * 8,
            _ => break,
        }
    }
    width
}

/// Spans for indentation-delimited languages.
fn indentation_spans(lines: &[&str], profile: &CompiledProfile) -> Vec<Span> {
    struct Open {
        decl: DeclarationMatch,
        line: usize,
        indent: usize,
        nesting: usize,
    }

    let mut open: Vec<Open> = Vec::new();
    let mut spans = Vec::new();
    let mut last_code_line = 0;
    let mut brackets: i32 = 0;
    let mut continued = false;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let continuation = brackets > 0 || continued;
        for c in line.chars() {
            match c {
                '(' | '[' | '{' => brackets += 1,
                ')' | ']' | '}' => brackets = (brackets - 1).max(0),
                _ => {}
            }
        }
        continued = line.trim_end().ends_with('\\');

        if continuation {
            last_code_line = line_no;
            continue;
        }

        let indent = indent_width(line);
        while open.last().map_or(false, |o| indent <= o.indent) {
            if let Some(o) = open.pop() {
                spans.push(Span::new(o.decl, o.line, last_code_line, o.nesting));
            }
        }

        if let Some(decl) = profile.match_declaration(line) {
            open.push(Open {
                decl,
                line: line_no,
                indent,
                nesting: open.len(),
            });
        }
        last_code_line = line_no;
    }

    while let Some(o) = open.pop() {
        spans.push(Span::new(o.decl, o.line, last_code_line, o.nesting));
    }
    spans
}
