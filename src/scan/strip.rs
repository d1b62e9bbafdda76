//! Comment and string-literal stripping.
//!
//! `strip` replaces every character inside a string literal or comment with
//! spaces, one per UTF-8 byte, and keeps line terminators. The output has the
//! same byte length and line count as the input, so byte offsets and line
//! numbers found in the stripped text are valid in the original.

use std::collections::BTreeSet;

use crate::profile::{BlockComment, LanguageProfile, StringDelimiter};

/// Per-line facts recorded while stripping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineInfo {
    /// The line has non-whitespace text outside comments and doc-strings.
    pub has_code: bool,
    /// Last non-whitespace character outside comments and doc-strings.
    pub last_code_char: Option<char>,
}

/// Source text with string and comment content blanked out.
#[derive(Debug, Clone)]
pub struct StrippedSource {
    text: String,
    comment_lines: BTreeSet<usize>,
    lines: Vec<LineInfo>,
}

impl StrippedSource {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stripped lines, split the way `str::lines` splits.
    pub fn line_texts(&self) -> Vec<&str> {
        self.text.lines().collect()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 1-based numbers of lines that are wholly or partly comment.
    pub fn comment_lines(&self) -> &BTreeSet<usize> {
        &self.comment_lines
    }

    /// Facts for a 1-based line. Out-of-range lines are empty.
    pub fn line_info(&self, line: usize) -> LineInfo {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
enum State<'p> {
    Code,
    LineComment,
    Block(&'p BlockComment),
    Str(&'p StringDelimiter),
    /// Heredoc body, up to a line holding only the tag.
    Heredoc(&'p str),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mask {
    Comment,
    Str,
}

#[derive(Clone, Copy)]
enum Opener<'p> {
    Line,
    Block(&'p BlockComment),
    Str(&'p StringDelimiter),
    CharLiteral,
    Heredoc(&'p str),
}

struct Stripper {
    out: String,
    comment_lines: BTreeSet<usize>,
    lines: Vec<LineInfo>,
    current: LineInfo,
    line: usize,
    at_line_start: bool,
    pending_bytes: usize,
}

impl Stripper {
    fn new(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            comment_lines: BTreeSet::new(),
            lines: Vec::new(),
            current: LineInfo::default(),
            line: 1,
            at_line_start: true,
            pending_bytes: 0,
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.lines.push(self.current);
        self.current = LineInfo::default();
        self.line += 1;
        self.at_line_start = true;
        self.pending_bytes = 0;
    }

    fn code(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        self.out.push(c);
        self.pending_bytes += c.len_utf8();
        if !c.is_whitespace() {
            self.current.has_code = true;
            self.current.last_code_char = Some(c);
            self.at_line_start = false;
        }
    }

    fn blank(&mut self, text: &str, mask: Mask) {
        for c in text.chars() {
            if mask == Mask::Comment {
                self.comment_lines.insert(self.line);
            }
            match c {
                '\n' => self.newline(),
                '\r' => {
                    self.out.push('\r');
                    self.pending_bytes += 1;
                }
                _ => {
                    for _ in 0..c.len_utf8() {
                        self.out.push(' ');
                    }
                    self.pending_bytes += c.len_utf8();
                    if !c.is_whitespace() {
                        self.at_line_start = false;
                        if mask == Mask::Str {
                            self.current.has_code = true;
                            self.current.last_code_char = Some(c);
                        }
                    }
                }
            }
        }
    }

    fn finish(mut self) -> StrippedSource {
        if self.pending_bytes > 0 {
            self.lines.push(self.current);
        }
        StrippedSource {
            text: self.out,
            comment_lines: self.comment_lines,
            lines: self.lines,
        }
    }
}

/// Strip comments and string literals from `source`.
pub fn strip(source: &str, profile: &LanguageProfile) -> StrippedSource {
    let mut s = Stripper::new(source.len());
    let mut state = State::Code;
    // Heredoc opened on the current line; its body starts on the next one.
    let mut heredoc: Option<&str> = None;
    let mut i = 0;

    while i < source.len() {
        let rest = &source[i..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        match state {
            State::Code => match find_opener(
                source,
                i,
                profile,
                s.at_line_start,
                s.pending_bytes == 0,
            ) {
                Some((opener, len)) => {
                    let text = &rest[..len];
                    match opener {
                        Opener::Line => {
                            s.blank(text, Mask::Comment);
                            state = State::LineComment;
                        }
                        Opener::Block(block) => {
                            s.blank(text, Mask::Comment);
                            state = State::Block(block);
                        }
                        Opener::Str(delim) => {
                            s.blank(text, string_mask(delim));
                            state = State::Str(delim);
                        }
                        Opener::CharLiteral => s.blank(text, Mask::Str),
                        Opener::Heredoc(tag) => {
                            s.blank(text, Mask::Str);
                            heredoc = Some(tag);
                        }
                    }
                    i += len;
                }
                None => {
                    s.code(c);
                    i += c.len_utf8();
                    if c == '\n' {
                        state = heredoc.take().map_or(State::Code, State::Heredoc);
                    }
                }
            },
            State::LineComment => {
                if c == '\n' {
                    s.code(c);
                    state = heredoc.take().map_or(State::Code, State::Heredoc);
                } else {
                    s.blank(&rest[..c.len_utf8()], Mask::Comment);
                }
                i += c.len_utf8();
            }
            State::Block(block) => {
                if rest.starts_with(block.close) && (!block.line_start || s.at_line_start) {
                    s.blank(block.close, Mask::Comment);
                    i += block.close.len();
                    state = State::Code;
                } else {
                    s.blank(&rest[..c.len_utf8()], Mask::Comment);
                    i += c.len_utf8();
                }
            }
            State::Str(delim) => {
                let mask = string_mask(delim);
                if delim.escape == Some(c) {
                    let mut len = c.len_utf8();
                    if let Some(next) = rest[len..].chars().next() {
                        len += next.len_utf8();
                    }
                    s.blank(&rest[..len], mask);
                    i += len;
                } else if rest.starts_with(delim.close) {
                    s.blank(delim.close, mask);
                    i += delim.close.len();
                    state = State::Code;
                } else if c == '\n' && !delim.multiline {
                    s.code(c);
                    i += 1;
                    state = heredoc.take().map_or(State::Code, State::Heredoc);
                } else {
                    s.blank(&rest[..c.len_utf8()], mask);
                    i += c.len_utf8();
                }
            }
            State::Heredoc(tag) => {
                let close = if s.at_line_start {
                    heredoc_close(rest, tag)
                } else {
                    None
                };
                match close {
                    Some(indent) => {
                        for w in rest[..indent].chars() {
                            s.code(w);
                        }
                        s.blank(tag, Mask::Str);
                        i += indent + tag.len();
                        state = State::Code;
                    }
                    None => {
                        s.blank(&rest[..c.len_utf8()], Mask::Str);
                        i += c.len_utf8();
                    }
                }
            }
        }
    }

    s.finish()
}

fn string_mask(delim: &StringDelimiter) -> Mask {
    if delim.doc {
        Mask::Comment
    } else {
        Mask::Str
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Pick the longest comment or string opener at byte offset `i`.
///
/// Returns the opener and how many bytes it consumes: the marker itself, the
/// whole literal for character literals, or the opener and tag of a heredoc.
fn find_opener<'p>(
    source: &'p str,
    i: usize,
    profile: &'p LanguageProfile,
    at_line_start: bool,
    at_column_one: bool,
) -> Option<(Opener<'p>, usize)> {
    let rest = &source[i..];
    let prev = source[..i].chars().next_back();
    let boundary_ok = |marker: &str| match marker.chars().next() {
        Some(first) if is_ident_char(first) => !prev.map_or(false, is_ident_char),
        _ => true,
    };

    let mut best: Option<(Opener<'p>, usize, usize)> = None;
    let mut consider = |opener: Opener<'p>, marker_len: usize, consumed: usize| {
        if best.map_or(true, |(_, len, _)| marker_len > len) {
            best = Some((opener, marker_len, consumed));
        }
    };

    for block in profile.block_comments {
        if rest.starts_with(block.open)
            && (!block.line_start || at_line_start)
            && boundary_ok(block.open)
        {
            consider(Opener::Block(block), block.open.len(), block.open.len());
        }
    }

    for marker in profile.line_comments {
        if rest.starts_with(marker) && boundary_ok(marker) {
            consider(Opener::Line, marker.len(), marker.len());
        }
    }

    if at_column_one {
        for marker in profile.column_comments {
            if rest.starts_with(marker) {
                consider(Opener::Line, marker.len(), marker.len());
            }
        }
    }

    for marker in profile.heredocs {
        if let Some(len) = rest.strip_prefix(marker).and_then(heredoc_tag_len) {
            let tag = heredoc_tag(&rest[marker.len()..marker.len() + len]);
            consider(Opener::Heredoc(tag), marker.len() + len, marker.len() + len);
        }
    }

    for delim in profile.strings {
        if !rest.starts_with(delim.open) || !boundary_ok(delim.open) {
            continue;
        }
        if delim.char_literal {
            if let Some(len) = char_literal_len(rest) {
                consider(Opener::CharLiteral, delim.open.len(), len);
            }
        } else {
            consider(Opener::Str(delim), delim.open.len(), delim.open.len());
        }
    }

    best.map(|(opener, _, consumed)| (opener, consumed))
}

/// Length of a heredoc tag at the start of `text`, quotes included.
///
/// Bare tags must start with an upper-case letter or `_`, so `a << b` and
/// `list <<item` stay code.
fn heredoc_tag_len(text: &str) -> Option<usize> {
    let quote = text.chars().next().filter(|c| matches!(c, '\'' | '"' | '`'));
    let start = quote.map_or(0, char::len_utf8);
    let ident = text[start..]
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(text.len() - start);
    if ident == 0 {
        return None;
    }
    let end = start + ident;
    match quote {
        Some(q) => text[end..].starts_with(q).then_some(end + q.len_utf8()),
        None => text
            .starts_with(|c: char| c.is_ascii_uppercase() || c == '_')
            .then_some(end),
    }
}

fn heredoc_tag(quoted: &str) -> &str {
    quoted.trim_matches(|c| matches!(c, '\'' | '"' | '`'))
}

/// Byte length of the indentation before a closing heredoc tag, or `None`
/// when the line at `rest` does not close the heredoc. PHP allows `;`, `,`
/// or `)` right after the tag.
fn heredoc_close(rest: &str, tag: &str) -> Option<usize> {
    let body = rest.trim_start_matches([' ', '\t']);
    let after = body.strip_prefix(tag)?;
    let tail = after.lines().next().unwrap_or("").trim();
    if tail.is_empty() || tail.starts_with([';', ',', ')']) {
        Some(rest.len() - body.len())
    } else {
        None
    }
}

/// Length of a character literal at the start of `rest`, or `None` when the
/// quote starts something else (a lifetime or a label).
fn char_literal_len(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices().skip(1);
    match chars.next()? {
        (_, '\\') => {
            for (idx, c) in chars.take(10) {
                match c {
                    '\'' => return Some(idx + 1),
                    '\n' => return None,
                    _ => {}
                }
            }
            None
        }
        (_, '\'') | (_, '\n') => None,
        _ => match chars.next()? {
            (idx, '\'') => Some(idx + 1),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Registry;

    fn profile(ext: &str) -> &'static LanguageProfile {
        Registry::builtin()
            .unwrap()
            .for_extension(ext)
            .unwrap()
            .profile()
    }

    fn assert_shape(source: &str, stripped: &StrippedSource) {
        assert_eq!(stripped.text().len(), source.len());
        assert_eq!(stripped.text().lines().count(), source.lines().count());
        assert_eq!(stripped.line_count(), source.lines().count());
    }

    #[test]
    fn test_strips_line_comment() {
        let src = "let x = 1; // trailing\nlet y = 2;\n";
        let out = strip(src, profile("rs"));
        assert_shape(src, &out);
        assert!(!out.text().contains("trailing"));
        assert!(out.text().contains("let y = 2;"));
        assert_eq!(out.comment_lines().iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_string_hides_comment_marker_and_braces() {
        let src = "const s = \"// not a comment { class Bar {\";\n";
        let out = strip(src, profile("js"));
        assert_shape(src, &out);
        assert!(out.comment_lines().is_empty());
        assert!(!out.text().contains('{'));
        assert!(!out.text().contains("Bar"));
    }

    #[test]
    fn test_escaped_quote_stays_inside_string() {
        let src = "x = \"a \\\" # still string\" # real\n";
        let out = strip(src, profile("py"));
        assert_shape(src, &out);
        assert!(!out.text().contains("still"));
        assert!(out.comment_lines().contains(&1));
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let src = "a();\n/* one\n\n   three */ b();\nc();\n";
        let out = strip(src, profile("c"));
        assert_shape(src, &out);
        assert_eq!(
            out.comment_lines().iter().copied().collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert!(out.text().contains("b();"));
        assert!(!out.line_info(3).has_code);
        assert!(out.line_info(4).has_code);
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        let src = "/* outer /* inner */ code();\n";
        let out = strip(src, profile("c"));
        assert!(out.text().contains("code();"));
    }

    #[test]
    fn test_python_docstring_counts_as_comment() {
        let src = "def f():\n    \"\"\"Doc\n    more\n    \"\"\"\n    return 1\n";
        let out = strip(src, profile("py"));
        assert_shape(src, &out);
        assert_eq!(
            out.comment_lines().iter().copied().collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert!(!out.line_info(3).has_code);
    }

    #[test]
    fn test_longest_opener_wins() {
        let src = "--[[ block\nstill ]] x = 1\n-- line\n";
        let out = strip(src, profile("lua"));
        assert_shape(src, &out);
        assert!(!out.text().contains("still"));
        assert!(out.text().contains("x = 1"));
        assert_eq!(out.comment_lines().len(), 3);
    }

    #[test]
    fn test_rust_raw_string_and_lifetime() {
        let src = "fn f<'a>(x: &'a str) -> char {\n    let s = r#\"a \" } b\"#;\n    '}'\n}\n";
        let out = strip(src, profile("rs"));
        assert_shape(src, &out);
        assert!(out.text().contains("<'a>"));
        assert!(out.text().contains("&'a str"));
        assert_eq!(out.text().matches('}').count(), 1);
        assert_eq!(out.line_info(3).last_code_char, Some('\''));
    }

    #[test]
    fn test_identifier_boundary_for_prefixed_strings() {
        // `for"` must not open a raw string.
        let src = "let r = 1; for\"x\"; let y = r\"z\";\n";
        let out = strip(src, profile("rs"));
        assert!(out.text().contains("for"));
        assert!(!out.text().contains('z'));
    }

    #[test]
    fn test_single_line_string_closes_at_end_of_line() {
        let src = "x = 'unterminated\ny = 2\n";
        let out = strip(src, profile("py"));
        assert_shape(src, &out);
        assert!(out.text().contains("y = 2"));
    }

    #[test]
    fn test_unterminated_block_closes_at_eof() {
        let src = "code();\n/* never closed\nmore\n";
        let out = strip(src, profile("c"));
        assert_shape(src, &out);
        assert_eq!(out.comment_lines().len(), 2);
    }

    #[test]
    fn test_ruby_begin_end_only_at_line_start() {
        let src = "x = 1 =begin\n=begin\ndoc\n=end\ny = 2\n";
        let out = strip(src, profile("rb"));
        assert_shape(src, &out);
        assert_eq!(
            out.comment_lines().iter().copied().collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
    }

    #[test]
    fn test_ruby_heredoc_body_is_a_string() {
        let src = "q = <<~SQL.strip\n  select * # not a comment\n  end\n  SQL\n# real\n";
        let out = strip(src, profile("rb"));
        assert_shape(src, &out);
        assert!(out.text().starts_with("q = "));
        assert!(out.text().contains(".strip"));
        assert!(!out.text().contains("select"));
        assert!(!out.text().contains("end"));
        assert!(!out.text().contains("SQL"));
        assert_eq!(out.comment_lines().iter().copied().collect::<Vec<_>>(), vec![5]);
        assert!(out.line_info(2).has_code);
    }

    #[test]
    fn test_quoted_heredoc_tags() {
        let src = "a = <<-'EOS'\n  #{x} }\n  EOS\nb = <<\"DONE\"\nend\nDONE\nc = 1\n";
        let out = strip(src, profile("rb"));
        assert_shape(src, &out);
        assert!(!out.text().contains('}'));
        assert!(!out.text().contains("end"));
        assert!(out.text().contains("c = 1"));
    }

    #[test]
    fn test_shift_and_append_are_not_heredocs() {
        let src = "items << item\nx = a <<b\nclass << self\n";
        let out = strip(src, profile("rb"));
        assert_eq!(out.text(), src);
    }

    #[test]
    fn test_perl_and_php_heredocs() {
        let src = "print <<EOF;\nsub fake {\nEOF\nsub real { 1 }\n";
        let out = strip(src, profile("pl"));
        assert_shape(src, &out);
        assert!(!out.text().contains("fake"));
        assert!(out.text().contains("sub real { 1 }"));
        assert!(out.text().contains("print "));

        let src = "$s = <<<'TXT'\n  // {\n  TXT;\n$t = 1;\n";
        let out = strip(src, profile("php"));
        assert_shape(src, &out);
        assert!(out.comment_lines().is_empty());
        assert!(!out.text().contains('{'));
        assert!(out.text().contains("  ;\n$t = 1;"));
    }

    #[test]
    fn test_fixed_form_fortran_column_one_comments() {
        let src = "C     header\n      CALL FOO\n*     star\nc lower\n      X = 1 ! tail\n";
        let out = strip(src, profile("f"));
        assert_shape(src, &out);
        assert_eq!(
            out.comment_lines().iter().copied().collect::<Vec<_>>(),
            vec![1, 3, 4, 5]
        );
        assert!(out.text().contains("CALL FOO"));
        assert!(out.text().contains("X = 1"));
    }

    #[test]
    fn test_multibyte_content_keeps_length() {
        let src = "s = \"héllo ✓\" # ünïcode\r\nt = 1";
        let out = strip(src, profile("py"));
        assert_shape(src, &out);
        assert!(out.text().contains("\r\n"));
        assert_eq!(out.line_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let out = strip("", profile("py"));
        assert_eq!(out.text(), "");
        assert_eq!(out.line_count(), 0);
    }
}
