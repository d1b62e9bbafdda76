//! HTML DOM summary built on a streaming markup reader.
//!
//! The reader runs in a lenient mode: end tags need not match, unmatched end
//! tags are tolerated and attributes follow HTML syntax. An end tag closes
//! the nearest open element with the same name, which implicitly closes
//! anything opened after it. Script and style bodies are skipped unparsed.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use phf::phf_set;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Extensions the DOM summary accepts.
pub const DOM_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

static VOID_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
};

static RAW_TEXT_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "script", "style",
};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// An element in the summarized tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    pub tag_name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<DomNode>,
    pub text_content: String,
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub classes: Vec<String>,
}

/// Tree plus aggregate counts for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSummary {
    pub total_elements: usize,
    pub max_depth: usize,
    pub element_counts: BTreeMap<String, usize>,
    /// Top-level elements, in document order.
    pub tree: Vec<DomNode>,
}

pub fn is_dom_extension(ext: &str) -> bool {
    DOM_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

struct OpenElement {
    node: DomNode,
    text: String,
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<OpenElement>,
    summary: DomSummary,
}

impl TreeBuilder {
    fn element(&mut self, start: &BytesStart<'_>) -> DomNode {
        let tag_name = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
        let depth = self.stack.len();

        let mut attributes = BTreeMap::new();
        for attr in start.html_attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            attributes.insert(key, value);
        }

        let id = attributes.get("id").cloned();
        let classes = attributes
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        self.summary.total_elements += 1;
        self.summary.max_depth = self.summary.max_depth.max(depth);
        *self
            .summary
            .element_counts
            .entry(tag_name.clone())
            .or_insert(0) += 1;

        DomNode {
            tag_name,
            attributes,
            children: Vec::new(),
            text_content: String::new(),
            depth,
            id,
            classes,
        }
    }

    fn open(&mut self, node: DomNode) {
        self.stack.push(OpenElement {
            node,
            text: String::new(),
        });
    }

    fn attach(&mut self, node: DomNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.node.children.push(node),
            None => self.summary.tree.push(node),
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(top) = self.stack.last_mut() {
            if !top.text.is_empty() {
                top.text.push(' ');
            }
            top.text.push_str(text);
        }
    }

    fn close(&mut self, name: &str) {
        let Some(pos) = self.stack.iter().rposition(|e| e.node.tag_name == name) else {
            debug!(tag = name, "ignoring unmatched end tag");
            return;
        };
        while self.stack.len() > pos {
            self.pop();
        }
    }

    fn pop(&mut self) {
        if let Some(mut open) = self.stack.pop() {
            open.node.text_content = WHITESPACE.replace_all(open.text.trim(), " ").into_owned();
            self.attach(open.node);
        }
    }

    fn finish(mut self) -> DomSummary {
        while !self.stack.is_empty() {
            self.pop();
        }
        self.summary
    }
}

/// Summarize an HTML document. Markup errors stop the scan; the partial
/// tree is kept and the error is returned as a warning.
pub fn summarize(source: &str) -> (DomSummary, Vec<String>) {
    let mut reader = Reader::from_str(source);
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut builder = TreeBuilder::default();
    let mut warnings = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let node = builder.element(&e);
                if VOID_ELEMENTS.contains(node.tag_name.as_str()) {
                    builder.attach(node);
                } else if RAW_TEXT_ELEMENTS.contains(node.tag_name.as_str()) {
                    let end = e.to_end().into_owned();
                    if let Err(err) = reader.read_to_end(end.name()) {
                        warnings.push(format!(
                            "unterminated <{}> at byte {}: {}",
                            node.tag_name,
                            reader.buffer_position(),
                            err
                        ));
                        builder.attach(node);
                        break;
                    }
                    builder.attach(node);
                } else {
                    builder.open(node);
                }
            }
            Ok(Event::Empty(e)) => {
                let node = builder.element(&e);
                builder.attach(node);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                builder.close(&name);
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                builder.text(&text);
            }
            Ok(Event::CData(t)) => {
                builder.text(&String::from_utf8_lossy(&t));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                warnings.push(format!(
                    "markup error at byte {}: {}",
                    reader.buffer_position(),
                    err
                ));
                break;
            }
        }
    }

    (builder.finish(), warnings)
}
