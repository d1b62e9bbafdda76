use super::ConstructRecord;
use crate::profile::ConstructKind;
use crate::scan::Span;

/// One record per class-kind span, nested ones included.
pub fn count_classes(spans: &[Span]) -> Vec<ConstructRecord> {
    spans
        .iter()
        .filter(|s| s.kind == ConstructKind::Class)
        .map(ConstructRecord::from_span)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Registry;
    use crate::scan::{extract_spans, strip};

    fn classes(ext: &str, src: &str) -> Vec<ConstructRecord> {
        let profile = Registry::builtin().unwrap().for_extension(ext).unwrap();
        count_classes(&extract_spans(&strip(src, profile), profile))
    }

    #[test]
    fn test_counts_nested_and_skips_functions() {
        let src = "class Outer:\n    class Inner:\n        pass\n    def method(self):\n        pass\n";
        let records = classes("py", src);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "Inner"]);
        assert_eq!(records[1].line, 2);
        assert_eq!(records[1].end_line, 3);
    }

    #[test]
    fn test_javascript_class_expression() {
        let src = "class A {}\nconst B = class {\n  run() {}\n};\nexport default class C extends A {\n}\n";
        let records = classes("js", src);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_c_struct_needs_body() {
        let src = "struct node;\nstruct node {\n    int value;\n    struct node *next;\n};\n";
        let records = classes("c", src);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keyword, "struct");
        assert_eq!((records[0].line, records[0].end_line), (2, 5));
    }

    #[test]
    fn test_comment_and_string_mentions_are_ignored() {
        let src = "// class Ghost {\n/* class Phantom { } */\nString s = \"class Bar {\";\nclass Real {\n}\n";
        let records = classes("java", src);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Real");
    }
}
