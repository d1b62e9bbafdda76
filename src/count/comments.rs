use crate::scan::StrippedSource;

/// Number of distinct lines that hold any comment text.
pub fn count_comment_lines(stripped: &StrippedSource) -> usize {
    stripped.comment_lines().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Registry;
    use crate::scan::strip;

    fn comments(ext: &str, src: &str) -> usize {
        let profile = Registry::builtin().unwrap().for_extension(ext).unwrap();
        count_comment_lines(&strip(src, profile))
    }

    #[test]
    fn test_line_and_block_comments() {
        let src = "// one\nint a; // two\nint b;\n/* three\n   four\n\n   six */\n// seven\n";
        assert_eq!(comments("c", src), 7);
    }

    #[test]
    fn test_block_close_and_line_comment_share_a_line() {
        let src = "/* a\n b */ x = 1; // trailing\ny = 2;\n";
        assert_eq!(comments("js", src), 2);
    }

    #[test]
    fn test_hash_comments_and_docstrings() {
        let src = "# header\ndef f():\n    '''doc'''\n    return '#not'\n";
        assert_eq!(comments("py", src), 2);
    }

    #[test]
    fn test_vue_markup_and_script_comments() {
        let src = "<template>\n  <!-- note -->\n</template>\n<script>\n// helper\nexport default {}\n</script>\n";
        assert_eq!(comments("vue", src), 2);
    }

    #[test]
    fn test_no_comments() {
        assert_eq!(comments("rs", "fn main() {}\n"), 0);
    }
}
