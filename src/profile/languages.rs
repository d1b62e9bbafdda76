//! Built-in language profiles.
//!
//! Patterns run against stripped lines, so string and comment content is
//! already blank. Each pattern needs a `name` group; a `keyword` group, when
//! present, replaces the rule's static keyword label.

use super::{
    BlockComment, BlockStyle, DeclarationRule, KeywordPairs, LanguageProfile, PairWord,
    StringDelimiter,
};

const C_BLOCK: &[BlockComment] = &[BlockComment::new("/*", "*/")];
const SLASH_LINE: &[&str] = &["//"];
const HASH_LINE: &[&str] = &["#"];

const C_STRINGS: &[StringDelimiter] = &[StringDelimiter::quoted("\""), StringDelimiter::quoted("'")];

/// Keywords that are never a declared name in C-like languages.
const C_FAMILY_WORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "case", "default", "return",
    "sizeof", "new", "delete", "throw", "throws", "catch", "try", "finally", "using",
    "typedef", "goto", "await", "yield", "lock", "fixed", "synchronized", "function",
    "assert", "print", "echo", "require", "require_once", "include", "emit", "import",
];

/// Words that lead statements, not declarations, in C-like languages.
/// Modifiers that can start a declaration (`typedef`, `default`,
/// `synchronized`) stay out.
const C_STATEMENT_WORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "case", "return", "sizeof",
    "new", "delete", "throw", "throws", "catch", "try", "finally", "using", "goto", "await",
    "yield", "lock", "fixed", "assert", "print", "echo", "require", "require_once",
    "include", "emit", "import",
];

/// C# also allows `new` as a member modifier.
const CSHARP_STATEMENT_WORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "case", "return", "sizeof",
    "delete", "throw", "catch", "try", "finally", "using", "goto", "await", "yield", "lock",
    "fixed",
];

const SCRIPT_WORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "return", "new", "throw", "catch",
    "try", "typeof", "delete", "await", "yield", "function", "import",
];

const SCRIPT_STATEMENT_WORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "return", "new", "throw", "catch",
    "try", "typeof", "delete", "await", "yield", "import",
];

const JS_DECLARATIONS: &[DeclarationRule] = &[
    DeclarationRule::class(
        "class",
        r"^\s*(?:export\s+)?(?:default\s+)?class\s+(?P<name>[A-Za-z_$][\w$]*)",
    ),
    DeclarationRule::class(
        "class",
        r"^\s*(?:export\s+)?(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)\s*=\s*class\b",
    ),
    DeclarationRule::function(
        "function",
        r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)\s*\(",
    ),
    DeclarationRule::function(
        "function",
        r"^\s*(?:export\s+)?(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:function\b|\([^()]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)",
    ),
    DeclarationRule::function(
        "method",
        r"^\s*(?:static\s+)?(?:async\s+)?(?:get\s+|set\s+)?\*?(?P<name>[A-Za-z_$][\w$]*)\s*\([^()]*\)\s*\{",
    ),
];

const TS_DECLARATIONS: &[DeclarationRule] = &[
    DeclarationRule::class(
        "class",
        r"^\s*(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:abstract\s+)?class\s+(?P<name>[A-Za-z_$][\w$]*)",
    ),
    DeclarationRule::class(
        "interface",
        r"^\s*(?:export\s+)?(?:declare\s+)?(?P<keyword>interface|enum)\s+(?P<name>[A-Za-z_$][\w$]*)",
    ),
    DeclarationRule::class(
        "enum",
        r"^\s*(?:export\s+)?(?:declare\s+)?const\s+enum\s+(?P<name>[A-Za-z_$][\w$]*)",
    ),
    DeclarationRule::function(
        "function",
        r"^\s*(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*\(",
    ),
    DeclarationRule::function(
        "function",
        r"^\s*(?:export\s+)?(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(?:async\s+)?(?:function\b|(?:<[^>]*>)?\([^()]*\)\s*(?::[^=]+)?=>|[A-Za-z_$][\w$]*\s*=>)",
    ),
    DeclarationRule::function(
        "method",
        r"^\s*(?:(?:public|private|protected|static|readonly|async|override|abstract)\s+)*(?:get\s+|set\s+)?\*?(?P<name>[A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*\([^()]*\)\s*(?::\s*[^{;=]+)?\{",
    ),
];

const ARROW_BODY: &str = r"=>\s*[^\s{]";

/// Text after the name: `(...) : T = expr` or `: T = expr`. A line that ends
/// in `{` (`= when (x) {`) opens a block instead.
const EQUALS_BODY: &str = r"(?:\)|^)\s*(?::[^={()]*)?=\s*[^\s={>](?:.*[^\s{])?\s*$";

const C_DECLARATIONS: &[DeclarationRule] = &[
    DeclarationRule::class(
        "struct",
        r"^\s*(?:typedef\s+)?(?P<keyword>struct|union|enum)\s+(?P<name>[A-Za-z_]\w*)",
    ),
    DeclarationRule::function(
        "function",
        r"^\s*(?:(?:static|extern|inline|const|unsigned|signed|struct|enum|union|volatile|register)\s+)*[A-Za-z_]\w*(?:\s*\*+\s*|\s+)(?P<name>[A-Za-z_]\w*)\s*\(",
    ),
];

const CPP_DECLARATIONS: &[DeclarationRule] = &[
    DeclarationRule::class(
        "class",
        r"^\s*(?:template\s*<[^>]*>\s*)?(?:typedef\s+)?(?P<keyword>class|struct|union|enum(?:\s+class)?)\s+(?:[A-Z_][A-Z0-9_]*\s+)?(?P<name>[A-Za-z_]\w*)",
    ),
    DeclarationRule::function(
        "function",
        r"^\s*(?:template\s*<[^>]*>\s*)?(?:(?:static|extern|inline|virtual|explicit|constexpr|const|unsigned|signed|friend|struct|enum)\s+)*(?:[\w:<>,]+(?:\s*[\*&]+\s*|\s+))?(?P<name>~?[A-Za-z_][\w:~]*)\s*\(",
    ),
];

const CSHARP_DECLARATIONS: &[DeclarationRule] = &[
    DeclarationRule::class(
        "class",
        r"^\s*(?:\[[^\]]*\]\s*)*(?:(?:public|private|protected|internal|static|abstract|sealed|partial|unsafe|new|readonly|ref|file)\s+)*(?P<keyword>class|struct|interface|enum|record)\s+(?P<name>[A-Za-z_]\w*)",
    ),
    DeclarationRule::function(
        "method",
        r"^\s*(?:\[[^\]]*\]\s*)*(?:(?:public|private|protected|internal|static|virtual|override|abstract|sealed|async|extern|unsafe|new|partial)\s+)*[\w\.\?\[\]]+(?:<[^()]*?>)?(?:\[\])*\??\s+(?P<name>[A-Za-z_]\w*)\s*(?:<[^>]*>)?\s*\(",
    ),
    DeclarationRule::function(
        "constructor",
        r"^\s*(?:public|private|protected|internal|static)\s+(?P<name>[A-Za-z_]\w*)\s*\(",
    ),
];

const JAVA_DECLARATIONS: &[DeclarationRule] = &[
    DeclarationRule::class(
        "class",
        r"^\s*(?:@\w+(?:\([^)]*\))?\s+)*(?:(?:public|private|protected|static|abstract|final|sealed|strictfp)\s+)*(?P<keyword>class|interface|enum|record|@interface)\s+(?P<name>[A-Za-z_]\w*)",
    ),
    DeclarationRule::function(
        "method",
        r"^\s*(?:@\w+(?:\([^)]*\))?\s+)*(?:(?:public|private|protected|static|final|abstract|synchronized|native|default|strictfp)\s+)*(?:<[^>]*>\s+)?[\w\.\?\[\]]+(?:<[^()]*?>)?(?:\[\])*\s+(?P<name>[A-Za-z_]\w*)\s*\(",
    ),
    DeclarationRule::function(
        "constructor",
        r"^\s*(?:@\w+(?:\([^)]*\))?\s+)*(?:public|private|protected)\s+(?P<name>[A-Z]\w*)\s*\(",
    ),
];

const OBJC_DECLARATIONS: &[DeclarationRule] = &[
    DeclarationRule::class(
        "struct",
        r"^\s*(?:typedef\s+)?(?P<keyword>struct|union|enum)\s+(?P<name>[A-Za-z_]\w*)",
    ),
    DeclarationRule::function(
        "method",
        r"^\s*[-+]\s*\([^)]*\)\s*(?P<name>[A-Za-z_]\w*)",
    ),
    DeclarationRule::function(
        "function",
        r"^\s*(?:(?:static|extern|inline|const|unsigned|signed|struct)\s+)*[A-Za-z_]\w*(?:\s*\*+\s*|\s+)(?P<name>[A-Za-z_]\w*)\s*\(",
    ),
];

const RUBY_PAIRS: KeywordPairs = KeywordPairs {
    open: &[
        PairWord::new("def"),
        PairWord::new("class"),
        PairWord::new("module"),
        PairWord::new("begin"),
        PairWord::new("case"),
        PairWord {
            not_after: &["while", "until", "for"],
            ..PairWord::new("do")
        },
        PairWord::statement("if"),
        PairWord::statement("unless"),
        PairWord::statement("while"),
        PairWord::statement("until"),
        PairWord::statement("for"),
    ],
    close: &["end"],
};

const LUA_PAIRS: KeywordPairs = KeywordPairs {
    open: &[
        PairWord::new("function"),
        PairWord::new("if"),
        PairWord::new("do"),
        PairWord::new("repeat"),
    ],
    close: &["end", "until"],
};

const FORTRAN_STRINGS: &[StringDelimiter] = &[
    StringDelimiter {
        escape: None,
        ..StringDelimiter::quoted("\"")
    },
    StringDelimiter {
        escape: None,
        ..StringDelimiter::quoted("'")
    },
];

const FORTRAN_DECLARATIONS: &[DeclarationRule] = &[
    DeclarationRule::function(
        "function",
        r"^\s*(?:(?:pure|elemental|recursive|impure)\s+)*(?:(?:integer|real|logical|complex|character|double\s+precision|type\s*\([^)]*\))(?:\s*\([^)]*\))?(?:\s*\*\s*\d+)?\s+)?(?P<keyword>subroutine|function)\s+(?P<name>\w+)",
    ),
    DeclarationRule::function("program", r"^\s*program\s+(?P<name>\w+)"),
    DeclarationRule::class("module", r"^\s*module\s+(?P<name>\w+)\s*$"),
    DeclarationRule::class(
        "type",
        r"^\s*type\s*(?:,\s*[\w()]+\s*)*(?:::)?\s*(?P<name>\w+)\s*$",
    ),
];

const FORTRAN_PAIRS: KeywordPairs = KeywordPairs {
    open: &[
        PairWord::new("program"),
        PairWord {
            not_before: &["procedure"],
            ..PairWord::statement("module")
        },
        PairWord::new("subroutine"),
        PairWord::new("function"),
        PairWord {
            not_before: &["(", "is"],
            ..PairWord::statement("type")
        },
        // `do 10 i = 1, n` ends at its label, not at `end do`.
        PairWord {
            not_before: &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"],
            ..PairWord::statement("do")
        },
        PairWord {
            not_after: &["else", "elseif"],
            ..PairWord::new("then")
        },
        PairWord::statement("select"),
        PairWord::statement("interface"),
    ],
    close: &[
        "end",
        "enddo",
        "endif",
        "endselect",
        "endfunction",
        "endsubroutine",
        "endmodule",
        "endprogram",
        "endtype",
        "endinterface",
    ],
};

pub static BUILTIN_PROFILES: &[LanguageProfile] = &[
    LanguageProfile {
        id: "python",
        name: "Python",
        extensions: &["py", "pyw", "pyi"],
        line_comments: HASH_LINE,
        strings: &[
            StringDelimiter::doc("\"\"\""),
            StringDelimiter::doc("'''"),
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
        ],
        declarations: &[
            DeclarationRule::class("class", r"^\s*class\s+(?P<name>[A-Za-z_]\w*)"),
            DeclarationRule::function("def", r"^\s*(?:async\s+)?def\s+(?P<name>[A-Za-z_]\w*)"),
        ],
        block_style: BlockStyle::Indentation,
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "gdscript",
        name: "GDScript",
        extensions: &["gd"],
        line_comments: HASH_LINE,
        strings: &[
            StringDelimiter::doc("\"\"\""),
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
        ],
        declarations: &[
            DeclarationRule::class("class", r"^\s*(?P<keyword>class|class_name)\s+(?P<name>[A-Za-z_]\w*)"),
            DeclarationRule::function("func", r"^\s*(?:static\s+)?func\s+(?P<name>[A-Za-z_]\w*)"),
        ],
        block_style: BlockStyle::Indentation,
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "javascript",
        name: "JavaScript",
        extensions: &["js", "jsx", "mjs", "cjs"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
            StringDelimiter::multiline("`"),
        ],
        declarations: JS_DECLARATIONS,
        terminator: Some(';'),
        reserved_names: SCRIPT_WORDS,
        statement_words: SCRIPT_STATEMENT_WORDS,
        expression_body: Some(ARROW_BODY),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "typescript",
        name: "TypeScript",
        extensions: &["ts", "tsx", "mts", "cts"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
            StringDelimiter::multiline("`"),
        ],
        declarations: TS_DECLARATIONS,
        terminator: Some(';'),
        reserved_names: SCRIPT_WORDS,
        statement_words: SCRIPT_STATEMENT_WORDS,
        expression_body: Some(ARROW_BODY),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "vue",
        name: "Vue",
        extensions: &["vue"],
        line_comments: SLASH_LINE,
        block_comments: &[
            BlockComment::new("<!--", "-->"),
            BlockComment::new("/*", "*/"),
        ],
        strings: &[
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
            StringDelimiter::multiline("`"),
        ],
        declarations: TS_DECLARATIONS,
        terminator: Some(';'),
        reserved_names: SCRIPT_WORDS,
        statement_words: SCRIPT_STATEMENT_WORDS,
        expression_body: Some(ARROW_BODY),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "c",
        name: "C",
        extensions: &["c", "h"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: C_STRINGS,
        declarations: C_DECLARATIONS,
        terminator: Some(';'),
        reserved_names: C_FAMILY_WORDS,
        statement_words: C_STATEMENT_WORDS,
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "cpp",
        name: "C++",
        extensions: &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx", "h++", "ino"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::raw("R\"(", ")\""),
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
        ],
        declarations: CPP_DECLARATIONS,
        terminator: Some(';'),
        reserved_names: C_FAMILY_WORDS,
        statement_words: C_STATEMENT_WORDS,
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "csharp",
        name: "C#",
        extensions: &["cs"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::raw("\"\"\"", "\"\"\""),
            StringDelimiter::raw("@\"", "\""),
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
        ],
        declarations: CSHARP_DECLARATIONS,
        terminator: Some(';'),
        reserved_names: C_FAMILY_WORDS,
        statement_words: CSHARP_STATEMENT_WORDS,
        expression_body: Some(ARROW_BODY),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "java",
        name: "Java",
        extensions: &["java"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::raw("\"\"\"", "\"\"\""),
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
        ],
        declarations: JAVA_DECLARATIONS,
        terminator: Some(';'),
        reserved_names: C_FAMILY_WORDS,
        statement_words: C_STATEMENT_WORDS,
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "objc",
        name: "Objective-C",
        extensions: &["m", "mm"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::quoted("@\""),
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
        ],
        declarations: OBJC_DECLARATIONS,
        terminator: Some(';'),
        reserved_names: C_FAMILY_WORDS,
        statement_words: C_STATEMENT_WORDS,
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "go",
        name: "Go",
        extensions: &["go"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::raw("`", "`"),
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
        ],
        declarations: &[
            DeclarationRule::class(
                "type",
                r"^\s*type\s+(?P<name>[A-Za-z_]\w*)(?:\[[^\]]*\])?\s+(?P<keyword>struct|interface)\b",
            ),
            DeclarationRule::function(
                "func",
                r"^\s*func\s+(?:\([^)]*\)\s*)?(?P<name>[A-Za-z_]\w*)\s*(?:\[[^\]]*\]\s*)?\(",
            ),
        ],
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "rust",
        name: "Rust",
        extensions: &["rs"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::raw("r##\"", "\"##"),
            StringDelimiter::raw("r#\"", "\"#"),
            StringDelimiter::raw("r\"", "\""),
            StringDelimiter::multiline("\""),
            StringDelimiter::char_literal(),
        ],
        declarations: &[
            DeclarationRule::class(
                "struct",
                r"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?(?:unsafe\s+)?(?P<keyword>struct|enum|trait|union)\s+(?P<name>[A-Za-z_]\w*)",
            ),
            DeclarationRule::function(
                "fn",
                r"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?(?:default\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+)?fn\s+(?P<name>[A-Za-z_]\w*)",
            ),
        ],
        implicit_return: true,
        terminator: Some(';'),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "swift",
        name: "Swift",
        extensions: &["swift"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::multiline("\"\"\""),
            StringDelimiter::quoted("\""),
        ],
        declarations: &[
            DeclarationRule::class(
                "class",
                r"^\s*(?:@\w+\s+)*(?:(?:public|private|fileprivate|internal|open|final|indirect)\s+)*(?P<keyword>class|struct|enum|protocol|actor)\s+(?P<name>[A-Za-z_]\w*)",
            ),
            DeclarationRule::function(
                "func",
                r"^\s*(?:@\w+\s+)*(?:(?:public|private|fileprivate|internal|open|final|class|static|override|mutating|nonmutating)\s+)*func\s+(?P<name>[A-Za-z_]\w*)",
            ),
        ],
        reserved_names: &["func", "var", "let", "case"],
        statement_words: &["if", "guard", "while", "for", "switch", "return", "repeat"],
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "kotlin",
        name: "Kotlin",
        extensions: &["kt", "kts"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::raw("\"\"\"", "\"\"\""),
            StringDelimiter::quoted("\""),
            StringDelimiter::char_literal(),
        ],
        declarations: &[
            DeclarationRule::class(
                "class",
                r"^\s*(?:@\w+\s+)*(?:(?:public|private|protected|internal|abstract|open|final|sealed|data|enum|annotation|inner|value|inline)\s+)*(?P<keyword>class|interface|object)\s+(?P<name>[A-Za-z_]\w*)",
            ),
            DeclarationRule::function(
                "fun",
                r"^\s*(?:@\w+\s+)*(?:(?:public|private|protected|internal|open|override|abstract|final|suspend|inline|operator|infix|tailrec|external)\s+)*fun\s+(?:<[^>]*>\s*)?(?:[\w.]+\.)?(?P<name>[A-Za-z_]\w*)\s*\(",
            ),
        ],
        statement_words: &["if", "when", "while", "for", "return", "val", "var"],
        expression_body: Some(EQUALS_BODY),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "scala",
        name: "Scala",
        extensions: &["scala", "sc"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::raw("\"\"\"", "\"\"\""),
            StringDelimiter::quoted("\""),
            StringDelimiter::char_literal(),
        ],
        declarations: &[
            DeclarationRule::class(
                "class",
                r"^\s*(?:(?:private|protected|final|sealed|abstract|implicit|case|lazy)\s+)*(?P<keyword>class|trait|object)\s+(?P<name>[A-Za-z_]\w*)",
            ),
            DeclarationRule::function(
                "def",
                r"^\s*(?:(?:private|protected|override|final|implicit|inline)(?:\[[^\]]*\])?\s+)*def\s+(?P<name>[A-Za-z_]\w*)",
            ),
        ],
        implicit_return: true,
        statement_words: &["if", "while", "for", "return", "val", "var", "match"],
        expression_body: Some(EQUALS_BODY),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "php",
        name: "PHP",
        extensions: &["php", "phtml", "php3", "php4", "php5", "phps"],
        line_comments: &["//", "#"],
        block_comments: C_BLOCK,
        strings: C_STRINGS,
        heredocs: &["<<<"],
        declarations: &[
            DeclarationRule::class(
                "class",
                r"^\s*(?:(?:abstract|final|readonly)\s+)*(?P<keyword>class|interface|trait|enum)\s+(?P<name>[A-Za-z_]\w*)",
            ),
            DeclarationRule::function(
                "function",
                r"^\s*(?:(?:public|private|protected|static|abstract|final)\s+)*function\s+&?(?P<name>[A-Za-z_]\w*)\s*\(",
            ),
        ],
        terminator: Some(';'),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "solidity",
        name: "Solidity",
        extensions: &["sol"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: C_STRINGS,
        declarations: &[
            DeclarationRule::class(
                "contract",
                r"^\s*(?:abstract\s+)?(?P<keyword>contract|interface|library|struct|enum)\s+(?P<name>[A-Za-z_]\w*)",
            ),
            DeclarationRule::function(
                "function",
                r"^\s*(?P<keyword>function|modifier)\s+(?P<name>[A-Za-z_]\w*)\s*\(",
            ),
        ],
        terminator: Some(';'),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "zig",
        name: "Zig",
        extensions: &["zig"],
        line_comments: SLASH_LINE,
        strings: &[StringDelimiter::quoted("\""), StringDelimiter::char_literal()],
        declarations: &[
            DeclarationRule::class(
                "struct",
                r"^\s*(?:pub\s+)?const\s+(?P<name>[A-Za-z_]\w*)\s*=\s*(?:extern\s+|packed\s+)?(?P<keyword>struct|enum|union|opaque)\b",
            ),
            DeclarationRule::function(
                "fn",
                r"^\s*(?:pub\s+)?(?:export\s+|extern\s+|inline\s+)?fn\s+(?P<name>[A-Za-z_]\w*)\s*\(",
            ),
        ],
        terminator: Some(';'),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "perl",
        name: "Perl",
        extensions: &["pl", "pm", "t", "pod"],
        line_comments: HASH_LINE,
        block_comments: &[
            BlockComment::at_line_start("=pod", "=cut"),
            BlockComment::at_line_start("=head", "=cut"),
            BlockComment::at_line_start("=begin", "=cut"),
            BlockComment::at_line_start("=item", "=cut"),
        ],
        strings: C_STRINGS,
        heredocs: &["<<~", "<<"],
        declarations: &[
            DeclarationRule::class(
                "package",
                r"^\s*(?P<keyword>package|class)\s+(?P<name>[A-Za-z_][\w:]*)\s*(?:[\d.]+\s*)?\{",
            ),
            DeclarationRule::function("sub", r"^\s*sub\s+(?P<name>[A-Za-z_][\w:]*)"),
        ],
        implicit_return: true,
        terminator: Some(';'),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "ruby",
        name: "Ruby",
        extensions: &["rb", "rake", "gemspec"],
        line_comments: HASH_LINE,
        block_comments: &[BlockComment::at_line_start("=begin", "=end")],
        strings: &[
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
            StringDelimiter::quoted("`"),
        ],
        heredocs: &["<<~", "<<-", "<<"],
        declarations: &[
            DeclarationRule::class("class", r"^\s*(?P<keyword>class|module)\s+(?P<name>[A-Z][\w:]*)"),
            DeclarationRule::function(
                "def",
                r"^\s*def\s+(?:self\.)?(?P<name>[A-Za-z_]\w*[?!=]?)",
            ),
        ],
        block_style: BlockStyle::KeywordPair,
        keyword_pairs: Some(RUBY_PAIRS),
        implicit_return: true,
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "lua",
        name: "Lua",
        extensions: &["lua"],
        line_comments: &["--"],
        block_comments: &[BlockComment::new("--[[", "]]")],
        strings: &[
            StringDelimiter::raw("[[", "]]"),
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
        ],
        declarations: &[
            DeclarationRule::function(
                "function",
                r"^\s*(?:local\s+)?function\s+(?P<name>[A-Za-z_][\w.:]*)\s*\(",
            ),
            DeclarationRule::function(
                "function",
                r"^\s*(?:local\s+)?(?P<name>[A-Za-z_][\w.]*)\s*=\s*function\s*\(",
            ),
        ],
        block_style: BlockStyle::KeywordPair,
        keyword_pairs: Some(LUA_PAIRS),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "fortran",
        name: "Fortran",
        extensions: &["f90", "f95", "f03", "f08"],
        line_comments: &["!"],
        strings: FORTRAN_STRINGS,
        declarations: FORTRAN_DECLARATIONS,
        block_style: BlockStyle::KeywordPair,
        keyword_pairs: Some(FORTRAN_PAIRS),
        case_insensitive: true,
        reserved_names: &["procedure", "is"],
        statement_words: &["end", "call", "if"],
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "fortran-fixed",
        name: "Fortran (fixed form)",
        extensions: &["f", "f77", "for", "ftn"],
        line_comments: &["!"],
        column_comments: &["C", "c", "*", "!"],
        strings: FORTRAN_STRINGS,
        declarations: FORTRAN_DECLARATIONS,
        block_style: BlockStyle::KeywordPair,
        keyword_pairs: Some(FORTRAN_PAIRS),
        case_insensitive: true,
        reserved_names: &["procedure", "is"],
        statement_words: &["end", "call", "if"],
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "ttcn3",
        name: "TTCN-3",
        extensions: &["ttcn", "ttcn3", "ttcnpp", "3mp"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[StringDelimiter::quoted("\"")],
        declarations: &[
            DeclarationRule::class(
                "type",
                r"^\s*type\s+(?P<keyword>record|set|union|enumerated|component|port)\s+(?:of\s+)?(?:\w+\s+)?(?P<name>[A-Za-z_]\w*)\s*\{",
            ),
            DeclarationRule::function(
                "function",
                r"^\s*(?:external\s+)?(?P<keyword>function|testcase|altstep)\s+(?P<name>[A-Za-z_]\w*)\s*\(",
            ),
        ],
        terminator: Some(';'),
        ..LanguageProfile::EMPTY
    },
    LanguageProfile {
        id: "dart",
        name: "Dart",
        extensions: &["dart"],
        line_comments: SLASH_LINE,
        block_comments: C_BLOCK,
        strings: &[
            StringDelimiter::multiline("\"\"\""),
            StringDelimiter::multiline("'''"),
            StringDelimiter::quoted("\""),
            StringDelimiter::quoted("'"),
        ],
        declarations: &[
            DeclarationRule::class(
                "class",
                r"^\s*(?:(?:abstract|base|final|sealed|interface)\s+)*(?P<keyword>class|mixin|enum|extension)\s+(?P<name>[A-Za-z_]\w*)",
            ),
            DeclarationRule::function(
                "function",
                r"^\s*(?:(?:static|external|factory|const)\s+)*(?:[\w<>\[\],\?]+\s+)?(?P<name>[A-Za-z_]\w*)\s*\([^()]*\)\s*(?:async\s*\*?\s*)?(?:\{|=>)",
            ),
        ],
        terminator: Some(';'),
        reserved_names: C_FAMILY_WORDS,
        statement_words: C_STATEMENT_WORDS,
        expression_body: Some(ARROW_BODY),
        ..LanguageProfile::EMPTY
    },
];
