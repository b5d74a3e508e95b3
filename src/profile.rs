//! Language profiles
//!
//! A profile is a plain value describing the grammar variants of one language: comment
//! syntax, string syntax, numeric literal grammar, which definition patterns the extractor
//! looks for, and the keyword table. Adding a language means adding a profile value.

use serde::Serialize;
use std::path::Path;

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommentSyntax {
    /// `//` comments; when off, `//` lexes as two `/` operators
    pub line_comments: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StringSyntax {
    /// `'x'` literals; when off, `'` is an `Other` token
    pub char_literals: bool,
    /// An unescaped CR/LF ends an open literal (marked unterminated)
    pub line_break_terminates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumericGrammar {
    pub hex_floats: bool,
    pub binary_literals: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefinitionPatterns {
    pub macros: bool,
    pub classes: bool,
    pub namespaces: bool,
    pub templates: bool,
    pub qualified_names: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageProfile {
    pub name: &'static str,
    #[serde(skip)]
    pub extensions: &'static [&'static str],
    pub comments: CommentSyntax,
    pub strings: StringSyntax,
    pub numbers: NumericGrammar,
    pub definitions: DefinitionPatterns,
    #[serde(skip)]
    keywords: &'static [&'static [&'static str]],
}

const C_KEYWORDS: &[&str] = &[
    "_Alignas", "_Alignof", "_Atomic", "_Bool", "_Complex", "_Generic", "_Imaginary",
    "_Noreturn", "_Static_assert", "_Thread_local", "auto", "break", "case", "char", "const",
    "continue", "default", "do", "double", "else", "enum", "extern", "float", "for", "goto",
    "if", "inline", "int", "long", "register", "restrict", "return", "short", "signed",
    "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while",
];

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

static C: LanguageProfile = LanguageProfile {
    name: "c",
    extensions: &["c", "h"],
    comments: CommentSyntax {
        line_comments: true,
    },
    strings: StringSyntax {
        char_literals: true,
        line_break_terminates: true,
    },
    numbers: NumericGrammar {
        hex_floats: true,
        binary_literals: false,
    },
    definitions: DefinitionPatterns {
        macros: true,
        classes: false,
        namespaces: false,
        templates: false,
        qualified_names: false,
    },
    keywords: &[C_KEYWORDS],
};

static CPP: LanguageProfile = LanguageProfile {
    name: "cpp",
    extensions: &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx", "h++", "ipp", "tpp"],
    comments: CommentSyntax {
        line_comments: true,
    },
    strings: StringSyntax {
        char_literals: true,
        line_break_terminates: true,
    },
    numbers: NumericGrammar {
        hex_floats: true,
        binary_literals: true,
    },
    definitions: DefinitionPatterns {
        macros: true,
        classes: true,
        namespaces: true,
        templates: true,
        qualified_names: true,
    },
    keywords: &[CPP_KEYWORDS],
};

/// Superset of C and C++: C++ grammar, but C's underscore keywords are keywords too.
static C_FAMILY: LanguageProfile = LanguageProfile {
    name: "c-family",
    extensions: &[],
    comments: CommentSyntax {
        line_comments: true,
    },
    strings: StringSyntax {
        char_literals: true,
        line_break_terminates: true,
    },
    numbers: NumericGrammar {
        hex_floats: true,
        binary_literals: true,
    },
    definitions: DefinitionPatterns {
        macros: true,
        classes: true,
        namespaces: true,
        templates: true,
        qualified_names: true,
    },
    keywords: &[CPP_KEYWORDS, C_KEYWORDS],
};

static C89: LanguageProfile = LanguageProfile {
    name: "c89",
    extensions: &[],
    comments: CommentSyntax {
        line_comments: false,
    },
    strings: StringSyntax {
        char_literals: true,
        line_break_terminates: true,
    },
    numbers: NumericGrammar {
        hex_floats: false,
        binary_literals: false,
    },
    definitions: DefinitionPatterns {
        macros: true,
        classes: false,
        namespaces: false,
        templates: false,
        qualified_names: false,
    },
    keywords: &[C_KEYWORDS],
};

impl LanguageProfile {
    pub fn c() -> &'static LanguageProfile {
        &C
    }

    pub fn cpp() -> &'static LanguageProfile {
        &CPP
    }

    pub fn c_family() -> &'static LanguageProfile {
        &C_FAMILY
    }

    pub fn c89() -> &'static LanguageProfile {
        &C89
    }

    pub fn all() -> [&'static LanguageProfile; 4] {
        [&C_FAMILY, &C, &CPP, &C89]
    }

    /// Look a profile up by name (`c-family`, `c`, `cpp`/`c++`, `c89`).
    pub fn by_name(name: &str) -> Result<&'static LanguageProfile, AnalysisError> {
        match name.to_ascii_lowercase().as_str() {
            "c-family" | "cfamily" => Ok(&C_FAMILY),
            "c" => Ok(&C),
            "cpp" | "c++" | "cxx" => Ok(&CPP),
            "c89" | "ansi-c" => Ok(&C89),
            _ => Err(AnalysisError::UnknownProfile(name.to_string())),
        }
    }

    /// Pick a profile from a file extension, falling back to `c-family`.
    pub fn for_path(path: &Path) -> &'static LanguageProfile {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext {
            Some(ext) if C.extensions.contains(&ext.as_str()) => &C,
            Some(ext) if CPP.extensions.contains(&ext.as_str()) => &CPP,
            _ => &C_FAMILY,
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.iter().any(|table| table.contains(&word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(LanguageProfile::by_name("c-family").unwrap().name, "c-family");
        assert_eq!(LanguageProfile::by_name("C++").unwrap().name, "cpp");
        assert!(matches!(
            LanguageProfile::by_name("fortran"),
            Err(AnalysisError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_lookup_by_path() {
        assert_eq!(LanguageProfile::for_path(Path::new("sdt.h")).name, "c");
        assert_eq!(LanguageProfile::for_path(Path::new("a/b/Widget.HPP")).name, "cpp");
        assert_eq!(LanguageProfile::for_path(Path::new("Makefile")).name, "c-family");
    }

    #[test]
    fn test_keyword_tables() {
        assert!(LanguageProfile::cpp().is_keyword("class"));
        assert!(!LanguageProfile::c().is_keyword("class"));
        assert!(LanguageProfile::c().is_keyword("_Bool"));
        assert!(LanguageProfile::c_family().is_keyword("_Bool"));
        assert!(LanguageProfile::c_family().is_keyword("namespace"));
        assert!(!LanguageProfile::cpp().is_keyword("main"));
    }

    #[test]
    fn test_c_has_no_class_patterns() {
        let c = LanguageProfile::c();
        assert!(c.definitions.macros);
        assert!(!c.definitions.classes);
        assert!(!c.definitions.namespaces);
        assert!(!LanguageProfile::c89().comments.line_comments);
    }
}
