//! Definition records produced by the extractor.

use serde::Serialize;
use std::fmt;

/// The kind of a recognized definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    Macro,
    Struct,
    Namespace,
    Variable,
    Enum,
    Union,
}

impl SymbolKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Macro => "macro",
            Self::Struct => "struct",
            Self::Namespace => "namespace",
            Self::Variable => "variable",
            Self::Enum => "enum",
            Self::Union => "union",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A definition found in the token stream. Never modified once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolDefinition {
    /// Simple name (`addInstance`, `~Widget`, `operator==`)
    pub name: String,
    pub kind: SymbolKind,
    /// 0-based line of the name, under the policy the extractor reports with
    pub decl_line: usize,
    /// 0-based byte column of the name
    pub column: usize,
    /// Byte range of the name in the source
    pub span: std::ops::Range<usize>,
    /// Enclosing namespace/class names, outermost first. Qualifiers written on the name
    /// itself (`Ancestor::addInstance`) are part of the path.
    pub scope_path: Vec<String>,
    /// Preceded by a `template<...>` run
    pub templated: bool,
    /// Declaration text up to the opening brace (or terminator), whitespace collapsed
    pub signature: String,
}

impl SymbolDefinition {
    /// Name joined to its scope path with `::`.
    pub fn qualified_name(&self) -> String {
        if self.scope_path.is_empty() {
            return self.name.clone();
        }
        format!("{}::{}", self.scope_path.join("::"), self.name)
    }
}

impl fmt::Display for SymbolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {}",
            self.decl_line + 1,
            self.column + 1,
            self.kind,
            self.qualified_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str, scope_path: &[&str]) -> SymbolDefinition {
        SymbolDefinition {
            name: name.to_string(),
            kind: SymbolKind::Function,
            decl_line: 4,
            column: 6,
            span: 30..41,
            scope_path: scope_path.iter().map(|s| s.to_string()).collect(),
            templated: false,
            signature: String::new(),
        }
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(definition("main", &[]).qualified_name(), "main");
        assert_eq!(
            definition("addInstance", &["ns", "Ancestor"]).qualified_name(),
            "ns::Ancestor::addInstance"
        );
    }

    #[test]
    fn test_display_is_one_based() {
        let def = definition("addInstance", &["Ancestor"]);
        assert_eq!(def.to_string(), "5:7 function Ancestor::addInstance");
    }
}
