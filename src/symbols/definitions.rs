//! Definitions table
//!
//! Indexes the definitions of one file by symbol name and by line, so a consumer walking
//! the token stream can ask "is this identifier defined here?" without rescanning. Lines
//! are whatever the extractor reported, so the table follows the extractor's line policy.

use std::collections::{BTreeMap, BTreeSet};

use crate::symbols::{SymbolDefinition, SymbolKind};

#[derive(Debug, Clone, Default)]
pub struct Definitions {
    /// symbol -> lines it is defined on
    symbols: BTreeMap<String, BTreeSet<usize>>,
    /// line -> indices into `tags`
    lines: BTreeMap<usize, Vec<usize>>,
    tags: Vec<SymbolDefinition>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = SymbolDefinition>,
    {
        let mut table = Self::new();
        for definition in definitions {
            table.add(definition);
        }
        table
    }

    pub fn add(&mut self, definition: SymbolDefinition) {
        let index = self.tags.len();
        self.symbols
            .entry(definition.name.clone())
            .or_default()
            .insert(definition.decl_line);
        self.lines
            .entry(definition.decl_line)
            .or_default()
            .push(index);
        self.tags.push(definition);
    }

    /// Distinct symbol names, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    /// Kind of the first definition of `symbol` on `line`.
    pub fn definition_at(&self, symbol: &str, line: usize) -> Option<SymbolKind> {
        self.definitions_of_on(symbol, line).next().map(|d| d.kind)
    }

    /// Every definition of `symbol` on `line`, in extraction order.
    pub fn definitions_of_on<'s>(
        &'s self,
        symbol: &'s str,
        line: usize,
    ) -> impl Iterator<Item = &'s SymbolDefinition> + 's {
        self.tags_on_line(line)
            .into_iter()
            .filter(move |d| d.name == symbol)
    }

    /// Number of distinct lines `symbol` is defined on.
    pub fn occurrences(&self, symbol: &str) -> usize {
        self.symbols.get(symbol).map_or(0, BTreeSet::len)
    }

    pub fn number_of_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// All definitions in extraction order.
    pub fn tags(&self) -> &[SymbolDefinition] {
        &self.tags
    }

    pub fn tags_on_line(&self, line: usize) -> Vec<&SymbolDefinition> {
        self.lines
            .get(&line)
            .map(|indices| indices.iter().map(|&i| &self.tags[i]).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, kind: SymbolKind, line: usize, start: usize) -> SymbolDefinition {
        SymbolDefinition {
            name: name.to_string(),
            kind,
            decl_line: line,
            column: 0,
            span: start..start + name.len(),
            scope_path: Vec::new(),
            templated: false,
            signature: String::new(),
        }
    }

    fn sample() -> Definitions {
        Definitions::from_definitions(vec![
            def("point", SymbolKind::Struct, 0, 7),
            def("point", SymbolKind::Variable, 0, 30),
            def("main", SymbolKind::Function, 3, 40),
            def("point", SymbolKind::Variable, 5, 70),
        ])
    }

    #[test]
    fn test_symbol_lookup() {
        let defs = sample();
        assert!(defs.has_symbol("point"));
        assert!(!defs.has_symbol("other"));
        assert_eq!(defs.symbols().collect::<Vec<_>>(), vec!["main", "point"]);
        assert_eq!(defs.number_of_symbols(), 2);
        assert_eq!(defs.occurrences("point"), 2);
        assert_eq!(defs.occurrences("missing"), 0);
    }

    #[test]
    fn test_definitions_by_line() {
        let defs = sample();
        assert_eq!(defs.definition_at("point", 0), Some(SymbolKind::Struct));
        assert_eq!(defs.definition_at("point", 5), Some(SymbolKind::Variable));
        assert_eq!(defs.definition_at("main", 0), None);
        assert_eq!(defs.definitions_of_on("point", 0).count(), 2);
        assert_eq!(defs.tags_on_line(3).len(), 1);
        assert!(defs.tags_on_line(4).is_empty());
        assert_eq!(defs.tags().len(), 4);
    }
}
