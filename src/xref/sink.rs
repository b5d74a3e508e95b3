//! Sink trait and the records handed to it.

use serde::Serialize;

use crate::error::Diagnostic;
use crate::lexer::{Token, TokenKind};
use crate::lines::LineTable;
use crate::symbols::{Definitions, SymbolDefinition};

/// A token as the consumer sees it: positions come from the caller's line table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub kind: &'static str,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
}

impl TokenRecord {
    pub fn new(token: &Token<'_>, table: &LineTable) -> Self {
        let range = table.range(&token.span());
        Self {
            kind: token.kind.name(),
            lexeme: token.lexeme.to_string(),
            line: range.start.line,
            column: range.start.column,
            end_line: range.end.line,
            end_column: range.end.column,
            diagnostic: token.diagnostic,
        }
    }
}

/// An identifier that is not the definition site of its symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRecord {
    pub symbol: String,
    pub line: usize,
    pub column: usize,
    /// The symbol has a definition in the same file
    pub defined_in_file: bool,
}

pub trait XrefSink {
    fn token(&mut self, token: TokenRecord);
    fn definition(&mut self, definition: &SymbolDefinition);
    fn reference(&mut self, reference: ReferenceRecord);
    /// Called once after everything else.
    fn finish(&mut self) {}
}

/// Drive `sink` with the definitions of `definitions`, then every token (trivia only when
/// `include_trivia`) and the references among them.
pub fn write_xref<S: XrefSink + ?Sized>(
    tokens: &[Token<'_>],
    definitions: &Definitions,
    table: &LineTable,
    include_trivia: bool,
    sink: &mut S,
) {
    for definition in definitions.tags() {
        sink.definition(definition);
    }
    for token in tokens {
        if token.kind.is_trivia() && !include_trivia {
            continue;
        }
        let record = TokenRecord::new(token, table);
        let (line, column) = (record.line, record.column);
        sink.token(record);

        if token.kind != TokenKind::Identifier {
            continue;
        }
        let start = token.range.span.start;
        let is_site = definitions
            .definitions_of_on(token.lexeme, line)
            .any(|d| d.span.start == start);
        if !is_site {
            sink.reference(ReferenceRecord {
                symbol: token.lexeme.to_string(),
                line,
                column,
                defined_in_file: definitions.has_symbol(token.lexeme),
            });
        }
    }
    sink.finish();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::lines::LineTerminatorPolicy;
    use crate::profile::LanguageProfile;
    use crate::symbols::extract_definitions;

    #[derive(Default)]
    struct Counting {
        tokens: usize,
        definitions: usize,
        references: Vec<String>,
        finished: bool,
    }

    impl XrefSink for Counting {
        fn token(&mut self, _token: TokenRecord) {
            self.tokens += 1;
        }

        fn definition(&mut self, _definition: &SymbolDefinition) {
            self.definitions += 1;
        }

        fn reference(&mut self, reference: ReferenceRecord) {
            self.references.push(reference.symbol);
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    #[test]
    fn test_definition_sites_are_not_references() {
        let source = "int count;\nint next(void) { return count + 1; }\n";
        let profile = LanguageProfile::c();
        let tokens: Vec<Token> = tokenize(source, profile).collect();
        let definitions =
            Definitions::from_definitions(extract_definitions(tokens.clone(), profile));
        let table = LineTable::new(source, LineTerminatorPolicy::Wide);

        let mut sink = Counting::default();
        write_xref(&tokens, &definitions, &table, false, &mut sink);
        assert_eq!(sink.definitions, 2);
        assert_eq!(sink.references, vec!["count"]);
        assert_eq!(
            sink.tokens,
            tokens.iter().filter(|t| !t.kind.is_trivia()).count()
        );
        assert!(sink.finished);
    }

    #[test]
    fn test_token_record_follows_table() {
        let source = "a\u{2028}b";
        let tokens: Vec<Token> = tokenize(source, LanguageProfile::c()).collect();
        let narrow = LineTable::new(source, LineTerminatorPolicy::Narrow);
        let record = TokenRecord::new(&tokens[2], &narrow);
        assert_eq!(record.lexeme, "b");
        assert_eq!((record.line, record.column), (0, 4));
        assert_eq!(tokens[2].start().line, 1);
    }
}
