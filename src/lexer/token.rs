//! Classified tokens
//!
//! A [`Token`] is what consumers see: a kind, the exact lexeme borrowed from the source, its
//! location under the wide line policy, and a diagnostic when the construct was malformed.

use std::fmt;

use crate::error::Diagnostic;
use crate::lexer::numeric::{classify_numeric, NumericLiteral};
use crate::lines::{Position, Range};
use crate::profile::NumericGrammar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    /// Ends at the next line boundary
    Line,
    /// Ends at the first `*/`, or runs to end of input
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment(CommentStyle),
    String,
    Char,
    Number,
    Identifier,
    Keyword,
    Operator,
    Whitespace,
    Newline,
    Other,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Comment(CommentStyle::Line) => "line-comment",
            TokenKind::Comment(CommentStyle::Block) => "block-comment",
            TokenKind::String => "string",
            TokenKind::Char => "char",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::Other => "other",
        }
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment(_))
    }

    /// Whitespace and line breaks
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub range: Range,
    pub diagnostic: Option<Diagnostic>,
}

impl<'src> Token<'src> {
    pub fn start(&self) -> Position {
        self.range.start
    }

    pub fn end(&self) -> Position {
        self.range.end
    }

    pub fn span(&self) -> std::ops::Range<usize> {
        self.range.span.clone()
    }

    pub fn is_unterminated(&self) -> bool {
        self.diagnostic.is_some_and(Diagnostic::is_unterminated)
    }

    /// Operator token with exactly this text
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.lexeme == op
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == word
    }

    /// Numeric classification of a `Number` token.
    pub fn numeric(&self, grammar: &NumericGrammar) -> Option<NumericLiteral> {
        if self.kind != TokenKind::Number {
            return None;
        }
        classify_numeric(self.lexeme, grammar)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.range, self.kind, self.lexeme)?;
        if let Some(diagnostic) = self.diagnostic {
            write!(f, " ({})", diagnostic)?;
        }
        Ok(())
    }
}
