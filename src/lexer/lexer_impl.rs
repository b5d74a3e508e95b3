//! Implementation of the C-family lexer
//!
//! [`Lexer`] wraps the logos raw lexer and turns raw tokens into classified [`Token`]s:
//! keywords are split from identifiers with the profile's keyword table, number lexemes
//! are checked against the profile's numeric grammar, unclosed constructs get their
//! diagnostic, and every token is located with a wide-policy [`LineTable`].
//!
//! The lexer is an iterator: nothing is scanned until the consumer asks for the next token,
//! and dropping it mid-way has no effect beyond releasing the cursor.

use logos::Logos;

use crate::error::Diagnostic;
use crate::lexer::numeric::classify_numeric;
use crate::lexer::token::{CommentStyle, Token, TokenKind};
use crate::lexer::tokens::{RawToken, Scan, ScanState};
use crate::lines::{LineTable, LineTerminatorPolicy};
use crate::profile::LanguageProfile;

pub struct Lexer<'src> {
    raw: logos::Lexer<'src, RawToken>,
    source: &'src str,
    profile: &'src LanguageProfile,
    lines: LineTable,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, profile: &'src LanguageProfile) -> Self {
        Self {
            raw: RawToken::lexer_with_extras(source, ScanState::for_profile(profile)),
            source,
            profile,
            lines: LineTable::new(source, LineTerminatorPolicy::Wide),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn profile(&self) -> &'src LanguageProfile {
        self.profile
    }

    /// The wide-policy table the lexer locates its tokens with.
    pub fn line_table(&self) -> &LineTable {
        &self.lines
    }

    /// Continue scanning from `offset` instead of where the last raw token ended.
    fn restart_at(&mut self, offset: usize) {
        let mut raw = RawToken::lexer_with_extras(self.source, self.raw.extras);
        raw.bump(offset);
        self.raw = raw;
    }

    fn token(
        &self,
        kind: TokenKind,
        span: std::ops::Range<usize>,
        diagnostic: Option<Diagnostic>,
    ) -> Token<'src> {
        let source = self.source;
        Token {
            kind,
            lexeme: &source[span.clone()],
            range: self.lines.range(&span),
            diagnostic,
        }
    }

    fn classify(&mut self, raw: RawToken, span: std::ops::Range<usize>) -> Token<'src> {
        let source = self.source;
        let lexeme = &source[span.clone()];
        match raw {
            RawToken::BlockComment(scan) => self.token(
                TokenKind::Comment(CommentStyle::Block),
                span,
                (scan == Scan::Unterminated).then_some(Diagnostic::UnterminatedComment),
            ),
            RawToken::LineComment(Scan::Disabled) => {
                // Only the first `/` is an operator; scanning resumes at the second one so
                // `//=` becomes `/` `/=`
                self.restart_at(span.start + 1);
                self.token(TokenKind::Operator, span.start..span.start + 1, None)
            }
            RawToken::LineComment(_) => {
                self.token(TokenKind::Comment(CommentStyle::Line), span, None)
            }
            RawToken::String(scan) => self.token(TokenKind::String, span, literal_diagnostic(scan)),
            RawToken::Char(Scan::Disabled) => self.token(TokenKind::Other, span, None),
            RawToken::Char(scan) => self.token(TokenKind::Char, span, literal_diagnostic(scan)),
            RawToken::Number => match classify_numeric(lexeme, &self.profile.numbers) {
                Some(_) => self.token(TokenKind::Number, span, None),
                None => self.token(
                    TokenKind::Other,
                    span,
                    Some(Diagnostic::MalformedNumericLiteral),
                ),
            },
            RawToken::Identifier if self.profile.is_keyword(lexeme) => {
                self.token(TokenKind::Keyword, span, None)
            }
            RawToken::Identifier => self.token(TokenKind::Identifier, span, None),
            RawToken::Operator => self.token(TokenKind::Operator, span, None),
            RawToken::Whitespace => self.token(TokenKind::Whitespace, span, None),
            RawToken::Newline => self.token(TokenKind::Newline, span, None),
        }
    }
}

fn literal_diagnostic(scan: Scan) -> Option<Diagnostic> {
    (scan == Scan::Unterminated).then_some(Diagnostic::UnterminatedLiteral)
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.raw.next()?;
        let span = self.raw.span();
        Some(match result {
            Ok(raw) => self.classify(raw, span),
            Err(()) => self.token(TokenKind::Other, span, None),
        })
    }
}

/// Tokenize `source` lazily with the grammar of `profile`.
pub fn tokenize<'src>(source: &'src str, profile: &'src LanguageProfile) -> Lexer<'src> {
    Lexer::new(source, profile)
}
