//! Lexer Core for C-family sources
//!
//! This module turns a source buffer into a lazy stream of classified tokens: comments,
//! string and char literals, numbers, identifiers, keywords, operators, whitespace and line
//! breaks. Every byte of the input lands in exactly one token, so concatenating the lexemes
//! gives back the input (see [detokenize](detokenizer::detokenize)).
//!
//! Two passes
//!
//!     The raw pass is a logos lexer ([RawToken](tokens::RawToken)). Fixed tokens are plain
//!     patterns; comments, quoted literals and line breaks are scanned by callbacks. The
//!     second pass ([Lexer](lexer_impl::Lexer)) classifies: identifiers become keywords
//!     through the language profile, number lexemes are checked against the profile's
//!     numeric grammar, and each token is located under the wide line policy.
//!
//! Tolerance
//!
//!     Malformed input never stops the scan. Unclosed comments and literals run as far as
//!     they can and carry an "unterminated" diagnostic; bad numbers and stray characters are
//!     `Other` tokens. The only hard failure is a buffer that is not UTF-8, caught by
//!     [decode] before any token is produced.

pub mod detokenizer;
pub mod lexer_impl;
pub mod numeric;
pub mod token;
pub mod tokens;

pub use detokenizer::detokenize;
pub use lexer_impl::{tokenize, Lexer};
pub use numeric::{classify_numeric, NumericForm, NumericLiteral, NumericValue};
pub use token::{CommentStyle, Token, TokenKind};

use crate::error::AnalysisError;

/// Decode a source buffer. A byte order mark is kept and lexes as an `Other` token.
pub fn decode(bytes: &[u8]) -> Result<&str, AnalysisError> {
    std::str::from_utf8(bytes).map_err(|e| AnalysisError::Decode {
        offset: e.valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LanguageProfile;

    #[test]
    fn test_decode_reports_offset() {
        let err = decode(b"int x;\xff\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Decode { offset: 6 }));
    }

    #[test]
    fn test_bom_is_kept() {
        let source = decode("\u{FEFF}int x;".as_bytes()).unwrap();
        let tokens: Vec<Token> = tokenize(source, LanguageProfile::c()).collect();
        assert_eq!(tokens[0].kind, TokenKind::Other);
        assert_eq!(tokens[0].lexeme, "\u{FEFF}");
        assert_eq!(detokenize(&tokens), source);
    }
}
