//! Property-based tests for the lexer and line tables
//!
//! Any input, valid C or not, must tokenize losslessly and place every token where the line
//! table says it is.

use proptest::prelude::*;
use srcxref::lexer::{detokenize, tokenize, Token};
use srcxref::lines::{LineTable, LineTerminatorPolicy};
use srcxref::LanguageProfile;

/// Characters that exercise comments, literals, directives and every line terminator.
const C_LIKE: &str =
    "[a-z0-9_ \\t\\n\\r\"'/*#{}();.+\\\\\u{0B}\u{0C}\u{85}\u{2028}\u{2029}-]{0,80}";

fn lexemes(source: &str, profile: &LanguageProfile) -> Vec<String> {
    tokenize(source, profile)
        .map(|t| t.lexeme.to_string())
        .collect()
}

proptest! {
    #[test]
    fn test_arbitrary_text_round_trips(source in any::<String>()) {
        for profile in LanguageProfile::all() {
            let tokens: Vec<Token> = tokenize(&source, profile).collect();
            prop_assert_eq!(detokenize(&tokens), source.clone());
        }
    }

    #[test]
    fn test_c_like_text_round_trips(source in C_LIKE) {
        for profile in LanguageProfile::all() {
            let tokens: Vec<Token> = tokenize(&source, profile).collect();
            prop_assert_eq!(detokenize(&tokens), source.clone());
        }
    }

    #[test]
    fn test_retokenizing_is_idempotent(source in C_LIKE) {
        let profile = LanguageProfile::cpp();
        let tokens: Vec<Token> = tokenize(&source, profile).collect();
        let rebuilt = detokenize(&tokens);
        prop_assert_eq!(lexemes(&rebuilt, profile), lexemes(&source, profile));
    }

    #[test]
    fn test_tokens_are_contiguous_and_located(source in C_LIKE) {
        let table = LineTable::new(&source, LineTerminatorPolicy::Wide);
        let mut offset = 0;
        for token in tokenize(&source, LanguageProfile::c_family()) {
            prop_assert!(!token.lexeme.is_empty());
            prop_assert_eq!(token.span().start, offset);
            prop_assert_eq!(token.start(), table.position(token.span().start));
            prop_assert_eq!(token.end(), table.position(token.span().end));
            offset = token.span().end;
        }
        prop_assert_eq!(offset, source.len());
    }

    #[test]
    fn test_narrow_never_counts_more_lines(source in C_LIKE) {
        let wide = LineTable::new(&source, LineTerminatorPolicy::Wide);
        let narrow = LineTable::new(&source, LineTerminatorPolicy::Narrow);
        prop_assert!(narrow.count() <= wide.count());
    }
}
