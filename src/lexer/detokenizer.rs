//! Detokenizer for C-family token streams
//!
//! Tokens keep their exact lexeme, so turning a stream back into text is concatenation.
use crate::lexer::token::Token;

/// Detokenize a stream of tokens into a string
pub fn detokenize(tokens: &[Token<'_>]) -> String {
    let mut result = String::with_capacity(tokens.iter().map(|t| t.lexeme.len()).sum());
    for token in tokens {
        result.push_str(token.lexeme);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::profile::LanguageProfile;

    fn round_trip(source: &str) {
        let tokens: Vec<Token> = tokenize(source, LanguageProfile::c_family()).collect();
        assert_eq!(detokenize(&tokens), source);
    }

    #[test]
    fn test_detokenize_function() {
        round_trip("int main(int argc, char **argv)\n{\n    return 0;\n}\n");
    }

    #[test]
    fn test_detokenize_comments_and_literals() {
        round_trip("/* a \"*/\" b */ // trailing\r\nchar c = '\\'';\n");
    }

    #[test]
    fn test_detokenize_malformed_input() {
        round_trip("x = 09abc; s = \"open\n/* never closed");
    }

    #[test]
    fn test_detokenize_unicode_breaks() {
        round_trip("a\u{2028}b\u{2029}c\u{85}d\u{0B}e\u{0C}f");
    }
}
