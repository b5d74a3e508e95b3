//! Lexer and line-policy behaviour on the sample sources in tests/fixtures

use std::fs;

use srcxref::lexer::{detokenize, tokenize, NumericForm, NumericValue, Token, TokenKind};
use srcxref::lines::{LineTable, LineTerminatorPolicy, Position};
use srcxref::{Diagnostic, LanguageProfile};

const FIXTURES: &[&str] = &[
    "ancestor.cpp",
    "ancestor.h",
    "bug15890.c",
    "numbers.c",
    "sdt.h",
    "unterminated.c",
];

fn read_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e))
}

#[test]
fn test_fixtures_round_trip_under_every_profile() {
    for name in FIXTURES {
        let source = read_fixture(name);
        for profile in LanguageProfile::all() {
            let tokens: Vec<Token> = tokenize(&source, profile).collect();
            assert_eq!(detokenize(&tokens), source, "{} with {}", name, profile.name);
        }
    }
}

#[test]
fn test_bug15890_line_counts() {
    let source = read_fixture("bug15890.c");
    assert_eq!(LineTable::new(&source, LineTerminatorPolicy::Wide).count(), 10);
    assert_eq!(LineTable::new(&source, LineTerminatorPolicy::Narrow).count(), 5);
}

#[test]
fn test_bug15890_separators_are_newline_tokens() {
    let source = read_fixture("bug15890.c");
    let newlines: Vec<String> = tokenize(&source, LanguageProfile::c())
        .filter(|t| t.kind == TokenKind::Newline)
        .map(|t| t.lexeme.to_string())
        .collect();
    assert_eq!(
        newlines,
        vec!["\n", "\u{0B}", "\u{0C}", "\u{85}", "\u{2028}", "\u{2029}", "\n", "\n", "\n"]
    );
}

#[test]
fn test_bug15890_tokens_carry_wide_positions() {
    let source = read_fixture("bug15890.c");
    let epsilon = tokenize(&source, LanguageProfile::c())
        .find(|t| t.lexeme == "epsilon")
        .unwrap();
    assert_eq!(epsilon.start(), Position::new(5, 4));

    let narrow = LineTable::new(&source, LineTerminatorPolicy::Narrow);
    assert_eq!(narrow.position(epsilon.span().start).line, 1);
}

#[test]
fn test_numbers_fixture() {
    let source = read_fixture("numbers.c");
    let profile = LanguageProfile::c();
    let tokens: Vec<Token> = tokenize(&source, profile).collect();

    let numbers: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Number)
        .map(|t| t.lexeme)
        .collect();
    assert_eq!(numbers, vec!["0x1.ep+3", "0x1p-99999", "42ULL", "0755", ".5f"]);

    let hex = tokens.iter().find(|t| t.lexeme == "0x1.ep+3").unwrap();
    let literal = hex.numeric(&profile.numbers).unwrap();
    assert_eq!(literal.form, NumericForm::HexFloat);
    assert_eq!(literal.value, NumericValue::Float(15.0));

    let tiny = tokens.iter().find(|t| t.lexeme == "0x1p-99999").unwrap();
    assert_eq!(
        tiny.numeric(&profile.numbers).unwrap().value,
        NumericValue::Float(0.0)
    );

    let bad = tokens.iter().find(|t| t.lexeme == "09").unwrap();
    assert_eq!(bad.kind, TokenKind::Other);
    assert_eq!(bad.diagnostic, Some(Diagnostic::MalformedNumericLiteral));
}

#[test]
fn test_c89_rejects_hex_floats() {
    let source = read_fixture("numbers.c");
    let tokens: Vec<Token> = tokenize(&source, LanguageProfile::c89()).collect();
    let hex = tokens.iter().find(|t| t.lexeme == "0x1.ep+3").unwrap();
    assert_eq!(hex.kind, TokenKind::Other);
    assert_eq!(hex.diagnostic, Some(Diagnostic::MalformedNumericLiteral));
}

#[test]
fn test_unterminated_constructs_recover() {
    let source = read_fixture("unterminated.c");
    let tokens: Vec<Token> = tokenize(&source, LanguageProfile::c()).collect();

    let string = tokens.iter().find(|t| t.kind == TokenKind::String).unwrap();
    assert_eq!(string.lexeme, "\"never closed");
    assert_eq!(string.diagnostic, Some(Diagnostic::UnterminatedLiteral));
    assert_eq!(string.start(), Position::new(1, 10));

    // Lexing resumes on the next line
    let after = tokens.iter().find(|t| t.lexeme == "after").unwrap();
    assert_eq!(after.kind, TokenKind::Identifier);
    assert_eq!(after.start(), Position::new(2, 4));

    let last = tokens.last().unwrap();
    assert!(last.kind.is_comment());
    assert_eq!(last.diagnostic, Some(Diagnostic::UnterminatedComment));
    assert_eq!(last.span().end, source.len());

    assert_eq!(tokens.iter().filter(|t| t.diagnostic.is_some()).count(), 2);
}
