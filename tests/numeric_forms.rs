//! Numeric literal classification table

use rstest::rstest;
use srcxref::lexer::{classify_numeric, NumericForm, NumericValue};
use srcxref::LanguageProfile;

#[rstest]
#[case("0", NumericForm::DecimalInteger, NumericValue::Integer(0), "")]
#[case("42ULL", NumericForm::DecimalInteger, NumericValue::Integer(42), "ULL")]
#[case("0755", NumericForm::OctalInteger, NumericValue::Integer(493), "")]
#[case("0x1F", NumericForm::HexInteger, NumericValue::Integer(31), "")]
#[case("0xffu", NumericForm::HexInteger, NumericValue::Integer(255), "u")]
#[case("0b1010", NumericForm::BinaryInteger, NumericValue::Integer(10), "")]
#[case("0x1.ep+3", NumericForm::HexFloat, NumericValue::Float(15.0), "")]
#[case("0x1p-1f", NumericForm::HexFloat, NumericValue::Float(0.5), "f")]
#[case("1e3", NumericForm::DecimalFloatWithExponent, NumericValue::Float(1000.0), "")]
#[case("2.5E-1L", NumericForm::DecimalFloatWithExponent, NumericValue::Float(0.25), "L")]
#[case("3.", NumericForm::DecimalFloatPlain, NumericValue::Float(3.0), "")]
#[case(".5f", NumericForm::DecimalFloatPlain, NumericValue::Float(0.5), "f")]
fn test_classification(
    #[case] lexeme: &str,
    #[case] form: NumericForm,
    #[case] value: NumericValue,
    #[case] suffix: &str,
) {
    let literal = classify_numeric(lexeme, &LanguageProfile::cpp().numbers)
        .unwrap_or_else(|| panic!("{} should classify", lexeme));
    assert_eq!(literal.form, form);
    assert_eq!(literal.value, value);
    assert_eq!(literal.suffix, suffix);
}

#[test]
fn test_long_hex_fraction() {
    let lexeme = format!("0x1.{}p0", "f".repeat(300));
    let literal = classify_numeric(&lexeme, &LanguageProfile::cpp().numbers).unwrap();
    assert_eq!(literal.form, NumericForm::HexFloat);
    assert_eq!(literal.value, NumericValue::Float(2.0));
}

#[rstest]
#[case("09")]
#[case("0x")]
#[case("1.2.3")]
#[case("0xp3")]
#[case("12abc")]
#[case("1e")]
#[case("0b12")]
fn test_malformed(#[case] lexeme: &str) {
    assert_eq!(classify_numeric(lexeme, &LanguageProfile::cpp().numbers), None);
}

#[rstest]
#[case(LanguageProfile::c(), "0b11", false)]
#[case(LanguageProfile::cpp(), "0b11", true)]
#[case(LanguageProfile::c89(), "0x1p4", false)]
#[case(LanguageProfile::c(), "0x1p4", true)]
fn test_profile_grammar(#[case] profile: &LanguageProfile, #[case] lexeme: &str, #[case] ok: bool) {
    assert_eq!(classify_numeric(lexeme, &profile.numbers).is_some(), ok);
}
