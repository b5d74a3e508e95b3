//! Numeric literal classification
//!
//! Classification looks at the lexeme text only, so the same lexeme always lands in the same
//! form. Forms are tried in priority order: hex float, hex integer, binary integer, octal
//! integer, decimal float, decimal integer. Values are computed best-effort: a float that
//! overflows becomes infinity, one that underflows becomes zero, and an integer wider than
//! `u128` is `Unrepresentable`. None of these are errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::profile::NumericGrammar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumericForm {
    DecimalInteger,
    OctalInteger,
    HexInteger,
    BinaryInteger,
    HexFloat,
    DecimalFloatWithExponent,
    DecimalFloatPlain,
}

impl NumericForm {
    pub fn is_float(self) -> bool {
        matches!(
            self,
            NumericForm::HexFloat
                | NumericForm::DecimalFloatWithExponent
                | NumericForm::DecimalFloatPlain
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumericValue {
    Integer(u128),
    Float(f64),
    Unrepresentable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericLiteral {
    pub form: NumericForm,
    pub value: NumericValue,
    /// Suffix exactly as written (`ULL`, `f`, ...), empty when absent
    pub suffix: String,
}

static HEX_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0[xX]([0-9a-fA-F]*)(?:\.([0-9a-fA-F]*))?[pP]([+-]?[0-9]+)([fFlL]?)$")
        .expect("hex float pattern")
});

static HEX_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[xX]([0-9a-fA-F]+)([uUlL]*)$").expect("hex int pattern"));

static BIN_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[bB]([01]+)([uUlL]*)$").expect("binary int pattern"));

static OCT_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0([0-7]+)([uUlL]*)$").expect("octal int pattern"));

static DEC_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)([eE][+-]?[0-9]+)?([fFlL]?)$")
        .expect("decimal float pattern")
});

static DEC_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([1-9][0-9]*|0)([uUlL]*)$").expect("decimal int pattern"));

/// Classify a number lexeme. `None` means it fits no form of `grammar` (malformed).
pub fn classify_numeric(lexeme: &str, grammar: &NumericGrammar) -> Option<NumericLiteral> {
    if let Some(caps) = HEX_FLOAT.captures(lexeme) {
        if !grammar.hex_floats {
            return None;
        }
        let whole = caps.get(1).map_or("", |m| m.as_str());
        let fraction = caps.get(2).map_or("", |m| m.as_str());
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let exponent = caps.get(3).map_or("0", |m| m.as_str());
        return Some(NumericLiteral {
            form: NumericForm::HexFloat,
            value: NumericValue::Float(hex_float_value(whole, fraction, exponent)),
            suffix: caps.get(4).map_or("", |m| m.as_str()).to_string(),
        });
    }

    if let Some(caps) = HEX_INT.captures(lexeme) {
        return integer(NumericForm::HexInteger, &caps, 16);
    }

    if let Some(caps) = BIN_INT.captures(lexeme) {
        if !grammar.binary_literals {
            return None;
        }
        return integer(NumericForm::BinaryInteger, &caps, 2);
    }

    if let Some(caps) = OCT_INT.captures(lexeme) {
        return integer(NumericForm::OctalInteger, &caps, 8);
    }

    if let Some(caps) = DEC_FLOAT.captures(lexeme) {
        let mantissa = caps.get(1).map_or("", |m| m.as_str());
        let exponent = caps.get(2).map(|m| m.as_str());
        let has_dot = mantissa.contains('.');
        if has_dot || exponent.is_some() {
            let form = if exponent.is_some() {
                NumericForm::DecimalFloatWithExponent
            } else {
                NumericForm::DecimalFloatPlain
            };
            let suffix = caps.get(3).map_or("", |m| m.as_str());
            let digits = &lexeme[..lexeme.len() - suffix.len()];
            let value = digits.parse::<f64>().map_or(
                NumericValue::Unrepresentable,
                NumericValue::Float,
            );
            return Some(NumericLiteral {
                form,
                value,
                suffix: suffix.to_string(),
            });
        }
    }

    if let Some(caps) = DEC_INT.captures(lexeme) {
        return integer(NumericForm::DecimalInteger, &caps, 10);
    }

    None
}

fn integer(form: NumericForm, caps: &regex::Captures<'_>, radix: u32) -> Option<NumericLiteral> {
    let digits = caps.get(1).map_or("", |m| m.as_str());
    let suffix = caps.get(2).map_or("", |m| m.as_str());
    if !is_integer_suffix(suffix) {
        return None;
    }
    let value = u128::from_str_radix(digits, radix)
        .map_or(NumericValue::Unrepresentable, NumericValue::Integer);
    Some(NumericLiteral {
        form,
        value,
        suffix: suffix.to_string(),
    })
}

/// `u`, `l`, `ll` and their combinations, in any case and either order.
fn is_integer_suffix(suffix: &str) -> bool {
    matches!(
        suffix.to_ascii_lowercase().as_str(),
        "" | "u" | "l" | "ll" | "ul" | "lu" | "ull" | "llu"
    )
}

/// Hex digits kept in the mantissa; 15 digits (60 bits) fit a `u64` and cover an `f64`.
const HEX_MANTISSA_DIGITS: usize = 15;

fn hex_float_value(whole: &str, fraction: &str, exponent: &str) -> f64 {
    // Leading zeros carry no value; digits past the kept ones only shift the exponent.
    let digits: Vec<u32> = whole
        .chars()
        .chain(fraction.chars())
        .filter_map(|c| c.to_digit(16))
        .skip_while(|&d| d == 0)
        .collect();
    let kept = digits.len().min(HEX_MANTISSA_DIGITS);
    let mantissa = digits[..kept]
        .iter()
        .fold(0u64, |acc, &d| (acc << 4) | u64::from(d));
    let dropped = (digits.len() - kept) as i64;

    // Exponents too large for i64 saturate; the result is inf or 0 either way.
    let exponent = exponent.parse::<i64>().unwrap_or_else(|_| {
        if exponent.starts_with('-') {
            i64::MIN / 2
        } else {
            i64::MAX / 2
        }
    });
    let scale = exponent
        .saturating_sub(4 * fraction.len() as i64)
        .saturating_add(4 * dropped);
    scale_by_power_of_two(mantissa as f64, scale)
}

/// `value * 2^exp` without overflowing intermediate powers.
fn scale_by_power_of_two(mut value: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    if value == 0.0 {
        return 0.0;
    }
    while exp > STEP {
        value *= 2f64.powi(STEP as i32);
        exp -= STEP;
        if value.is_infinite() {
            return value;
        }
    }
    while exp < -STEP {
        value *= 2f64.powi(-STEP as i32);
        exp += STEP;
        if value == 0.0 {
            return value;
        }
    }
    value * 2f64.powi(exp as i32)
}
