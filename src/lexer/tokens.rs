//! Raw token definitions for C-family sources
//!
//! Simple tokens are plain logos patterns. Comments, literals and line breaks need to look
//! further than a regular pattern can (closing delimiters, escapes, CRLF pairs), so logos
//! only matches their opening characters and a callback scans the rest, bumping the lexer
//! past what it consumed. The callbacks never fail: an unclosed construct is bumped to
//! where it gave up and reported as [`Scan::Unterminated`].
use logos::Logos;

use crate::lines::LineTerminatorPolicy;
use crate::profile::LanguageProfile;

/// Grammar switches the callbacks consult, copied from the active profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub line_comments: bool,
    pub char_literals: bool,
    pub line_break_terminates: bool,
}

impl ScanState {
    pub fn for_profile(profile: &LanguageProfile) -> Self {
        Self {
            line_comments: profile.comments.line_comments,
            char_literals: profile.strings.char_literals,
            line_break_terminates: profile.strings.line_break_terminates,
        }
    }
}

/// Outcome of a callback-scanned construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    Closed,
    Unterminated,
    /// The profile does not have this construct; only the opener was consumed.
    Disabled,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = ScanState)]
pub enum RawToken {
    #[token("/*", block_comment)]
    BlockComment(Scan),

    #[token("//", line_comment)]
    LineComment(Scan),

    #[token("\"", string_literal)]
    String(Scan),

    #[token("'", char_literal)]
    Char(Scan),

    // pp-number: digits, letters, dots and signed exponents; classified later
    #[regex(r"\.?[0-9]([0-9A-Za-z_.]|[eEpP][+-])*")]
    Number,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Identifier,

    #[token("{")]
    #[token("}")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token(";")]
    #[token(",")]
    #[token(":")]
    #[token("::")]
    #[token("?")]
    #[token(".")]
    #[token("...")]
    #[token(".*")]
    #[token("->")]
    #[token("->*")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("^")]
    #[token("&")]
    #[token("|")]
    #[token("~")]
    #[token("!")]
    #[token("=")]
    #[token("<")]
    #[token(">")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("^=")]
    #[token("&=")]
    #[token("|=")]
    #[token("<<")]
    #[token(">>")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("<=>")]
    #[token("&&")]
    #[token("||")]
    #[token("++")]
    #[token("--")]
    #[token("#")]
    #[token("##")]
    Operator,

    // Horizontal whitespace only; VT and FF are line breaks
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"[\n\r\x0B\x0C\x{85}\x{2028}\x{2029}]", newline)]
    Newline,
}

fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> Scan {
    let rem = lex.remainder();
    match rem.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Scan::Closed
        }
        None => {
            lex.bump(rem.len());
            Scan::Unterminated
        }
    }
}

/// Runs to the next line break (not included). A backslash right before a CR/LF splices
/// the next line into the comment.
fn line_comment(lex: &mut logos::Lexer<'_, RawToken>) -> Scan {
    if !lex.extras.line_comments {
        return Scan::Disabled;
    }
    let rem = lex.remainder();
    let mut from = 0;
    loop {
        match LineTerminatorPolicy::Wide.find_terminator(rem, from) {
            None => {
                lex.bump(rem.len());
                return Scan::Closed;
            }
            Some((at, len)) => {
                let spliced = rem[..at].ends_with('\\')
                    && LineTerminatorPolicy::Narrow
                        .terminator_len_at(rem, at)
                        .is_some();
                if spliced {
                    from = at + len;
                    continue;
                }
                lex.bump(at);
                return Scan::Closed;
            }
        }
    }
}

fn string_literal(lex: &mut logos::Lexer<'_, RawToken>) -> Scan {
    let terminates = lex.extras.line_break_terminates;
    let (consumed, scan) = scan_quoted(lex.remainder(), b'"', terminates);
    lex.bump(consumed);
    scan
}

fn char_literal(lex: &mut logos::Lexer<'_, RawToken>) -> Scan {
    if !lex.extras.char_literals {
        return Scan::Disabled;
    }
    let terminates = lex.extras.line_break_terminates;
    let (consumed, scan) = scan_quoted(lex.remainder(), b'\'', terminates);
    lex.bump(consumed);
    scan
}

/// Scan the body of a quoted literal whose opening quote is already consumed.
/// Returns how many bytes belong to the literal.
fn scan_quoted(rem: &str, quote: u8, line_break_terminates: bool) -> (usize, Scan) {
    let bytes = rem.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                // The escaped unit is one whole character, or a CRLF pair
                i += 1;
                if bytes[i..].starts_with(b"\r\n") {
                    i += 2;
                } else if let Some(ch) = rem[i..].chars().next() {
                    i += ch.len_utf8();
                }
            }
            b if b == quote => return (i + 1, Scan::Closed),
            b'\n' | b'\r' if line_break_terminates => return (i, Scan::Unterminated),
            _ => i += 1,
        }
    }
    (bytes.len(), Scan::Unterminated)
}

/// Extends a lone CR to CRLF; the terminator set is the wide policy's.
fn newline(lex: &mut logos::Lexer<'_, RawToken>) {
    let start = lex.span().start;
    let matched = lex.slice().len();
    if let Some(len) = LineTerminatorPolicy::Wide.terminator_len_at(lex.source(), start) {
        if len > matched {
            lex.bump(len - matched);
        }
    }
}
