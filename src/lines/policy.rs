//! Line terminator sets
//!
//! Two named sets coexist. `Wide` is what the lexer numbers its tokens with; `Narrow` matches
//! tools that only split on CR/LF.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

const VT: char = '\u{0B}';
const FF: char = '\u{0C}';
const NEL: char = '\u{85}';
const LS: char = '\u{2028}';
const PS: char = '\u{2029}';

/// Which characters break a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminatorPolicy {
    /// LF, CR, CRLF, VT, FF, NEL, LS, PS
    #[default]
    Wide,
    /// LF, CR, CRLF
    Narrow,
}

impl LineTerminatorPolicy {
    pub fn name(self) -> &'static str {
        match self {
            LineTerminatorPolicy::Wide => "wide",
            LineTerminatorPolicy::Narrow => "narrow",
        }
    }

    /// Check whether a single character is a line boundary under this policy.
    ///
    /// CR counts on its own; the CRLF pair is handled by [`terminator_len_at`](Self::terminator_len_at).
    pub fn is_terminator(self, ch: char) -> bool {
        match ch {
            '\n' | '\r' => true,
            VT | FF | NEL | LS | PS => self == LineTerminatorPolicy::Wide,
            _ => false,
        }
    }

    /// Byte length of the terminator starting at `offset`, if there is one.
    ///
    /// A CR followed by LF is reported as one two-byte terminator.
    pub fn terminator_len_at(self, text: &str, offset: usize) -> Option<usize> {
        let ch = text.get(offset..)?.chars().next()?;
        if !self.is_terminator(ch) {
            return None;
        }
        if ch == '\r' && text.as_bytes().get(offset + 1) == Some(&b'\n') {
            return Some(2);
        }
        Some(ch.len_utf8())
    }

    /// Find the next terminator at or after `from`, returning its offset and length.
    pub fn find_terminator(self, text: &str, from: usize) -> Option<(usize, usize)> {
        let rest = text.get(from..)?;
        let (idx, _) = rest.char_indices().find(|(_, ch)| self.is_terminator(*ch))?;
        let offset = from + idx;
        self.terminator_len_at(text, offset).map(|len| (offset, len))
    }
}

impl fmt::Display for LineTerminatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineTerminatorPolicy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wide" => Ok(LineTerminatorPolicy::Wide),
            "narrow" => Ok(LineTerminatorPolicy::Narrow),
            _ => Err(AnalysisError::UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_terminators() {
        for policy in [LineTerminatorPolicy::Wide, LineTerminatorPolicy::Narrow] {
            assert!(policy.is_terminator('\n'));
            assert!(policy.is_terminator('\r'));
            assert!(!policy.is_terminator(' '));
            assert!(!policy.is_terminator('\t'));
        }
    }

    #[test]
    fn test_wide_only_terminators() {
        for ch in [VT, FF, NEL, LS, PS] {
            assert!(LineTerminatorPolicy::Wide.is_terminator(ch), "{:?}", ch);
            assert!(!LineTerminatorPolicy::Narrow.is_terminator(ch), "{:?}", ch);
        }
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        let text = "a\r\nb";
        assert_eq!(LineTerminatorPolicy::Narrow.terminator_len_at(text, 1), Some(2));
        assert_eq!(LineTerminatorPolicy::Narrow.terminator_len_at(text, 2), Some(1));
        assert_eq!(LineTerminatorPolicy::Narrow.terminator_len_at(text, 0), None);
    }

    #[test]
    fn test_multibyte_terminator_length() {
        let text = "a\u{2028}b";
        assert_eq!(LineTerminatorPolicy::Wide.terminator_len_at(text, 1), Some(3));
        assert_eq!(LineTerminatorPolicy::Narrow.terminator_len_at(text, 1), None);
    }

    #[test]
    fn test_find_terminator() {
        let text = "ab\u{0C}cd\n";
        assert_eq!(LineTerminatorPolicy::Wide.find_terminator(text, 0), Some((2, 1)));
        assert_eq!(LineTerminatorPolicy::Narrow.find_terminator(text, 0), Some((5, 1)));
        assert_eq!(LineTerminatorPolicy::Narrow.find_terminator(text, 6), None);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("wide".parse::<LineTerminatorPolicy>().unwrap(), LineTerminatorPolicy::Wide);
        assert_eq!("NARROW".parse::<LineTerminatorPolicy>().unwrap(), LineTerminatorPolicy::Narrow);
        assert!("ctags".parse::<LineTerminatorPolicy>().is_err());
    }
}
