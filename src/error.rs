//! Errors and diagnostics
//!
//! Two tiers. A [`Diagnostic`] marks a malformed construct that was recovered from locally:
//! the token or record carrying it is still emitted and processing continues. An
//! [`AnalysisError`] stops the current file (or the host tool) and is reported once.

use serde::Serialize;
use std::fmt;

/// A locally recovered problem attached to a token or held by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diagnostic {
    /// String or char literal cut off by a line break or end of input
    UnterminatedLiteral,
    /// Block comment with no closing `*/`
    UnterminatedComment,
    /// Number-like lexeme that fits no numeric literal form
    MalformedNumericLiteral,
    /// Definition pattern cut off by end of input
    IncompleteDefinitionPattern,
}

impl Diagnostic {
    pub fn is_unterminated(self) -> bool {
        matches!(
            self,
            Diagnostic::UnterminatedLiteral | Diagnostic::UnterminatedComment
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Diagnostic::UnterminatedLiteral => "unterminated literal",
            Diagnostic::UnterminatedComment => "unterminated comment",
            Diagnostic::MalformedNumericLiteral => "malformed numeric literal",
            Diagnostic::IncompleteDefinitionPattern => "incomplete definition pattern",
        };
        f.write_str(name)
    }
}

/// Fatal errors: they abort one file (or the host), never a whole batch.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("input is not valid UTF-8 (first bad byte at offset {offset})")]
    Decode { offset: usize },

    #[error("unknown language profile '{0}'")]
    UnknownProfile(String),

    #[error("unknown line terminator policy '{0}'")]
    UnknownPolicy(String),

    #[error("unknown output format '{0}'")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unterminated_diagnostics() {
        assert!(Diagnostic::UnterminatedLiteral.is_unterminated());
        assert!(Diagnostic::UnterminatedComment.is_unterminated());
        assert!(!Diagnostic::MalformedNumericLiteral.is_unterminated());
    }

    #[test]
    fn test_error_messages() {
        let err = AnalysisError::Decode { offset: 7 };
        assert_eq!(
            err.to_string(),
            "input is not valid UTF-8 (first bad byte at offset 7)"
        );
        assert_eq!(
            AnalysisError::UnknownProfile("cobol".into()).to_string(),
            "unknown language profile 'cobol'"
        );
    }
}
