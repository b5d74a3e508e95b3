//! Collected xref output for one file.

use serde::Serialize;

use crate::lines::LineTerminatorPolicy;
use crate::symbols::{PatternDiagnostic, SymbolDefinition};
use crate::xref::sink::{ReferenceRecord, TokenRecord, XrefSink};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XrefDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub profile: String,
    pub policy: LineTerminatorPolicy,
    pub line_count: usize,
    pub definitions: Vec<SymbolDefinition>,
    pub tokens: Vec<TokenRecord>,
    pub references: Vec<ReferenceRecord>,
    pub diagnostics: Vec<PatternDiagnostic>,
}

impl XrefDocument {
    pub fn new(profile: &str, policy: LineTerminatorPolicy, line_count: usize) -> Self {
        Self {
            profile: profile.to_string(),
            policy,
            line_count,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl XrefSink for XrefDocument {
    fn token(&mut self, token: TokenRecord) {
        self.tokens.push(token);
    }

    fn definition(&mut self, definition: &SymbolDefinition) {
        self.definitions.push(definition.clone());
    }

    fn reference(&mut self, reference: ReferenceRecord) {
        self.references.push(reference);
    }
}
