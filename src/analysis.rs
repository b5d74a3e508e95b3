//! Per-file pipeline
//!
//! Decode, tokenize, extract, and index one buffer. Each call owns everything it builds, so
//! a batch can run one call per file on as many threads as it likes.

use std::path::Path;

use crate::error::AnalysisError;
use crate::lexer::{decode, tokenize, Token};
use crate::lines::{LineTable, LineTerminatorPolicy};
use crate::profile::LanguageProfile;
use crate::symbols::{extract_definitions, Definitions, PatternDiagnostic};
use crate::xref::{write_xref, XrefDocument};

/// The host-provided `{policy, languageProfile}` pair, plus output switches.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub policy: LineTerminatorPolicy,
    pub profile: &'static LanguageProfile,
    pub include_trivia: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            policy: LineTerminatorPolicy::Wide,
            profile: LanguageProfile::c_family(),
            include_trivia: false,
        }
    }
}

/// Everything found in one buffer.
#[derive(Debug)]
pub struct FileAnalysis<'src> {
    pub source: &'src str,
    pub tokens: Vec<Token<'src>>,
    /// Lines under the requested policy
    pub lines: LineTable,
    pub definitions: Definitions,
    pub diagnostics: Vec<PatternDiagnostic>,
}

impl FileAnalysis<'_> {
    /// Tokens carrying a lexical diagnostic.
    pub fn token_diagnostics(&self) -> impl Iterator<Item = &Token<'_>> {
        self.tokens.iter().filter(|t| t.diagnostic.is_some())
    }

    pub fn to_document(&self, profile: &LanguageProfile, include_trivia: bool) -> XrefDocument {
        let mut document =
            XrefDocument::new(profile.name, self.lines.policy(), self.lines.count());
        write_xref(
            &self.tokens,
            &self.definitions,
            &self.lines,
            include_trivia,
            &mut document,
        );
        document.diagnostics = self.diagnostics.clone();
        document
    }
}

/// Analyze an already decoded buffer.
pub fn analyze_source<'src>(
    source: &'src str,
    options: &AnalysisOptions,
) -> FileAnalysis<'src> {
    let profile = options.profile;
    let tokens: Vec<Token<'src>> = tokenize(source, profile).collect();
    let lines = LineTable::new(source, options.policy);

    let (definitions, diagnostics) = {
        let mut extractor =
            extract_definitions(tokens.iter().cloned(), profile).with_line_table(&lines);
        let definitions = Definitions::from_definitions(extractor.by_ref());
        (definitions, extractor.take_diagnostics())
    };

    tracing::debug!(
        profile = profile.name,
        policy = %options.policy,
        bytes = source.len(),
        tokens = tokens.len(),
        lines = lines.count(),
        definitions = definitions.tags().len(),
        "analyzed buffer"
    );

    FileAnalysis {
        source,
        tokens,
        lines,
        definitions,
        diagnostics,
    }
}

/// Decode and analyze a byte buffer. Decoding is the only way this fails.
pub fn analyze<'src>(
    bytes: &'src [u8],
    options: &AnalysisOptions,
) -> Result<FileAnalysis<'src>, AnalysisError> {
    let source = decode(bytes)?;
    Ok(analyze_source(source, options))
}

/// Read, analyze and collect one file into a document.
pub fn analyze_file(path: &Path, options: &AnalysisOptions) -> Result<XrefDocument, AnalysisError> {
    let bytes = std::fs::read(path)?;
    let analysis = analyze(&bytes, options)?;
    let document = analysis
        .to_document(options.profile, options.include_trivia)
        .with_path(path.display().to_string());
    Ok(document)
}
