//! Output formats for xref documents
//!
//! `json` and `yaml` serialize the whole document. `simple` is a listing meant for people
//! and diffs: one record per line, lines and columns 1-based.
//!
//! ```text
//! # sample.c profile=c policy=wide lines=3
//! def 1:5 function main
//! tok 1:1-1:4 keyword "int"
//! ref 2:12 count (local)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::AnalysisError;
use crate::xref::XrefDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Simple,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Simple => "simple",
        }
    }

    pub fn all() -> [OutputFormat; 3] {
        [OutputFormat::Json, OutputFormat::Yaml, OutputFormat::Simple]
    }

    pub fn render(self, document: &XrefDocument) -> Result<String, AnalysisError> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(document)?),
            OutputFormat::Simple => Ok(render_simple(document)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "simple" | "text" => Ok(OutputFormat::Simple),
            _ => Err(AnalysisError::UnknownFormat(s.to_string())),
        }
    }
}

fn render_simple(document: &XrefDocument) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "# {} profile={} policy={} lines={}",
        document.path.as_deref().unwrap_or("-"),
        document.profile,
        document.policy,
        document.line_count
    );
    for def in &document.definitions {
        let _ = writeln!(
            out,
            "def {}:{} {} {}{}",
            def.decl_line + 1,
            def.column + 1,
            def.kind,
            def.qualified_name(),
            if def.templated { " (template)" } else { "" }
        );
    }
    for token in &document.tokens {
        let _ = write!(
            out,
            "tok {}:{}-{}:{} {} {:?}",
            token.line + 1,
            token.column + 1,
            token.end_line + 1,
            token.end_column + 1,
            token.kind,
            token.lexeme
        );
        if let Some(diagnostic) = token.diagnostic {
            let _ = write!(out, " ({})", diagnostic);
        }
        out.push('\n');
    }
    for reference in &document.references {
        let _ = writeln!(
            out,
            "ref {}:{} {}{}",
            reference.line + 1,
            reference.column + 1,
            reference.symbol,
            if reference.defined_in_file { " (local)" } else { "" }
        );
    }
    for diagnostic in &document.diagnostics {
        let _ = writeln!(out, "diag {} {}", diagnostic.line + 1, diagnostic.diagnostic);
    }
    out
}
