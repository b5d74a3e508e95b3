//! # srcxref
//!
//! Lossless tokenizer and symbol-definition extractor for C-family sources.
//!
//! The pipeline has three stages:
//!
//! - [`lexer`] turns source text into a lossless stream of classified tokens. Concatenating
//!   the lexemes in order reproduces the input byte for byte.
//! - [`symbols`] consumes that stream and reports definitions (functions, classes, structs,
//!   namespaces, variables, enums, unions and macros) with their scope.
//! - [`xref`] hands definitions, tokens and references to a sink, which renders them as
//!   JSON, YAML or a plain listing.
//!
//! Reported line numbers depend on the [`LineTerminatorPolicy`]: the wide policy counts
//! VT, FF, NEL, LS and PS as line breaks, the narrow one only CR, LF and CRLF.
//!
//! ```ignore
//! use srcxref::{analyze_source, AnalysisOptions};
//!
//! let analysis = analyze_source("int main(void) { return 0; }", &AnalysisOptions::default());
//! assert!(analysis.definitions.has_symbol("main"));
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod lexer;
pub mod lines;
pub mod profile;
pub mod symbols;
pub mod xref;

pub use analysis::{analyze, analyze_file, analyze_source, AnalysisOptions, FileAnalysis};
pub use error::{AnalysisError, Diagnostic};
pub use lexer::{detokenize, tokenize, Token, TokenKind};
pub use lines::{LineTable, LineTerminatorPolicy, Position};
pub use profile::LanguageProfile;
pub use symbols::{extract_definitions, Definitions, SymbolDefinition, SymbolKind};
pub use xref::{write_xref, OutputFormat, XrefDocument, XrefSink};
