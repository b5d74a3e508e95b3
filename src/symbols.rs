//! Symbol Extractor
//!
//! Finds definitions in a C-family token stream with a small pattern grammar: functions
//! with bodies, classes, structs, unions, enums, namespaces, file/namespace/class scope
//! variables and `#define` macros. See [extractor] for how the stream is walked and
//! [patterns] for what each pattern accepts.
//!
//! Line numbers
//!
//!     Definitions carry the wide-policy line of their name by default, the same numbering
//!     the tokens use. [Extractor::with_line_table] reports through another table instead,
//!     so a caller lining up with a CR/LF-only tool can ask for narrow lines. Nothing
//!     reconciles the two; the caller picks.

pub mod definition;
pub mod definitions;
pub mod extractor;
mod patterns;

pub use definition::{SymbolDefinition, SymbolKind};
pub use definitions::Definitions;
pub use extractor::{extract_definitions, Extractor, PatternDiagnostic};
