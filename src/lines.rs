//! Line numbering
//!
//!     Tokens and definitions are reported with line/column positions, and "line" is not a
//!     settled notion: toolchains disagree on which characters break a line. The lexer
//!     treats vertical tab, form feed, NEL, LINE SEPARATOR and PARAGRAPH SEPARATOR as line
//!     boundaries, while ctags-like tools only count CR and LF. A definition found by one
//!     tool and anchored by the other ends up on the wrong line.
//!
//!     Rather than picking a winner, both sets exist side by side as
//!     [LineTerminatorPolicy](policy::LineTerminatorPolicy) values. A [LineTable](table::LineTable)
//!     maps byte offsets to positions under one policy; callers build as many tables over the
//!     same source as they need and choose which one to report through.
//!
//! Positions
//!
//!     Lines and columns are 0-based. Columns count bytes from the start of the line, so they
//!     index straight back into the source slice.

pub mod policy;
pub mod table;

pub use policy::LineTerminatorPolicy;
pub use table::{count_lines, LineTable, Position, Range};
