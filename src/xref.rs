//! Xref boundary
//!
//! What leaves the core: token records, definitions and references, each located under the
//! line policy the caller picked. Consumers implement [XrefSink](sink::XrefSink) and get
//! driven by [write_xref](sink::write_xref); persistence and presentation are theirs.
//! [XrefDocument](document::XrefDocument) is the sink that just collects everything, and
//! [OutputFormat](format::OutputFormat) renders a document as JSON, YAML or a plain listing.

pub mod document;
pub mod format;
pub mod sink;

pub use document::XrefDocument;
pub use format::OutputFormat;
pub use sink::{write_xref, ReferenceRecord, TokenRecord, XrefSink};
