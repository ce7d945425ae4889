//! IDE features: high-level APIs for LSP handlers.
//!
//! This module provides the interface between the semantic model (HIR)
//! and the LSP server. Each function corresponds to an LSP request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at LSP boundary
//! 3. **One traversal**: Highlights and references share [`OccurrenceResolver`]
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use glsl::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new();
//! let mut unit = host.create_unit(file_id, "void main() {}");
//! // ... bind declarations and usages into `unit` ...
//! host.publish(unit);
//!
//! let analysis = host.analysis();
//! let highlights = analysis.document_highlights(file_id, position, &cancel);
//! ```

mod analysis;
mod config;
mod highlight;
mod occurrences;
mod references;

pub use analysis::{Analysis, AnalysisHost};
pub use config::AnalysisConfig;
pub use highlight::{Highlight, HighlightKind, document_highlights};
pub use occurrences::{
    Occurrence, OccurrenceKind, OccurrenceResolver, OccurrenceSink, Resolution,
    related_occurrences,
};
pub use references::{Reference, find_references};
