//! # glsl-base
//!
//! Core library for GLSL name binding, scope resolution, and occurrence
//! queries.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → IDE features (document highlights, find-references)
//!   ↓
//! hir     → Scopes, declarations, name resolution, built-ins
//!   ↓
//! syntax  → Declaration and expression nodes handed over by the parser
//!   ↓
//! base    → Primitives (FileId, TextRange, LineIndex)
//! ```

/// Foundation types: FileId, TextRange, line/column conversion
pub mod base;

/// Syntax nodes consumed by the semantic layer
pub mod syntax;

/// High-level IR: the bound semantic model of one document
pub mod hir;

/// IDE features: document highlights, find-references
pub mod ide;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
