//! Foundation types for the GLSL toolchain.
//!
//! This module provides fundamental types used throughout the analyzer:
//! - [`FileId`] - Identifier of a translation unit (one shader document)
//! - [`TextRange`], [`TextSize`] - Source intervals and offsets
//! - [`LineCol`], [`LineRange`], [`LineIndex`] - Line/column conversion
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, LineRange, TextRange, TextSize, is_before};

// Re-export text-size types for convenience
pub use text_size;
