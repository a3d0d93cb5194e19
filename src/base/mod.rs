//! Foundation types for the CFML toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`], [`FileSet`] - Interned file identifiers
//! - [`Position`], [`Span`], [`Location`] - Line/column positions for entities
//! - [`LineIndex`], [`TextSize`] - Offset to line/column conversion
//!
//! This module has NO dependencies on other cfml modules.

mod file_id;
mod file_set;
mod line_index;
mod position;

pub use file_id::FileId;
pub use file_set::{FileSet, SharedFileSet};
pub use line_index::LineIndex;
pub use position::{Location, Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
