//! # cfml-base
//!
//! Core library for CFML "go to definition": scope-aware, inheritance-aware
//! name resolution over parsed components.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → goto_definition and its resolvers
//!   ↓
//! config    → GotoConfig, editor settings
//!   ↓
//! hir       → Components, scopes, registry, document context
//!   ↓
//! core      → Comment detection, sanitization, word extraction
//!   ↓
//! base      → Primitives (FileId, FileSet, Position, Span, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → core → hir → config → ide)
// ============================================================================

/// Foundation types: FileId, FileSet, Position, Span, Location
pub mod base;

/// Text utilities: comment ranges, sanitization, word ranges
pub mod core;

/// Errors for configuration and file loading
pub mod error;

/// Resolved entity graph: components, scopes, variables, registry
pub mod hir;

/// Request configuration
pub mod config;

/// IDE features: goto-definition
pub mod ide;

pub use error::{Error, Result};

// Re-export foundation types
pub use base::{FileId, FileSet, LineIndex, Location, Position, Span, TextRange, TextSize};
