//! High-level IR (HIR): the resolved entity graph the resolver reads.
//!
//! ## Key Types
//!
//! - [`Component`] - A class-like entity with functions, properties and variables
//! - [`UserFunction`], [`Signature`], [`Argument`], [`Property`] - Its declarations
//! - [`Variable`] - A scoped variable declaration
//! - [`Scope`], [`ScopePrefix`] - Scope tags and their qualifier grammar
//! - [`ComponentRegistry`] - Lookup of cached components by file and dotted path
//! - [`DocumentContext`] - Cursor-centric view of the current document
//!
//! ## Layers
//!
//! ```text
//! parser (external)        ← builds Component per file
//!     │
//!     ▼
//! ComponentCache           ← cached by FileId, invalidated on change
//!     │
//!     ▼
//! DocumentContext          ← word, doc prefix, comment state
//!     │
//!     ▼
//! ide::goto_definition     ← resolvers
//! ```

mod component;
mod context;
mod registry;
mod scope;
mod variables;

pub use component::{
    Access, AccessorFlag, Argument, Component, ComponentRef, Property, Signature, UserFunction,
};
pub(crate) use component::same_name;
pub use context::DocumentContext;
pub use registry::{
    COMPONENT_EXTENSION, ComponentCache, ComponentRegistry, base_component, resolve_ref,
};
pub use scope::{Scope, ScopePrefix};
pub use variables::{LocalVariableExtractor, Variable, VariableParser, VariableScanner};
