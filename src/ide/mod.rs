//! IDE features: High-level APIs for editor handlers.
//!
//! ## Design Principles
//!
//! 1. **No editor protocol types**: Uses our own types, converted at the boundary
//! 2. **Never fails**: A request that cannot resolve returns an empty result
//! 3. **Composable**: Built on top of the HIR entities and collaborator traits
//!
//! ## Usage
//!
//! ```ignore
//! use cfml::config::GotoConfig;
//! use cfml::hir::{ComponentCache, DocumentContext, VariableScanner};
//! use cfml::ide::{Collaborators, FsApplicationFiles, goto_definition};
//!
//! let cache = ComponentCache::new(files.clone());
//! let application = FsApplicationFiles::new(files);
//! let collaborators = Collaborators {
//!     registry: &cache,
//!     locals: &VariableScanner,
//!     variables: &VariableScanner,
//!     application: &application,
//! };
//! let result = goto_definition(&context, collaborators, &GotoConfig::default(), &cancel).await;
//! ```

mod goto;

pub use goto::{
    ApplicationFiles, ApplicationSource, Collaborators, FsApplicationFiles, GotoResult, GotoTarget,
    NoApplicationFiles, PATH_GROUP, PathMatch, ReferencePattern, ReferencePatterns, TargetKind,
    goto_definition,
};
