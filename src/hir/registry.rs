//! Component registry: read access to parsed components.
//!
//! The resolver never parses files. It asks a [`ComponentRegistry`] for the
//! cached component of a file and for the file a dotted component path
//! refers to. [`ComponentCache`] is the in-memory implementation: the parser
//! inserts components as files change and resolution passes read `Arc`
//! snapshots.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::component::{Component, ComponentRef};
use crate::base::{FileId, FileSet, SharedFileSet};

/// File extension of component files.
pub const COMPONENT_EXTENSION: &str = "cfc";

/// Read-only view of the parsed components of a workspace.
pub trait ComponentRegistry: Send + Sync {
    /// The cached component declared by `file`.
    fn component(&self, file: FileId) -> Option<Arc<Component>>;

    /// Resolve a dotted component path (`models.User`) used in `referrer`.
    fn resolve_path(&self, path: &str, referrer: FileId) -> Option<FileId>;
}

/// Resolve a component reference, preferring an already resolved target.
pub fn resolve_ref(
    registry: &dyn ComponentRegistry,
    reference: &ComponentRef,
    referrer: FileId,
) -> Option<Arc<Component>> {
    let target = reference
        .target
        .or_else(|| registry.resolve_path(&reference.path, referrer))?;
    registry.component(target)
}

/// The base component of `component`, if it extends one that is cached.
pub fn base_component(
    registry: &dyn ComponentRegistry,
    component: &Component,
) -> Option<Arc<Component>> {
    let extends = component.extends.as_ref()?;
    resolve_ref(registry, extends, component.file)
}

/// In-memory component cache keyed by file identity.
#[derive(Debug, Default)]
pub struct ComponentCache {
    files: SharedFileSet,
    components: RwLock<FxHashMap<FileId, Arc<Component>>>,
    /// Directories searched for dotted paths after the referrer's directory.
    roots: Vec<PathBuf>,
}

impl ComponentCache {
    pub fn new(files: SharedFileSet) -> Self {
        Self {
            files,
            components: RwLock::new(FxHashMap::default()),
            roots: Vec::new(),
        }
    }

    /// Add a root directory (web root or component mapping) for path resolution.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// The file set shared with this cache.
    pub fn files(&self) -> &SharedFileSet {
        &self.files
    }

    /// Intern a path, returning the id components of that file must use.
    pub fn file_id(&self, path: impl AsRef<Path>) -> FileId {
        self.files.write().intern(path)
    }

    /// Insert or replace the component of its file.
    pub fn insert(&self, component: Component) -> Arc<Component> {
        let component = Arc::new(component);
        self.components
            .write()
            .insert(component.file, Arc::clone(&component));
        tracing::trace!(file = %component.file, name = %component.name, "cached component");
        component
    }

    /// Drop the cached component of a changed or deleted file.
    pub fn invalidate(&self, file: FileId) -> Option<Arc<Component>> {
        self.components.write().remove(&file)
    }

    pub fn len(&self) -> usize {
        self.components.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.read().is_empty()
    }

    /// Candidate file paths for a dotted path, in search order.
    fn candidates(&self, files: &FileSet, path: &str, referrer: FileId) -> Vec<PathBuf> {
        let relative: PathBuf = path
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect::<PathBuf>()
            .with_extension(COMPONENT_EXTENSION);

        let referrer_dir = files
            .path(referrer)
            .and_then(Path::parent)
            .map(Path::to_path_buf);

        referrer_dir
            .into_iter()
            .chain(self.roots.iter().cloned())
            .map(|dir| dir.join(&relative))
            .collect()
    }
}

impl ComponentRegistry for ComponentCache {
    fn component(&self, file: FileId) -> Option<Arc<Component>> {
        self.components.read().get(&file).cloned()
    }

    fn resolve_path(&self, path: &str, referrer: FileId) -> Option<FileId> {
        if path.trim_matches('.').is_empty() {
            return None;
        }
        let files = self.files.read();
        let resolved = self
            .candidates(&files, path, referrer)
            .into_iter()
            .find_map(|candidate| files.file_id(candidate));
        tracing::trace!(path, ?resolved, "resolved component path");
        resolved
    }
}
