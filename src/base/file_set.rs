//! Path interning for [`FileId`]s.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::FileId;

/// A [`FileSet`] shared between the component cache and the application file locator.
pub type SharedFileSet = Arc<RwLock<FileSet>>;

/// Bidirectional map between file paths and [`FileId`]s.
///
/// Paths are keyed case-insensitively with `/` separators, matching how CFML
/// resolves component paths regardless of the host filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    /// Normalized key -> original path. The entry index is the file id.
    files: IndexMap<String, PathBuf>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty file set wrapped for sharing.
    pub fn shared() -> SharedFileSet {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Intern a path, returning its existing id if it was seen before.
    pub fn intern(&mut self, path: impl AsRef<Path>) -> FileId {
        let path = path.as_ref();
        let entry = self.files.entry(normalize_key(path));
        let index = entry.index();
        entry.or_insert_with(|| path.to_path_buf());
        FileId::new(index as u32)
    }

    /// Look up the id of an already interned path.
    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.files
            .get_index_of(&normalize_key(path.as_ref()))
            .map(|index| FileId::new(index as u32))
    }

    /// Get the path of a file id.
    pub fn path(&self, file: FileId) -> Option<&Path> {
        self.files
            .get_index(file.index())
            .map(|(_, path)| path.as_path())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn normalize_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}
