//! `application.` variables declared in the application settings file.
//!
//! This is the only resolver that reads another file. Locating the file is
//! synchronous; loading it is the single await point of a request.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use super::{Collaborators, GotoTarget};
use crate::base::{FileId, SharedFileSet};
use crate::error::{Error, Result};
use crate::hir::{DocumentContext, Scope, ScopePrefix};

/// Application settings file names, in lookup order.
const APPLICATION_FILES: [&str; 4] = [
    "Application.cfc",
    "application.cfc",
    "Application.cfm",
    "application.cfm",
];

/// A loaded application settings file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationSource {
    pub text: String,
    pub is_script: bool,
}

impl ApplicationSource {
    /// Guess the dialect from the file name and contents.
    ///
    /// `.cfm` files are templates; a `.cfc` is script unless it opens with `<cfcomponent`.
    pub fn detect(path: &Path, text: String) -> Self {
        let is_component = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(crate::hir::COMPONENT_EXTENSION));
        let is_script = is_component && !text.to_ascii_lowercase().contains("<cfcomponent");
        Self { text, is_script }
    }
}

/// Locates and loads the application settings file governing a file.
pub trait ApplicationFiles: Send + Sync {
    /// The application file for `file`, if there is one.
    fn locate(&self, file: FileId) -> Option<FileId>;

    /// Load an application file.
    fn load(&self, file: FileId) -> impl Future<Output = Result<ApplicationSource>> + Send;
}

/// No application files at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoApplicationFiles;

impl ApplicationFiles for NoApplicationFiles {
    fn locate(&self, _file: FileId) -> Option<FileId> {
        None
    }

    fn load(&self, file: FileId) -> impl Future<Output = Result<ApplicationSource>> + Send {
        std::future::ready(Err(Error::UnknownFile(file)))
    }
}

/// Finds `Application.cfc` / `Application.cfm` on disk.
///
/// The search starts in the file's own directory and walks up through its
/// ancestors, stopping after `root` when one is set. A file outside `root`
/// has no application file.
///
/// [`locate`](ApplicationFiles::locate) stats candidate paths with blocking
/// calls, at most four per directory walked. Only [`load`](ApplicationFiles::load)
/// goes through `tokio::fs`.
#[derive(Debug, Clone)]
pub struct FsApplicationFiles {
    files: SharedFileSet,
    root: Option<PathBuf>,
}

impl FsApplicationFiles {
    pub fn new(files: SharedFileSet) -> Self {
        Self { files, root: None }
    }

    /// Do not search above `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    fn find_in_ancestors(&self, path: &Path) -> Option<PathBuf> {
        if self.root.as_deref().is_some_and(|root| !path.starts_with(root)) {
            tracing::trace!(path = %path.display(), "file is outside the application root");
            return None;
        }
        for dir in path.ancestors().skip(1) {
            let found = APPLICATION_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file());
            if found.is_some() {
                return found;
            }
            if self.root.as_deref() == Some(dir) {
                break;
            }
        }
        None
    }
}

impl ApplicationFiles for FsApplicationFiles {
    fn locate(&self, file: FileId) -> Option<FileId> {
        let path = self.files.read().path(file)?.to_path_buf();
        let found = self.find_in_ancestors(&path)?;
        Some(self.files.write().intern(found))
    }

    fn load(&self, file: FileId) -> impl Future<Output = Result<ApplicationSource>> + Send {
        let path = self.files.read().path(file).map(Path::to_path_buf);
        async move {
            let path = path.ok_or(Error::UnknownFile(file))?;
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| Error::io(&path, err))?;
            Ok(ApplicationSource::detect(&path, text))
        }
    }
}

/// Resolve `application.name` to its assignments in the application file.
///
/// A missing or unreadable file contributes nothing. Cancellation is checked
/// before the load starts and interrupts a load in progress.
pub(super) async fn resolve<A: ApplicationFiles>(
    context: &DocumentContext,
    collaborators: Collaborators<'_, A>,
    cancel: &CancellationToken,
    targets: &mut Vec<GotoTarget>,
) {
    let word = context.word();
    if word.is_empty() || !ScopePrefix::required(&[Scope::Application]).is_match(context.doc_prefix()) {
        return;
    }
    let Some(app_file) = collaborators.application.locate(context.file()) else {
        tracing::trace!(file = %context.file(), "no application file");
        return;
    };
    if cancel.is_cancelled() {
        return;
    }

    let source = match cancel
        .run_until_cancelled(collaborators.application.load(app_file))
        .await
    {
        Some(Ok(source)) => source,
        Some(Err(err)) => {
            tracing::debug!(error = %err, "application file unavailable");
            return;
        }
        None => return,
    };

    let variables = collaborators
        .variables
        .parse_variables(app_file, &source.text, source.is_script);
    targets.extend(
        variables
            .iter()
            .filter(|variable| variable.scope == Scope::Application && variable.is_named(word))
            .map(GotoTarget::variable),
    );
}
