//! Error types for operations outside a definition request.
//!
//! A definition request itself never fails; these errors come from building
//! configuration, compiling reference patterns and loading files.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while configuring the resolver or loading files.
#[derive(Debug, Error)]
pub enum Error {
    /// A reference pattern is not a valid regular expression.
    #[error("Invalid reference pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A reference pattern has no `path` capture group.
    #[error("Reference pattern '{0}' has no `path` capture group")]
    MissingPathGroup(String),

    /// IO error while reading a file.
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file id has no known path.
    #[error("Unknown file: {0}")]
    UnknownFile(crate::base::FileId),
}

impl Error {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(name: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            name: name.into(),
            source,
        }
    }

    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
