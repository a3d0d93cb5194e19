//! Go-to-definition options

use crate::error::Result;
use crate::ide::{ReferencePattern, ReferencePatterns};

/// Default bound on inheritance chain walks.
pub const DEFAULT_MAX_INHERITANCE_DEPTH: usize = 64;

/// Options for a definition request.
#[derive(Debug, Clone)]
pub struct GotoConfig {
    /// Patterns locating dotted component paths in a document
    pub reference_patterns: ReferencePatterns,
    /// Maximum number of components visited in one inheritance walk
    pub max_inheritance_depth: usize,
    /// Resolve `application.` variables from the application file
    pub application_scope: bool,
}

impl Default for GotoConfig {
    fn default() -> Self {
        Self {
            reference_patterns: ReferencePatterns::builtin(),
            max_inheritance_depth: DEFAULT_MAX_INHERITANCE_DEPTH,
            application_scope: true,
        }
    }
}

impl GotoConfig {
    /// Build a config from editor settings, compiling any extra patterns.
    ///
    /// Extra patterns are appended after the built-in ones.
    pub fn from_settings(settings: &GotoSettings) -> Result<Self> {
        let mut config = Self::default();
        if let Some(depth) = settings.max_inheritance_depth {
            config.max_inheritance_depth = depth;
        }
        if let Some(application_scope) = settings.application_scope {
            config.application_scope = application_scope;
        }
        for setting in &settings.reference_patterns {
            config
                .reference_patterns
                .push(ReferencePattern::new(setting.name.as_str(), &setting.pattern)?);
        }
        Ok(config)
    }
}

/// Editor-facing settings. Missing fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct GotoSettings {
    pub max_inheritance_depth: Option<usize>,
    pub application_scope: Option<bool>,
    pub reference_patterns: Vec<PatternSetting>,
}

/// A user-supplied reference pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternSetting {
    pub name: String,
    pub pattern: String,
}
