//! Dotted-path reference patterns.
//!
//! Component paths appear in many syntactic forms (`new a.b.C()`,
//! `createObject("component", "a.b.C")`, `import a.b.C;`, `extends="a.b.C"`).
//! Each form is one named [`ReferencePattern`] whose regex captures the path
//! in a group called `path`. Scanning is pattern-agnostic: it walks the table
//! and yields a [`PathMatch`] for every match.

use regex::Regex;
use smol_str::SmolStr;

use super::{GotoTarget, ScanContext};
use crate::error::{Error, Result};

/// Name of the capture group holding the dotted path.
pub const PATH_GROUP: &str = "path";

const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    (
        "new",
        r#"(?i)\bnew\s+['"]?(?P<path>[$\w]+(?:\.[$\w]+)*)['"]?\s*\("#,
    ),
    (
        "create-object",
        r#"(?i)\bcreateObject\s*\(\s*['"]component['"]\s*,\s*['"](?P<path>[$\w.]+)['"]"#,
    ),
    (
        "create-object-short",
        r#"(?i)\bcreateObject\s*\(\s*['"](?P<path>[$\w.]+)['"]\s*\)"#,
    ),
    ("import", r#"(?i)\bimport\s+['"]?(?P<path>[$\w]+(?:\.[$\w]+)*)"#),
    (
        "extends",
        r#"(?i)\bextends\s*(?:=\s*)?['"]?(?P<path>[$\w]+(?:\.[$\w]+)*)"#,
    ),
    (
        "implements",
        r#"(?i)\bimplements\s*(?:=\s*)?['"]?(?P<path>[$\w]+(?:\.[$\w]+)*)"#,
    ),
    (
        "cfinvoke",
        r#"(?i)<cfinvoke\b[^>]*?\bcomponent\s*=\s*['"](?P<path>[$\w.]+)['"]"#,
    ),
    (
        "is-instance-of",
        r#"(?i)\bisInstanceOf\s*\([^,)]*,\s*['"](?P<path>[$\w.]+)['"]"#,
    ),
];

/// A named regular expression locating dotted component paths.
#[derive(Clone, Debug)]
pub struct ReferencePattern {
    name: SmolStr,
    regex: Regex,
}

impl ReferencePattern {
    /// Compile a pattern. It must contain a capture group named `path`.
    pub fn new(name: impl Into<SmolStr>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|err| Error::invalid_pattern(name.as_str(), err))?;
        if !regex.capture_names().flatten().any(|group| group == PATH_GROUP) {
            return Err(Error::MissingPathGroup(name.to_string()));
        }
        Ok(Self { name, regex })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One dotted path found in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathMatch<'t> {
    /// Name of the pattern that produced the match.
    pub pattern: &'t str,
    /// The full dotted path, e.g. `models.User`.
    pub path: &'t str,
    /// The last path segment, e.g. `User`.
    pub name: &'t str,
    /// Byte offset of `name` in the scanned text.
    pub name_offset: usize,
}

impl PathMatch<'_> {
    pub fn name_end(&self) -> usize {
        self.name_offset + self.name.len()
    }
}

/// The table of registered reference patterns.
#[derive(Clone, Debug)]
pub struct ReferencePatterns {
    patterns: Vec<ReferencePattern>,
}

impl Default for ReferencePatterns {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferencePatterns {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The patterns for every component reference form CFML knows.
    pub fn builtin() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(name, pattern)| {
                ReferencePattern::new(*name, pattern).expect("builtin reference pattern should compile")
            })
            .collect();
        Self { patterns }
    }

    pub fn push(&mut self, pattern: ReferencePattern) {
        self.patterns.push(pattern);
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferencePattern> {
        self.patterns.iter()
    }

    /// Every path match of every pattern, pattern by pattern.
    pub fn scan<'t>(&'t self, text: &'t str) -> impl Iterator<Item = PathMatch<'t>> + 't {
        self.patterns.iter().flat_map(move |pattern| {
            pattern.regex.captures_iter(text).filter_map(move |caps| {
                let path = caps.name(PATH_GROUP)?;
                let trimmed = path.as_str().trim_end_matches('.');
                let name_start = trimmed.rfind('.').map_or(0, |dot| dot + 1);
                let name = &trimmed[name_start..];
                if name.is_empty() {
                    return None;
                }
                Some(PathMatch {
                    pattern: pattern.name(),
                    path: trimmed,
                    name,
                    name_offset: path.start() + name_start,
                })
            })
        })
    }
}

/// Emit the component of every dotted path whose last segment contains the cursor.
pub(super) fn resolve(scan: &ScanContext<'_>, patterns: &ReferencePatterns, targets: &mut Vec<GotoTarget>) {
    let context = scan.context;
    let position = context.position();

    for found in patterns.scan(context.sanitized_text()) {
        let start = context.position_at(found.name_offset);
        let end = context.position_at(found.name_end());
        if !crate::base::Span::new(start, end).contains(position) {
            continue;
        }
        let Some(file) = scan.registry.resolve_path(found.path, context.file()) else {
            tracing::trace!(pattern = found.pattern, path = found.path, "unresolved component path");
            continue;
        };
        if let Some(component) = scan.registry.component(file) {
            tracing::trace!(pattern = found.pattern, path = found.path, "reference pattern hit");
            targets.push(GotoTarget::component(&component));
        }
    }
}
