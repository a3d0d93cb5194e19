//! Variable declarations and the scanners that find them.
//!
//! The resolver consumes variables through two traits:
//! [`LocalVariableExtractor`] for the locals of one function and
//! [`VariableParser`] for the scoped assignments of a whole file.
//! [`VariableScanner`] implements both with regular expressions over
//! sanitized text.

use std::sync::OnceLock;

use regex::Regex;
use smol_str::SmolStr;
use text_size::TextSize;

use super::component::{UserFunction, same_name};
use super::context::DocumentContext;
use super::scope::Scope;
use crate::base::{FileId, LineIndex, Location, Span};
use crate::core::{comment_ranges, sanitize};

/// A variable assignment or declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub identifier: SmolStr,
    pub scope: Scope,
    /// Where the variable was declared or assigned.
    pub declaration: Location,
}

impl Variable {
    pub fn new(identifier: impl Into<SmolStr>, scope: Scope, declaration: Location) -> Self {
        Self {
            identifier: identifier.into(),
            scope,
            declaration,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        same_name(&self.identifier, name)
    }
}

/// Computes the local variables declared in a function.
pub trait LocalVariableExtractor: Send + Sync {
    fn local_variables(
        &self,
        function: &UserFunction,
        context: &DocumentContext,
        is_script: bool,
    ) -> Vec<Variable>;
}

/// Finds every scoped variable assignment in a document.
pub trait VariableParser: Send + Sync {
    fn parse_variables(&self, file: FileId, text: &str, is_script: bool) -> Vec<Variable>;
}

/// Regex based variable scanner.
#[derive(Clone, Copy, Debug, Default)]
pub struct VariableScanner;

const SCOPES: &str = "application|variables|this|request|session|server|client|cookie|form|url";

fn cached(cell: &'static OnceLock<Regex>, pattern: impl FnOnce() -> String) -> &'static Regex {
    cell.get_or_init(|| Regex::new(&pattern()).expect("variable pattern should compile"))
}

fn var_declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, || {
        r"(?i)\bvar\s+(?P<name>[$\w]+)\s*(?:=(?:[^=]|$)|in\b)".to_string()
    })
}

fn local_assignment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, || {
        r"(?i)(?:^|[^.$\w])local\s*\.\s*(?P<name>[$\w]+)\s*=(?:[^=]|$)".to_string()
    })
}

fn scoped_assignment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, || {
        format!(r"(?i)(?:^|[^.$\w])(?P<scope>{SCOPES})\s*\.\s*(?P<name>[$\w]+)\s*=(?:[^=]|$)")
    })
}

fn bracket_assignment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, || {
        format!(
            r#"(?i)(?:^|[^.$\w])(?P<scope>{SCOPES})\s*\[\s*['"](?P<name>[$\w]+)['"]\s*\]\s*=(?:[^=]|$)"#
        )
    })
}

fn cfparam() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, || {
        format!(r#"(?i)<cfparam\s+name\s*=\s*['"](?:(?P<scope>{SCOPES})\.)?(?P<name>[$\w]+)['"]"#)
    })
}

/// Turns regex matches over (a slice of) a document into variables.
struct Collector<'a> {
    file: FileId,
    text: &'a str,
    line_index: &'a LineIndex,
    /// Offset of the scanned slice within `text`.
    base: usize,
    variables: Vec<Variable>,
}

impl Collector<'_> {
    fn collect(&mut self, regex: &Regex, slice: &str, default_scope: Scope) {
        for caps in regex.captures_iter(slice) {
            let Some(name) = caps.name("name") else {
                continue;
            };
            let scope = caps
                .name("scope")
                .map_or(default_scope, |scope| Scope::parse(scope.as_str()));
            let start = self.position(self.base + name.start());
            let end = self.position(self.base + name.end());
            self.variables.push(Variable::new(
                name.as_str(),
                scope,
                Location::new(self.file, Span::new(start, end)),
            ));
        }
    }

    fn position(&self, offset: usize) -> crate::base::Position {
        self.line_index
            .position(self.text, TextSize::from(offset as u32))
    }

    fn finish(mut self) -> Vec<Variable> {
        self.variables
            .sort_by_key(|variable| variable.declaration.range.start);
        self.variables
    }
}

impl LocalVariableExtractor for VariableScanner {
    fn local_variables(
        &self,
        function: &UserFunction,
        context: &DocumentContext,
        _is_script: bool,
    ) -> Vec<Variable> {
        let Some(body) = function.body_range else {
            return Vec::new();
        };
        let text = context.sanitized_text();
        let line_index = context.line_index();
        let start = usize::from(line_index.offset(text, body.start));
        let end = usize::from(line_index.offset(text, body.end)).max(start);
        let slice = &text[start..end];

        let mut collector = Collector {
            file: context.file(),
            text,
            line_index,
            base: start,
            variables: Vec::new(),
        };
        collector.collect(var_declaration(), slice, Scope::Local);
        collector.collect(local_assignment(), slice, Scope::Local);

        let locals = collector.finish();
        tracing::trace!(
            function = %function.name,
            count = locals.len(),
            "collected local variables"
        );
        locals
    }
}

impl VariableParser for VariableScanner {
    fn parse_variables(&self, file: FileId, text: &str, is_script: bool) -> Vec<Variable> {
        let comments = comment_ranges(text, is_script);
        let sanitized = sanitize(text, &comments);
        let line_index = LineIndex::new(&sanitized);

        let mut collector = Collector {
            file,
            text: &sanitized,
            line_index: &line_index,
            base: 0,
            variables: Vec::new(),
        };
        collector.collect(scoped_assignment(), &sanitized, Scope::Unknown);
        collector.collect(bracket_assignment(), &sanitized, Scope::Unknown);
        if !is_script {
            collector.collect(cfparam(), &sanitized, Scope::Variables);
        }
        collector.finish()
    }
}
