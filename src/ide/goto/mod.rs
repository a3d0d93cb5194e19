//! Go-to-definition implementation.
//!
//! A request runs a fixed sequence of resolvers over one [`DocumentContext`]:
//!
//! ```text
//! reference patterns        ← whole document, any file
//!     │
//!     ▼  (only when the file declares a component)
//! inherited functions → member types → arguments/locals → accessors → variables
//!     │
//!     ▼
//! application scope         ← may load Application.cfc/.cfm (only await point)
//! ```
//!
//! Every resolver appends to one target list, in the order above. Hits are
//! independent, so two resolvers reaching the same declaration report it
//! twice. Nothing here fails: a step that cannot resolve simply adds no targets.

mod accessors;
mod application;
mod functions;
mod locals;
mod members;
mod patterns;
mod variables;

use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use crate::base::{FileId, Location, Span};
use crate::config::GotoConfig;
use crate::hir::{
    Argument, Component, ComponentRegistry, DocumentContext, LocalVariableExtractor, Property,
    Scope, UserFunction, Variable, VariableParser,
};

pub use application::{ApplicationFiles, ApplicationSource, FsApplicationFiles, NoApplicationFiles};
pub use patterns::{PATH_GROUP, PathMatch, ReferencePattern, ReferencePatterns};

/// Result of a go-to-definition request.
#[derive(Clone, Debug, Default)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
    /// The cursor was inside a comment; the editor should not try anything else.
    in_comment: bool,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a result with multiple targets.
    pub fn multiple(targets: Vec<GotoTarget>) -> Self {
        Self {
            targets,
            in_comment: false,
        }
    }

    /// The "stop" result for a cursor inside a comment.
    pub fn in_comment() -> Self {
        Self {
            targets: Vec::new(),
            in_comment: true,
        }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Whether resolution stopped because the cursor was in a comment.
    pub fn is_in_comment(&self) -> bool {
        self.in_comment
    }

    /// Number of targets found.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// The target locations, in resolver order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.targets.iter().map(GotoTarget::location)
    }
}

/// What kind of declaration a target points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Component,
    Function,
    Argument,
    Property,
    Variable(Scope),
}

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    /// The file containing the target.
    pub file: FileId,
    /// The declaration range to select.
    pub range: Span,
    pub kind: TargetKind,
    /// The declared name.
    pub name: SmolStr,
}

impl GotoTarget {
    pub fn location(&self) -> Location {
        Location::new(self.file, self.range)
    }

    pub fn component(component: &Component) -> Self {
        Self {
            file: component.file,
            range: component.declaration_range,
            kind: TargetKind::Component,
            name: component.name.clone(),
        }
    }

    pub fn function(file: FileId, function: &UserFunction) -> Self {
        Self {
            file,
            range: function.name_range,
            kind: TargetKind::Function,
            name: function.name.clone(),
        }
    }

    pub fn argument(file: FileId, argument: &Argument) -> Self {
        Self {
            file,
            range: argument.name_range,
            kind: TargetKind::Argument,
            name: argument.name.clone(),
        }
    }

    pub fn property(file: FileId, property: &Property) -> Self {
        Self {
            file,
            range: property.name_range,
            kind: TargetKind::Property,
            name: property.name.clone(),
        }
    }

    pub fn variable(variable: &Variable) -> Self {
        Self {
            file: variable.declaration.file,
            range: variable.declaration.range,
            kind: TargetKind::Variable(variable.scope),
            name: variable.identifier.clone(),
        }
    }
}

/// The external collaborators a request reads from.
pub struct Collaborators<'a, A> {
    pub registry: &'a dyn ComponentRegistry,
    pub locals: &'a dyn LocalVariableExtractor,
    pub variables: &'a dyn VariableParser,
    pub application: &'a A,
}

impl<A> Clone for Collaborators<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Collaborators<'_, A> {}

/// Inputs shared by the synchronous resolvers.
pub(crate) struct ScanContext<'a> {
    pub context: &'a DocumentContext,
    pub registry: &'a dyn ComponentRegistry,
    pub locals: &'a dyn LocalVariableExtractor,
    pub config: &'a GotoConfig,
}

/// Whether the text after the cursor's word starts a call.
pub(crate) fn is_call(context: &DocumentContext) -> bool {
    context.text_after_word().trim_start().starts_with('(')
}

/// Find the definition(s) of the identifier under the cursor.
///
/// # Arguments
/// * `context` - The document and cursor
/// * `collaborators` - Component registry, variable extractors and application files
/// * `config` - Reference patterns and resolution limits
/// * `cancel` - Observed before and during the application file load
///
/// # Returns
/// The location(s) of the definition, empty if nothing resolves or the request
/// was cancelled, or the in-comment result when the cursor is in a comment.
pub async fn goto_definition<A: ApplicationFiles>(
    context: &DocumentContext,
    collaborators: Collaborators<'_, A>,
    config: &GotoConfig,
    cancel: &CancellationToken,
) -> GotoResult {
    if context.in_comment() {
        return GotoResult::in_comment();
    }
    if cancel.is_cancelled() {
        return GotoResult::empty();
    }

    let mut targets = resolve_in_document(context, collaborators, config);

    if config.application_scope {
        application::resolve(context, collaborators, cancel, &mut targets).await;
    }

    if cancel.is_cancelled() {
        tracing::debug!(file = %context.file(), "definition request cancelled");
        return GotoResult::empty();
    }

    tracing::debug!(
        file = %context.file(),
        word = context.word(),
        targets = targets.len(),
        "goto definition"
    );
    GotoResult::multiple(targets)
}

/// Run every resolver that works on the current document alone.
fn resolve_in_document<A>(
    context: &DocumentContext,
    collaborators: Collaborators<'_, A>,
    config: &GotoConfig,
) -> Vec<GotoTarget> {
    let scan = ScanContext {
        context,
        registry: collaborators.registry,
        locals: collaborators.locals,
        config,
    };
    let mut targets = Vec::new();

    patterns::resolve(&scan, &config.reference_patterns, &mut targets);

    if let Some(component) = context.component() {
        functions::resolve(&scan, component, &mut targets);
        members::resolve(&scan, component, &mut targets);
        locals::resolve(&scan, component, &mut targets);
        accessors::resolve(&scan, component, &mut targets);
        variables::resolve(&scan, component, &mut targets);
    }

    targets
}
