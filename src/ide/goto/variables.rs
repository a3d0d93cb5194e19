//! Variables assigned in the component body.

use std::sync::Arc;

use super::{GotoTarget, ScanContext};
use crate::hir::{Component, Scope, ScopePrefix};

/// Resolve `name` / `variables.name` to every assignment of it in the component.
pub(super) fn resolve(scan: &ScanContext<'_>, component: &Arc<Component>, targets: &mut Vec<GotoTarget>) {
    let context = scan.context;
    let word = context.word();
    if word.is_empty() || !ScopePrefix::optional(&[Scope::Variables]).is_match(context.doc_prefix()) {
        return;
    }

    targets.extend(
        component
            .variables
            .iter()
            .filter(|variable| variable.is_named(word))
            .map(GotoTarget::variable),
    );
}
