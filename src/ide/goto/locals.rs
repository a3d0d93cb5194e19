//! Arguments and local variables of the enclosing function.

use std::sync::Arc;

use super::{GotoTarget, ScanContext};
use crate::hir::{Component, Scope, ScopePrefix, same_name};

/// Resolve `arguments.name` and `name` / `local.name` inside a function body.
///
/// Arguments always need the `arguments` qualifier. A local only counts when
/// it is declared at or before the cursor.
pub(super) fn resolve(scan: &ScanContext<'_>, component: &Arc<Component>, targets: &mut Vec<GotoTarget>) {
    let context = scan.context;
    let position = context.position();
    let word = context.word();
    if word.is_empty() {
        return;
    }
    let Some(function) = component.function_at(position) else {
        return;
    };
    let doc_prefix = context.doc_prefix();

    if ScopePrefix::required(&[Scope::Arguments]).is_match(doc_prefix) {
        targets.extend(
            function
                .parameters()
                .filter(|argument| same_name(&argument.name, word))
                .map(|argument| GotoTarget::argument(component.file, argument)),
        );
    }

    if ScopePrefix::optional(&[Scope::Local]).is_match(doc_prefix) {
        let locals = scan
            .locals
            .local_variables(function, context, component.is_script);
        targets.extend(
            locals
                .iter()
                .filter(|local| local.declaration.range.start <= position && local.is_named(word))
                .map(GotoTarget::variable),
        );
    }
}
