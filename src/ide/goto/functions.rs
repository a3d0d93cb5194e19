//! Function calls resolved through the inheritance chain.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::{GotoTarget, ScanContext, is_call};
use crate::hir::{Access, Component, Scope, ScopePrefix, base_component};

/// Scopes a function can be called through without naming its component.
fn callable_scopes(access: Access) -> &'static [Scope] {
    match access {
        Access::Private => &[Scope::Variables],
        Access::Public | Access::Package | Access::Remote => &[Scope::Variables, Scope::This],
    }
}

/// Resolve `name()`, `this.name()`, `variables.name()` and `super.name()`.
///
/// The walk starts at the enclosing component, or at its base for `super.`
/// calls, which also skip the scope check. The first component in the chain
/// declaring a reachable function of that name wins.
pub(super) fn resolve(scan: &ScanContext<'_>, component: &Arc<Component>, targets: &mut Vec<GotoTarget>) {
    let context = scan.context;
    let word = context.word();
    if word.is_empty() || !is_call(context) {
        return;
    }
    let doc_prefix = context.doc_prefix();

    let mut current = Arc::clone(component);
    let mut check_scope = true;
    if component.extends.is_some() && ScopePrefix::required(&[Scope::Super]).is_match(doc_prefix) {
        let Some(base) = base_component(scan.registry, component) else {
            return;
        };
        current = base;
        check_scope = false;
    }

    let mut visited = FxHashSet::default();
    for _ in 0..scan.config.max_inheritance_depth {
        if !visited.insert(current.file) {
            tracing::debug!(component = %current.name, "inheritance cycle");
            return;
        }

        if let Some(function) = current.function(word) {
            let reachable = !check_scope
                || ScopePrefix::optional(callable_scopes(function.access)).is_match(doc_prefix);
            if reachable {
                tracing::trace!(component = %current.name, function = %function.name, "function hit");
                targets.push(GotoTarget::function(current.file, function));
                return;
            }
        }

        match base_component(scan.registry, &current) {
            Some(base) => current = base,
            None => return,
        }
    }

    tracing::debug!(
        depth = scan.config.max_inheritance_depth,
        "inheritance walk stopped at depth limit"
    );
}
