//! Implicit getters and setters generated for properties.

use std::sync::Arc;

use super::{GotoTarget, ScanContext, is_call};
use crate::hir::{Component, Scope, ScopePrefix, same_name};

/// Resolve `this.getName()` / `this.setName()` to the `name` property when the
/// accessor is generated rather than written out.
pub(super) fn resolve(scan: &ScanContext<'_>, component: &Arc<Component>, targets: &mut Vec<GotoTarget>) {
    let context = scan.context;
    let word = context.word();
    if word.is_empty()
        || !component.accessors
        || !ScopePrefix::required(&[Scope::This]).is_match(context.doc_prefix())
        || !is_call(context)
    {
        return;
    }

    for property in component.properties.values() {
        for (verb, flag) in [("get", property.getter), ("set", property.setter)] {
            if flag.is_disabled() {
                continue;
            }
            let accessor = format!("{verb}{}", property.name);
            // An explicit function of the same name is resolved as a function.
            if component.function(&accessor).is_some() {
                continue;
            }
            if same_name(&accessor, word) {
                tracing::trace!(property = %property.name, accessor = %accessor, "synthesized accessor hit");
                targets.push(GotoTarget::property(component.file, property));
            }
        }
    }
}
