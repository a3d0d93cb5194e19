//! Component names used as types: return types, argument types, property
//! types and the `extends` clause.

use std::sync::Arc;

use super::{GotoTarget, ScanContext};
use crate::hir::{Component, ComponentRef, resolve_ref};

/// Every component reference declared by `component`, in declaration order.
fn type_references(component: &Component) -> impl Iterator<Item = &ComponentRef> {
    let functions = component.functions.values().flat_map(|function| {
        function.return_type.iter().chain(
            function
                .parameters()
                .filter_map(|argument| argument.data_type.as_ref()),
        )
    });
    let properties = component
        .properties
        .values()
        .filter_map(|property| property.data_type.as_ref());

    functions.chain(properties).chain(component.extends.iter())
}

/// Emit the referenced component for every type reference under the cursor.
///
/// Each reference is checked independently; overlapping ranges emit all hits.
pub(super) fn resolve(scan: &ScanContext<'_>, component: &Arc<Component>, targets: &mut Vec<GotoTarget>) {
    let position = scan.context.position();

    for reference in type_references(component).filter(|reference| reference.range.contains(position)) {
        match resolve_ref(scan.registry, reference, component.file) {
            Some(target) => {
                tracing::trace!(path = %reference.path, "type reference hit");
                targets.push(GotoTarget::component(&target));
            }
            None => tracing::trace!(path = %reference.path, "unresolved type reference"),
        }
    }
}
