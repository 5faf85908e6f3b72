//! Control Service Binding Registry
//!
//! Link-time registration for implementations of the
//! `ControlServiceFactory` role. Control services orchestrate the other
//! roles, so their entries are the ones that typically carry a non-empty
//! `requires` list.

use dcg_domain::binding::Role;
use dcg_domain::error::{CompositionError, CompositionResult};
use dcg_domain::ports::SharedControlService;

use crate::container::ResolveCtx;

/// Registry entry for control service bindings
#[derive(Debug)]
pub struct ControlServiceBindingEntry {
    /// Unique binding name (e.g., "gateway", "stub")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Roles the constructor is allowed to resolve
    pub requires: &'static [Role],
    /// Constructor invoked once per resolved instance
    pub construct: fn(&ResolveCtx) -> CompositionResult<SharedControlService>,
}

// Auto-collection via linkme distributed slices - binding units submit entries at link time
#[linkme::distributed_slice]
pub static CONTROL_SERVICE_BINDINGS: [ControlServiceBindingEntry] = [..];

/// Select the single control service binding linked into this binary
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn unique_control_service_binding() -> CompositionResult<&'static ControlServiceBindingEntry> {
    match CONTROL_SERVICE_BINDINGS.static_slice() {
        [] => Err(CompositionError::unsatisfied(Role::ControlServiceFactory)),
        [entry] => Ok(entry),
        entries => Err(CompositionError::duplicate(
            Role::ControlServiceFactory,
            entries.iter().map(|e| e.name).collect(),
        )),
    }
}

/// List all linked control service bindings
pub fn list_control_service_bindings() -> Vec<(&'static str, &'static str)> {
    CONTROL_SERVICE_BINDINGS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // No control service binding registers itself in this crate's tests;
    // selection must report the unsatisfied role by name.

    #[test]
    fn missing_binding_unit_is_an_unsatisfied_binding() {
        let err = unique_control_service_binding().expect_err("no binding unit is linked");
        assert_eq!(err.role(), Some(Role::ControlServiceFactory));
        assert!(err.to_string().contains("control_service_factory"));
    }
}
