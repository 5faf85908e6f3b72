//! Destination Binding Registry
//!
//! Link-time registration for implementations of the `DestinationFactory`
//! role, selected at composition with [`unique_destination_binding`].

use dcg_domain::binding::Role;
use dcg_domain::error::{CompositionError, CompositionResult};
use dcg_domain::ports::SharedDestination;

use crate::container::ResolveCtx;

/// Registry entry for destination bindings
#[derive(Debug)]
pub struct DestinationBindingEntry {
    /// Unique binding name (e.g., "udp", "stub")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Roles the constructor is allowed to resolve
    pub requires: &'static [Role],
    /// Constructor invoked once per resolved instance
    pub construct: fn(&ResolveCtx) -> CompositionResult<SharedDestination>,
}

// Auto-collection via linkme distributed slices - binding units submit entries at link time
#[linkme::distributed_slice]
pub static DESTINATION_BINDINGS: [DestinationBindingEntry] = [..];

/// Select the single destination binding linked into this binary
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn unique_destination_binding() -> CompositionResult<&'static DestinationBindingEntry> {
    match DESTINATION_BINDINGS.static_slice() {
        [] => Err(CompositionError::unsatisfied(Role::DestinationFactory)),
        [entry] => Ok(entry),
        entries => Err(CompositionError::duplicate(
            Role::DestinationFactory,
            entries.iter().map(|e| e.name).collect(),
        )),
    }
}

/// List all linked destination bindings
pub fn list_destination_bindings() -> Vec<(&'static str, &'static str)> {
    DESTINATION_BINDINGS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // No destination binding registers itself in this crate's tests, which
    // is exactly the incomplete-binding-set scenario.

    #[test]
    fn missing_binding_unit_is_an_unsatisfied_binding() {
        let err = unique_destination_binding().expect_err("no binding unit is linked");
        assert_eq!(
            err,
            CompositionError::UnsatisfiedBinding {
                role: Role::DestinationFactory
            }
        );
    }

    #[test]
    fn listing_is_empty_without_a_binding_unit() {
        assert!(list_destination_bindings().is_empty());
    }
}
