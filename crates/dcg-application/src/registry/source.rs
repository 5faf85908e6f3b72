//! Source Binding Registry
//!
//! Link-time registration for implementations of the `SourceFactory` role.
//! A binding unit contributes exactly one entry via
//! `#[linkme::distributed_slice(SOURCE_BINDINGS)]`; composition selects it
//! with [`unique_source_binding`].

use dcg_domain::binding::Role;
use dcg_domain::error::{CompositionError, CompositionResult};
use dcg_domain::ports::SharedSource;

use crate::container::ResolveCtx;

/// Registry entry for source bindings
///
/// Each binding unit registers itself with this entry using
/// `#[linkme::distributed_slice(SOURCE_BINDINGS)]`. The entry carries
/// metadata, the declared role dependencies, and the constructor the
/// container invokes once per resolution.
pub struct SourceBindingEntry {
    /// Unique binding name (e.g., "udp", "stub")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Roles the constructor is allowed to resolve
    pub requires: &'static [Role],
    /// Constructor invoked once per resolved instance
    pub construct: fn(&ResolveCtx) -> CompositionResult<SharedSource>,
}

// Auto-collection via linkme distributed slices - binding units submit entries at link time
#[linkme::distributed_slice]
pub static SOURCE_BINDINGS: [SourceBindingEntry] = [..];

/// Select the single source binding linked into this binary
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn unique_source_binding() -> CompositionResult<&'static SourceBindingEntry> {
    match SOURCE_BINDINGS.static_slice() {
        [] => Err(CompositionError::unsatisfied(Role::SourceFactory)),
        [entry] => Ok(entry),
        entries => Err(CompositionError::duplicate(
            Role::SourceFactory,
            entries.iter().map(|e| e.name).collect(),
        )),
    }
}

/// List all linked source bindings
///
/// Returns (name, description) tuples. Useful for CLI diagnostics.
pub fn list_source_bindings() -> Vec<(&'static str, &'static str)> {
    SOURCE_BINDINGS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::test_support;

    #[linkme::distributed_slice(SOURCE_BINDINGS)]
    static TEST_SOURCE: SourceBindingEntry = SourceBindingEntry {
        name: "test-loop",
        description: "In-memory source linked only into this crate's tests",
        requires: &[],
        construct: test_support::construct_loop_source,
    };

    #[test]
    fn exactly_one_linked_binding_resolves() {
        let entry = unique_source_binding().expect("one test binding is linked");
        assert_eq!(entry.name, "test-loop");
        assert!(entry.requires.is_empty());
    }

    #[test]
    fn listing_names_the_linked_binding() {
        let listed = list_source_bindings();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0, "test-loop");
    }
}
