//! Topic Container Binding Registry
//!
//! Link-time registration for implementations of the `DataTopicContainer`
//! role. The role is singleton-scoped: the container constructs the
//! selected binding at most once and every consumer shares that instance.

use dcg_domain::binding::Role;
use dcg_domain::error::{CompositionError, CompositionResult};
use dcg_domain::ports::SharedDataTopicContainer;

use crate::container::ResolveCtx;

/// Registry entry for topic container bindings
pub struct TopicContainerBindingEntry {
    /// Unique binding name (e.g., "in-memory", "stub")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Roles the constructor is allowed to resolve
    pub requires: &'static [Role],
    /// Constructor invoked at most once per container
    pub construct: fn(&ResolveCtx) -> CompositionResult<SharedDataTopicContainer>,
}

// Auto-collection via linkme distributed slices - binding units submit entries at link time
#[linkme::distributed_slice]
pub static TOPIC_CONTAINER_BINDINGS: [TopicContainerBindingEntry] = [..];

/// Select the single topic container binding linked into this binary
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn unique_topic_container_binding() -> CompositionResult<&'static TopicContainerBindingEntry> {
    match TOPIC_CONTAINER_BINDINGS.static_slice() {
        [] => Err(CompositionError::unsatisfied(Role::DataTopicContainer)),
        [entry] => Ok(entry),
        entries => Err(CompositionError::duplicate(
            Role::DataTopicContainer,
            entries.iter().map(|e| e.name).collect(),
        )),
    }
}

/// List all linked topic container bindings
pub fn list_topic_container_bindings() -> Vec<(&'static str, &'static str)> {
    TOPIC_CONTAINER_BINDINGS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
