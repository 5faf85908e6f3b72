//! Events Service Binding Registry
//!
//! Link-time registration for implementations of the
//! `EventsServiceFactory` role, selected at composition with
//! [`unique_events_service_binding`].

use dcg_domain::binding::Role;
use dcg_domain::error::{CompositionError, CompositionResult};
use dcg_domain::ports::SharedEventsService;

use crate::container::ResolveCtx;

/// Registry entry for events service bindings
#[derive(Debug)]
pub struct EventsServiceBindingEntry {
    /// Unique binding name (e.g., "tokio-broadcast", "stub")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Roles the constructor is allowed to resolve
    pub requires: &'static [Role],
    /// Constructor invoked once per resolved instance
    pub construct: fn(&ResolveCtx) -> CompositionResult<SharedEventsService>,
}

// Auto-collection via linkme distributed slices - binding units submit entries at link time
#[linkme::distributed_slice]
pub static EVENTS_SERVICE_BINDINGS: [EventsServiceBindingEntry] = [..];

/// Select the single events service binding linked into this binary
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn unique_events_service_binding() -> CompositionResult<&'static EventsServiceBindingEntry> {
    match EVENTS_SERVICE_BINDINGS.static_slice() {
        [] => Err(CompositionError::unsatisfied(Role::EventsServiceFactory)),
        [entry] => Ok(entry),
        entries => Err(CompositionError::duplicate(
            Role::EventsServiceFactory,
            entries.iter().map(|e| e.name).collect(),
        )),
    }
}

/// List all linked events service bindings
pub fn list_events_service_bindings() -> Vec<(&'static str, &'static str)> {
    EVENTS_SERVICE_BINDINGS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
