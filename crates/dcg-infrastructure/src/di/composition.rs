//! Composition root
//!
//! The single place where roles meet bindings. One parameterless accessor
//! per role answers "which binding implements this role in this binary",
//! taking the answer from whichever binding unit the build linked. The
//! accessors are pure: no side effects, no logging, and the same answer on
//! every call within one binary.
//!
//! Swapping the linked binding unit (production `dcg-providers` versus test
//! `dcg-testkit`) changes the answers without touching a line here.

use dcg_application::container::{BindingSettings, ComponentConfig, Composer, Container};
use dcg_application::registry::{
    unique_control_service_binding, unique_destination_binding, unique_events_service_binding,
    unique_source_binding, unique_topic_container_binding,
};
use dcg_domain::error::CompositionResult;

/// Binding declaration for the `SourceFactory` role
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn source_component() -> CompositionResult<ComponentConfig> {
    Ok(ComponentConfig::source(unique_source_binding()?))
}

/// Binding declaration for the `DataTopicContainer` role
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn data_topic_container_component() -> CompositionResult<ComponentConfig> {
    Ok(ComponentConfig::data_topic_container(
        unique_topic_container_binding()?,
    ))
}

/// Binding declaration for the `DestinationFactory` role
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn destination_component() -> CompositionResult<ComponentConfig> {
    Ok(ComponentConfig::destination(unique_destination_binding()?))
}

/// Binding declaration for the `ControlServiceFactory` role
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn control_service_component() -> CompositionResult<ComponentConfig> {
    Ok(ComponentConfig::control_service(
        unique_control_service_binding()?,
    ))
}

/// Binding declaration for the `EventsServiceFactory` role
///
/// # Errors
/// * `UnsatisfiedBinding` - no binding unit is linked for the role
/// * `DuplicateBinding` - more than one binding unit is linked
pub fn events_service_component() -> CompositionResult<ComponentConfig> {
    Ok(ComponentConfig::events_service(
        unique_events_service_binding()?,
    ))
}

/// Compose the gateway container with default settings
///
/// # Errors
/// Any composition failure: unsatisfied or duplicate bindings, or a cyclic
/// declared dependency graph.
pub fn compose() -> CompositionResult<Container> {
    compose_with(BindingSettings::default())
}

/// Compose the gateway container with explicit settings
///
/// # Errors
/// Any composition failure: unsatisfied or duplicate bindings, or a cyclic
/// declared dependency graph.
pub fn compose_with(settings: BindingSettings) -> CompositionResult<Container> {
    let mut composer = Composer::with_settings(settings);
    composer.install(source_component()?)?;
    composer.install(data_topic_container_component()?)?;
    composer.install(destination_component()?)?;
    composer.install(control_service_component()?)?;
    composer.install(events_service_component()?)?;
    composer.build()
}
