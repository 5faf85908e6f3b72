//! Retainable factory handles
//!
//! A handle keeps the container's bindings alive on its own, so a consumer
//! can hold one and mint instances long after the [`Container`] value it
//! came from has been dropped.
//!
//! [`Container`]: super::resolver::Container

use std::sync::Arc;

use dcg_domain::error::CompositionResult;
use dcg_domain::ports::{
    SharedControlService, SharedDestination, SharedEventsService, SharedSource,
};

use super::resolver::{
    resolve_control, resolve_destination, resolve_events, resolve_source, ContainerInner,
};

/// Mints fresh source instances
#[derive(Clone)]
pub struct SourceFactory {
    inner: Arc<ContainerInner>,
}

impl SourceFactory {
    pub(crate) fn new(inner: Arc<ContainerInner>) -> Self {
        Self { inner }
    }

    /// Construct a new source from the bound provider
    pub fn create(&self) -> CompositionResult<SharedSource> {
        resolve_source(&self.inner)
    }

    /// Name of the binding this factory constructs from
    pub fn binding_name(&self) -> &'static str {
        self.inner.bindings.source.name
    }
}

/// Mints fresh destination instances
#[derive(Clone)]
pub struct DestinationFactory {
    inner: Arc<ContainerInner>,
}

impl DestinationFactory {
    pub(crate) fn new(inner: Arc<ContainerInner>) -> Self {
        Self { inner }
    }

    /// Construct a new destination from the bound provider
    pub fn create(&self) -> CompositionResult<SharedDestination> {
        resolve_destination(&self.inner)
    }

    /// Name of the binding this factory constructs from
    pub fn binding_name(&self) -> &'static str {
        self.inner.bindings.destination.name
    }
}

/// Mints fresh control service instances
#[derive(Clone)]
pub struct ControlServiceFactory {
    inner: Arc<ContainerInner>,
}

impl ControlServiceFactory {
    pub(crate) fn new(inner: Arc<ContainerInner>) -> Self {
        Self { inner }
    }

    /// Construct a new control service from the bound provider
    pub fn create(&self) -> CompositionResult<SharedControlService> {
        resolve_control(&self.inner)
    }

    /// Name of the binding this factory constructs from
    pub fn binding_name(&self) -> &'static str {
        self.inner.bindings.control.name
    }
}

/// Mints fresh events service instances
#[derive(Clone)]
pub struct EventsServiceFactory {
    inner: Arc<ContainerInner>,
}

impl EventsServiceFactory {
    pub(crate) fn new(inner: Arc<ContainerInner>) -> Self {
        Self { inner }
    }

    /// Construct a new events service from the bound provider
    pub fn create(&self) -> CompositionResult<SharedEventsService> {
        resolve_events(&self.inner)
    }

    /// Name of the binding this factory constructs from
    pub fn binding_name(&self) -> &'static str {
        self.inner.bindings.events.name
    }
}
