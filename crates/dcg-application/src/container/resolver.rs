//! Role resolution and lifetime policy
//!
//! A [`Container`] is the product of successful composition: five validated
//! bindings plus the state backing their lifetimes. Factory roles construct
//! a fresh instance per request; the topic container is constructed at most
//! once, on first demand, and shared by reference from then on.
//!
//! Teardown follows reference counts: consumers hold clones of what they
//! depend on, so a dependency outlives every dependent that still uses it,
//! and the container's own drop releases the retained singleton last.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use dcg_domain::binding::Role;
use dcg_domain::error::{CompositionError, CompositionResult};
use dcg_domain::ports::{
    SharedControlService, SharedDataTopicContainer, SharedDestination, SharedEventsService,
    SharedSource,
};

use super::handles::{ControlServiceFactory, DestinationFactory, EventsServiceFactory, SourceFactory};
use super::settings::BindingSettings;
use crate::registry::{
    ControlServiceBindingEntry, DestinationBindingEntry, EventsServiceBindingEntry,
    SourceBindingEntry, TopicContainerBindingEntry,
};

/// The validated binding of every role
pub(crate) struct BindingSet {
    pub(crate) source: &'static SourceBindingEntry,
    pub(crate) topics: &'static TopicContainerBindingEntry,
    pub(crate) destination: &'static DestinationBindingEntry,
    pub(crate) control: &'static ControlServiceBindingEntry,
    pub(crate) events: &'static EventsServiceBindingEntry,
}

pub(crate) struct ContainerInner {
    pub(crate) bindings: BindingSet,
    pub(crate) settings: BindingSettings,
    order: Vec<Role>,
    topics_cell: OnceCell<SharedDataTopicContainer>,
}

/// The composed gateway container
///
/// Cheap to clone; clones and retained factory handles share one set of
/// bindings and one singleton cell. Dropping the last of them releases the
/// shared topic container.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    pub(crate) fn from_parts(
        bindings: BindingSet,
        settings: BindingSettings,
        order: Vec<Role>,
    ) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                bindings,
                settings,
                order,
                topics_cell: OnceCell::new(),
            }),
        }
    }

    /// Resolve a fresh source instance
    pub fn source(&self) -> CompositionResult<SharedSource> {
        resolve_source(&self.inner)
    }

    /// Resolve the shared topic container, constructing it on first demand
    pub fn data_topic_container(&self) -> CompositionResult<SharedDataTopicContainer> {
        resolve_topics(&self.inner)
    }

    /// Resolve a fresh destination instance
    pub fn destination(&self) -> CompositionResult<SharedDestination> {
        resolve_destination(&self.inner)
    }

    /// Resolve a fresh control service instance
    pub fn control_service(&self) -> CompositionResult<SharedControlService> {
        resolve_control(&self.inner)
    }

    /// Resolve a fresh events service instance
    pub fn events_service(&self) -> CompositionResult<SharedEventsService> {
        resolve_events(&self.inner)
    }

    /// A retainable handle that mints fresh sources
    pub fn source_factory(&self) -> SourceFactory {
        SourceFactory::new(Arc::clone(&self.inner))
    }

    /// A retainable handle that mints fresh destinations
    pub fn destination_factory(&self) -> DestinationFactory {
        DestinationFactory::new(Arc::clone(&self.inner))
    }

    /// A retainable handle that mints fresh control services
    pub fn control_service_factory(&self) -> ControlServiceFactory {
        ControlServiceFactory::new(Arc::clone(&self.inner))
    }

    /// A retainable handle that mints fresh events services
    pub fn events_service_factory(&self) -> EventsServiceFactory {
        EventsServiceFactory::new(Arc::clone(&self.inner))
    }

    /// Roles in the order constructors may run, dependencies first
    pub fn composition_order(&self) -> &[Role] {
        &self.inner.order
    }

    /// Name of the binding selected for a role
    pub fn binding_name(&self, role: Role) -> &'static str {
        match role {
            Role::SourceFactory => self.inner.bindings.source.name,
            Role::DataTopicContainer => self.inner.bindings.topics.name,
            Role::DestinationFactory => self.inner.bindings.destination.name,
            Role::ControlServiceFactory => self.inner.bindings.control.name,
            Role::EventsServiceFactory => self.inner.bindings.events.name,
        }
    }

    /// (role, binding name) pairs for every role, in declaration order
    pub fn binding_summary(&self) -> Vec<(Role, &'static str)> {
        Role::ALL
            .iter()
            .map(|role| (*role, self.binding_name(*role)))
            .collect()
    }

    /// Whether the shared topic container has been constructed yet
    pub fn data_topic_container_initialized(&self) -> bool {
        self.inner.topics_cell.get().is_some()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Container");
        for (role, name) in self.binding_summary() {
            debug.field(role.as_str(), &name);
        }
        debug.finish_non_exhaustive()
    }
}

/// Resolution context handed to binding constructors
///
/// Grants a constructor access to the settings and to the roles its entry
/// declared under `requires`. Resolving an undeclared role fails, which
/// keeps the declared dependency graph honest.
pub struct ResolveCtx<'a> {
    inner: &'a Arc<ContainerInner>,
    scope: Scope,
}

#[derive(Clone, Copy)]
struct Scope {
    role: Role,
    requires: &'static [Role],
}

impl<'a> ResolveCtx<'a> {
    fn scoped(inner: &'a Arc<ContainerInner>, role: Role, requires: &'static [Role]) -> Self {
        Self {
            inner,
            scope: Scope { role, requires },
        }
    }

    /// Settings supplied at container assembly
    pub fn settings(&self) -> &BindingSettings {
        &self.inner.settings
    }

    /// Resolve the shared topic container
    pub fn data_topic_container(&self) -> CompositionResult<SharedDataTopicContainer> {
        self.ensure_declared(Role::DataTopicContainer)?;
        resolve_topics(self.inner)
    }

    /// Obtain a retainable source factory handle
    pub fn source_factory(&self) -> CompositionResult<SourceFactory> {
        self.ensure_declared(Role::SourceFactory)?;
        Ok(SourceFactory::new(Arc::clone(self.inner)))
    }

    /// Obtain a retainable destination factory handle
    pub fn destination_factory(&self) -> CompositionResult<DestinationFactory> {
        self.ensure_declared(Role::DestinationFactory)?;
        Ok(DestinationFactory::new(Arc::clone(self.inner)))
    }

    /// Resolve a fresh events service instance
    pub fn events_service(&self) -> CompositionResult<SharedEventsService> {
        self.ensure_declared(Role::EventsServiceFactory)?;
        resolve_events(self.inner)
    }

    fn ensure_declared(&self, requested: Role) -> CompositionResult<()> {
        if self.scope.requires.contains(&requested) {
            Ok(())
        } else {
            Err(CompositionError::undeclared(self.scope.role, requested))
        }
    }
}

pub(crate) fn resolve_source(inner: &Arc<ContainerInner>) -> CompositionResult<SharedSource> {
    let entry = inner.bindings.source;
    let ctx = ResolveCtx::scoped(inner, Role::SourceFactory, entry.requires);
    (entry.construct)(&ctx)
}

pub(crate) fn resolve_topics(
    inner: &Arc<ContainerInner>,
) -> CompositionResult<SharedDataTopicContainer> {
    let entry = inner.bindings.topics;
    // Self-resolution is ruled out at build time, so this cannot reenter.
    inner
        .topics_cell
        .get_or_try_init(|| {
            let ctx = ResolveCtx::scoped(inner, Role::DataTopicContainer, entry.requires);
            (entry.construct)(&ctx)
        })
        .map(Arc::clone)
}

pub(crate) fn resolve_destination(
    inner: &Arc<ContainerInner>,
) -> CompositionResult<SharedDestination> {
    let entry = inner.bindings.destination;
    let ctx = ResolveCtx::scoped(inner, Role::DestinationFactory, entry.requires);
    (entry.construct)(&ctx)
}

pub(crate) fn resolve_control(
    inner: &Arc<ContainerInner>,
) -> CompositionResult<SharedControlService> {
    let entry = inner.bindings.control;
    let ctx = ResolveCtx::scoped(inner, Role::ControlServiceFactory, entry.requires);
    (entry.construct)(&ctx)
}

pub(crate) fn resolve_events(
    inner: &Arc<ContainerInner>,
) -> CompositionResult<SharedEventsService> {
    let entry = inner.bindings.events;
    let ctx = ResolveCtx::scoped(inner, Role::EventsServiceFactory, entry.requires);
    (entry.construct)(&ctx)
}
