//! Opaque per-role binding declarations
//!
//! A [`ComponentConfig`] is what a composition-root accessor returns: the
//! declaration that one role is bound by one registry entry. The value is
//! opaque to callers; only the composer interprets it. Two configs are
//! equivalent when they point at the same registry entry, which is what
//! makes repeated accessor calls merge without conflict.

use dcg_domain::binding::{Lifetime, Role};

use crate::registry::{
    ControlServiceBindingEntry, DestinationBindingEntry, EventsServiceBindingEntry,
    SourceBindingEntry, TopicContainerBindingEntry,
};

/// Declaration that one role is bound by one registry entry
#[derive(Clone, Copy)]
pub struct ComponentConfig {
    decl: BindingDecl,
}

#[derive(Clone, Copy)]
pub(crate) enum BindingDecl {
    Source(&'static SourceBindingEntry),
    Topics(&'static TopicContainerBindingEntry),
    Destination(&'static DestinationBindingEntry),
    Control(&'static ControlServiceBindingEntry),
    Events(&'static EventsServiceBindingEntry),
}

impl ComponentConfig {
    /// Declare the source binding
    pub fn source(entry: &'static SourceBindingEntry) -> Self {
        Self {
            decl: BindingDecl::Source(entry),
        }
    }

    /// Declare the topic container binding
    pub fn data_topic_container(entry: &'static TopicContainerBindingEntry) -> Self {
        Self {
            decl: BindingDecl::Topics(entry),
        }
    }

    /// Declare the destination binding
    pub fn destination(entry: &'static DestinationBindingEntry) -> Self {
        Self {
            decl: BindingDecl::Destination(entry),
        }
    }

    /// Declare the control service binding
    pub fn control_service(entry: &'static ControlServiceBindingEntry) -> Self {
        Self {
            decl: BindingDecl::Control(entry),
        }
    }

    /// Declare the events service binding
    pub fn events_service(entry: &'static EventsServiceBindingEntry) -> Self {
        Self {
            decl: BindingDecl::Events(entry),
        }
    }

    /// The role this declaration binds
    pub fn role(&self) -> Role {
        match self.decl {
            BindingDecl::Source(_) => Role::SourceFactory,
            BindingDecl::Topics(_) => Role::DataTopicContainer,
            BindingDecl::Destination(_) => Role::DestinationFactory,
            BindingDecl::Control(_) => Role::ControlServiceFactory,
            BindingDecl::Events(_) => Role::EventsServiceFactory,
        }
    }

    /// Name of the bound registry entry
    pub fn binding_name(&self) -> &'static str {
        match self.decl {
            BindingDecl::Source(e) => e.name,
            BindingDecl::Topics(e) => e.name,
            BindingDecl::Destination(e) => e.name,
            BindingDecl::Control(e) => e.name,
            BindingDecl::Events(e) => e.name,
        }
    }

    /// Description of the bound registry entry
    pub fn description(&self) -> &'static str {
        match self.decl {
            BindingDecl::Source(e) => e.description,
            BindingDecl::Topics(e) => e.description,
            BindingDecl::Destination(e) => e.description,
            BindingDecl::Control(e) => e.description,
            BindingDecl::Events(e) => e.description,
        }
    }

    /// Lifetime policy of the declared role
    pub fn lifetime(&self) -> Lifetime {
        self.role().lifetime()
    }

    /// Roles the bound entry declares as dependencies
    pub fn requires(&self) -> &'static [Role] {
        match self.decl {
            BindingDecl::Source(e) => e.requires,
            BindingDecl::Topics(e) => e.requires,
            BindingDecl::Destination(e) => e.requires,
            BindingDecl::Control(e) => e.requires,
            BindingDecl::Events(e) => e.requires,
        }
    }

    pub(crate) fn decl(&self) -> BindingDecl {
        self.decl
    }

    /// Whether both declarations point at the same registry entry
    pub(crate) fn is_same_entry(&self, other: &Self) -> bool {
        match (self.decl, other.decl) {
            (BindingDecl::Source(a), BindingDecl::Source(b)) => std::ptr::eq(a, b),
            (BindingDecl::Topics(a), BindingDecl::Topics(b)) => std::ptr::eq(a, b),
            (BindingDecl::Destination(a), BindingDecl::Destination(b)) => std::ptr::eq(a, b),
            (BindingDecl::Control(a), BindingDecl::Control(b)) => std::ptr::eq(a, b),
            (BindingDecl::Events(a), BindingDecl::Events(b)) => std::ptr::eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for ComponentConfig {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_entry(other)
    }
}

impl Eq for ComponentConfig {}

impl std::fmt::Debug for ComponentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("role", &self.role())
            .field("binding", &self.binding_name())
            .finish()
    }
}
