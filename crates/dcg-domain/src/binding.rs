//! Binding contract vocabulary
//!
//! A composed gateway needs exactly one implementation for each [`Role`].
//! Which concrete implementation satisfies a role is decided at link time
//! by the binding unit a binary pulls in; *how long* an implementation
//! lives is decided here, because the lifetime policy belongs to the role
//! itself, not to any particular implementation of it.

use serde::{Deserialize, Serialize};

/// The abstract roles a composed gateway resolves implementations for
///
/// Roles are the stable seam between consumers and providers: consumers ask
/// the container for a role, never for a concrete type. The set is closed;
/// adding a role means adding a registry slice and a container accessor to
/// go with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Produces data-channel sources that relay payloads outward
    SourceFactory,
    /// The shared topic-route bookkeeping instance
    DataTopicContainer,
    /// Produces data-channel destinations that accept payloads inward
    DestinationFactory,
    /// Produces the control service handling connect/disconnect/status
    ControlServiceFactory,
    /// Produces the channel lifecycle event bus
    EventsServiceFactory,
}

impl Role {
    /// Every role a complete container must satisfy
    pub const ALL: [Role; 5] = [
        Role::SourceFactory,
        Role::DataTopicContainer,
        Role::DestinationFactory,
        Role::ControlServiceFactory,
        Role::EventsServiceFactory,
    ];

    /// Stable identifier used in error messages and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SourceFactory => "source_factory",
            Role::DataTopicContainer => "data_topic_container",
            Role::DestinationFactory => "destination_factory",
            Role::ControlServiceFactory => "control_service_factory",
            Role::EventsServiceFactory => "events_service_factory",
        }
    }

    /// The lifetime policy attached to this role
    ///
    /// `DataTopicContainer` is the one shared instance of the system; every
    /// other role hands out a fresh instance per request.
    pub fn lifetime(&self) -> Lifetime {
        match self {
            Role::DataTopicContainer => Lifetime::Singleton,
            _ => Lifetime::Factory,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long a resolved implementation lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// A new instance on every resolution
    Factory,
    /// One shared instance per container, constructed lazily on first use
    Singleton,
}

impl Lifetime {
    /// Stable identifier used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Factory => "factory",
            Lifetime::Singleton => "singleton",
        }
    }
}

impl std::fmt::Display for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_topic_container_is_singleton() {
        for role in Role::ALL {
            let expected = if role == Role::DataTopicContainer {
                Lifetime::Singleton
            } else {
                Lifetime::Factory
            };
            assert_eq!(role.lifetime(), expected, "lifetime of {role}");
        }
    }

    #[test]
    fn role_identifiers_are_distinct() {
        let mut names: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Role::ALL.len());
    }
}
