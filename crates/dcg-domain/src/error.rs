//! Error handling types

use crate::binding::Role;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for binding resolution and container assembly
pub type CompositionResult<T> = std::result::Result<T, CompositionError>;

/// Main error type for the Data Channel Gateway
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Data-channel operation error
    #[error("Channel error: {message}")]
    Channel {
        /// Description of the channel error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Topic naming or topic bookkeeping error
    #[error("Topic error: {message}")]
    Topic {
        /// Description of the topic error
        message: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Binding resolution or container assembly error
    #[error("Composition error: {source}")]
    Composition {
        /// The underlying composition error
        #[from]
        source: CompositionError,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a topic error
    pub fn topic<S: Into<String>>(message: S) -> Self {
        Self::Topic {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Channel error creation methods
impl Error {
    /// Create a channel error
    pub fn channel<S: Into<String>>(message: S) -> Self {
        Self::Channel {
            message: message.into(),
            source: None,
        }
    }

    /// Create a channel error with source
    pub fn channel_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Channel {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Network error creation methods
impl Error {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Errors raised while selecting bindings and assembling the container
///
/// Every variant names the role (or roles) involved so a failed startup is
/// diagnosable from the message alone. All of these are raised during
/// composition, before any service accepts work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// No implementation is linked for a required role
    #[error("Unsatisfied binding: no implementation linked for role `{role}`")]
    UnsatisfiedBinding {
        /// The role with no linked binding
        role: Role,
    },

    /// More than one implementation is linked for a role
    #[error("Duplicate binding for role `{role}`: conflicting entries {names:?}")]
    DuplicateBinding {
        /// The role with conflicting bindings
        role: Role,
        /// Names of the conflicting binding entries
        names: Vec<&'static str>,
    },

    /// Declared role dependencies admit no acyclic construction order
    #[error("Cyclic dependency between roles: {}", path_display(path))]
    CyclicDependency {
        /// One full walk of the cycle, first role repeated at the end
        path: Vec<Role>,
    },

    /// A constructor resolved a role it never declared as a dependency
    #[error("Undeclared dependency: role `{role}` resolved `{requested}` without declaring it")]
    UndeclaredDependency {
        /// The role whose constructor misbehaved
        role: Role,
        /// The role it tried to resolve
        requested: Role,
    },
}

impl CompositionError {
    /// Create an unsatisfied binding error
    pub fn unsatisfied(role: Role) -> Self {
        Self::UnsatisfiedBinding { role }
    }

    /// Create a duplicate binding error
    pub fn duplicate(role: Role, names: Vec<&'static str>) -> Self {
        Self::DuplicateBinding { role, names }
    }

    /// Create a cyclic dependency error
    pub fn cyclic(path: Vec<Role>) -> Self {
        Self::CyclicDependency { path }
    }

    /// Create an undeclared dependency error
    pub fn undeclared(role: Role, requested: Role) -> Self {
        Self::UndeclaredDependency { role, requested }
    }

    /// The role this error is primarily about
    ///
    /// Cyclic errors involve several roles; the first role of the recorded
    /// walk is reported for those.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::UnsatisfiedBinding { role }
            | Self::DuplicateBinding { role, .. }
            | Self::UndeclaredDependency { role, .. } => Some(*role),
            Self::CyclicDependency { path } => path.first().copied(),
        }
    }
}

fn path_display(path: &[Role]) -> String {
    path.iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_errors_name_the_role() {
        let err = CompositionError::unsatisfied(Role::DestinationFactory);
        assert!(err.to_string().contains("destination_factory"));
        assert_eq!(err.role(), Some(Role::DestinationFactory));

        let err = CompositionError::duplicate(Role::SourceFactory, vec!["udp", "stub"]);
        assert!(err.to_string().contains("udp"));
        assert!(err.to_string().contains("stub"));
    }

    #[test]
    fn cyclic_error_renders_the_walk() {
        let err = CompositionError::cyclic(vec![
            Role::ControlServiceFactory,
            Role::SourceFactory,
            Role::ControlServiceFactory,
        ]);
        let text = err.to_string();
        assert!(text.contains("control_service_factory -> source_factory -> control_service_factory"));
    }

    #[test]
    fn composition_error_converts_into_domain_error() {
        let err: Error = CompositionError::unsatisfied(Role::EventsServiceFactory).into();
        assert!(matches!(err, Error::Composition { .. }));
        assert!(err.to_string().contains("events_service_factory"));
    }
}
