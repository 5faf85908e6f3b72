//! Topic Container Implementations
//!
//! Provides the shared route table consumers resolve through the container.
//!
//! ## Available Containers
//!
//! | Container | Type | Description |
//! |-----------|------|-------------|
//! | InMemoryDataTopicContainer | In-Process | Concurrent map keyed by connection id |
//!
//! The container binding carries the singleton lifetime, so one instance
//! serves every consumer in the composed gateway.

pub mod container;

// Re-export containers
pub use container::InMemoryDataTopicContainer;

// Re-export port trait from the domain layer
pub use dcg_domain::ports::DataTopicContainer;
