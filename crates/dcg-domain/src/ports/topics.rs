//! Data Topic Container Port
//!
//! The one shared bookkeeping instance of the gateway. Every consumer sees
//! the same container, which is what makes a route registered by the
//! control surface visible to everything else.

use crate::error::Result;
use crate::value_objects::{DataConnectionId, TopicRoute};
use std::sync::Arc;

/// Shared registry of live channel routes
///
/// Keyed by connection identifier, with source topics unique across the
/// container. Operations are synchronous; implementations are expected to
/// be cheap in-memory structures safe for concurrent use.
pub trait DataTopicContainer: Send + Sync {
    /// Register the route of a newly opened channel
    ///
    /// # Errors
    /// Returns `Error::Topic` when the connection identifier or the source
    /// topic is already registered.
    fn register(&self, route: TopicRoute) -> Result<()>;

    /// Look up the route of a connection
    fn find(&self, id: &DataConnectionId) -> Option<TopicRoute>;

    /// Remove and return the route of a connection
    fn remove(&self, id: &DataConnectionId) -> Option<TopicRoute>;

    /// Snapshot of all registered routes
    fn routes(&self) -> Vec<TopicRoute>;

    /// Number of registered routes
    fn len(&self) -> usize;

    /// Whether no routes are registered
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registered route
    fn clear(&self);

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

/// Shared topic container handle for dependency injection
pub type SharedDataTopicContainer = Arc<dyn DataTopicContainer>;
