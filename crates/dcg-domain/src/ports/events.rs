//! Events Service Port
//!
//! Publish/subscribe contract for channel lifecycle events. Implementations
//! decide the fan-out mechanics; subscribers only see an async stream.

use crate::error::Result;
use crate::events::ChannelEvent;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed async stream of channel events
///
/// Hides the concrete subscription mechanism so implementations can back
/// it with whatever channel type they use internally.
pub type ChannelEventStream = Pin<Box<dyn Stream<Item = ChannelEvent> + Send + Sync + 'static>>;

/// Channel event bus
#[async_trait]
pub trait EventsService: Send + Sync {
    /// Publish an event to all current subscribers
    ///
    /// Publishing with no subscribers is not an error; the event is simply
    /// dropped.
    async fn publish(&self, event: ChannelEvent) -> Result<()>;

    /// Subscribe to events published after this call
    async fn subscribe(&self) -> Result<ChannelEventStream>;

    /// Check if there are any active subscribers
    fn has_subscribers(&self) -> bool;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

impl std::fmt::Debug for dyn EventsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsService")
            .field("provider", &self.provider_name())
            .finish()
    }
}

/// Shared events service handle for dependency injection
pub type SharedEventsService = Arc<dyn EventsService>;
