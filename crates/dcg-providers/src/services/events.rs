//! Tokio Broadcast Events Service
//!
//! Event bus over tokio broadcast channels for in-process event
//! distribution. Events are ephemeral: nothing is persisted, and
//! subscribers only see what is published after they subscribe.
//!
//! ## Capacity
//!
//! When the channel buffer is full, the oldest events are dropped and slow
//! subscribers observe a lag warning instead of the skipped events.

use std::sync::Arc;

use async_trait::async_trait;
use dcg_application::container::{DEFAULT_EVENT_CAPACITY, ResolveCtx};
use dcg_application::registry::{EVENTS_SERVICE_BINDINGS, EventsServiceBindingEntry};
use dcg_domain::ChannelEvent;
use dcg_domain::error::{CompositionResult, Result};
use dcg_domain::ports::{ChannelEventStream, EventsService, SharedEventsService};
use futures::stream;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Events service over tokio broadcast channels
pub struct TokioBroadcastEventsService {
    sender: broadcast::Sender<ChannelEvent>,
    capacity: usize,
}

impl TokioBroadcastEventsService {
    /// Create a bus with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a bus with a custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, capacity }
    }

    /// Current number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TokioBroadcastEventsService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokioBroadcastEventsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioBroadcastEventsService")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

#[async_trait]
impl EventsService for TokioBroadcastEventsService {
    async fn publish(&self, event: ChannelEvent) -> Result<()> {
        match self.sender.send(event) {
            Ok(count) => {
                debug!("Published event to {} subscribers", count);
            }
            Err(_) => {
                debug!("Published event but no subscribers");
            }
        }
        Ok(())
    }

    async fn subscribe(&self) -> Result<ChannelEventStream> {
        let receiver = self.sender.subscribe();

        // Convert the broadcast receiver to a Stream that handles lagged errors
        let stream = stream::unfold(receiver, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(event) => return Some((event, rx)),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Event stream lagged by {} events", n);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return None;
                    }
                }
            }
        });

        Ok(Box::pin(stream))
    }

    fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }

    fn provider_name(&self) -> &str {
        "tokio-broadcast"
    }
}

fn construct_broadcast_events(ctx: &ResolveCtx) -> CompositionResult<SharedEventsService> {
    Ok(Arc::new(TokioBroadcastEventsService::with_capacity(
        ctx.settings().event_capacity,
    )))
}

#[linkme::distributed_slice(EVENTS_SERVICE_BINDINGS)]
static BROADCAST_EVENTS_BINDING: EventsServiceBindingEntry = EventsServiceBindingEntry {
    name: "tokio-broadcast",
    description: "In-process event distribution over tokio broadcast channels",
    requires: &[],
    construct: construct_broadcast_events,
};

#[cfg(test)]
mod tests {
    use super::*;
    use dcg_domain::value_objects::DataConnectionId;
    use futures::StreamExt;

    fn closed_event() -> ChannelEvent {
        ChannelEvent::ChannelClosed {
            data_connection_id: DataConnectionId::generate(),
        }
    }

    #[tokio::test]
    async fn published_events_reach_the_subscriber() {
        let bus = TokioBroadcastEventsService::with_capacity(8);
        let mut stream = bus.subscribe().await.expect("subscribe");

        let event = closed_event();
        bus.publish(event.clone()).await.expect("publish");

        assert_eq!(stream.next().await, Some(event));
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_event() {
        let bus = TokioBroadcastEventsService::with_capacity(8);
        let mut first = bus.subscribe().await.expect("subscribe");
        let mut second = bus.subscribe().await.expect("subscribe");

        let event = closed_event();
        bus.publish(event.clone()).await.expect("publish");

        assert_eq!(first.next().await, Some(event.clone()));
        assert_eq!(second.next().await, Some(event));
    }

    #[tokio::test]
    async fn publishing_without_subscribers_succeeds() {
        let bus = TokioBroadcastEventsService::with_capacity(8);
        assert!(!bus.has_subscribers());
        bus.publish(closed_event()).await.expect("publish");
    }

    #[tokio::test]
    async fn subscriber_count_tracks_live_streams() {
        let bus = TokioBroadcastEventsService::with_capacity(8);
        let stream = bus.subscribe().await.expect("subscribe");
        assert!(bus.has_subscribers());
        assert_eq!(bus.subscriber_count(), 1);

        drop(stream);
        assert!(!bus.has_subscribers());
    }

    #[test]
    fn the_binding_entry_names_this_provider() {
        assert_eq!(BROADCAST_EVENTS_BINDING.name, "tokio-broadcast");
        assert!(BROADCAST_EVENTS_BINDING.requires.is_empty());
    }
}
