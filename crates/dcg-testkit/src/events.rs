//! Stub Events Service
//!
//! Event bus stub that records every published event and fans out to
//! in-memory subscribers. Subscribers only see events published after
//! they subscribed, like the production bus.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dcg_application::container::ResolveCtx;
use dcg_application::registry::{EVENTS_SERVICE_BINDINGS, EventsServiceBindingEntry};
use dcg_domain::ChannelEvent;
use dcg_domain::error::{CompositionResult, Result};
use dcg_domain::ports::{ChannelEventStream, EventsService, SharedEventsService};
use futures::stream;
use tokio::sync::mpsc;

/// Recording event bus
#[derive(Debug, Default)]
pub struct StubEventsService {
    published: Mutex<Vec<ChannelEvent>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<ChannelEvent>>>,
}

impl StubEventsService {
    /// Create a bus with no subscribers and nothing published
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far
    pub fn published(&self) -> Vec<ChannelEvent> {
        self.published.lock().expect("published lock").clone()
    }
}

#[async_trait]
impl EventsService for StubEventsService {
    async fn publish(&self, event: ChannelEvent) -> Result<()> {
        self.published
            .lock()
            .expect("published lock")
            .push(event.clone());
        self.subscribers
            .lock()
            .expect("subscribers lock")
            .retain(|tx| tx.send(event.clone()).is_ok());
        Ok(())
    }

    async fn subscribe(&self) -> Result<ChannelEventStream> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().expect("subscribers lock").push(tx);

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        });
        Ok(Box::pin(stream))
    }

    fn has_subscribers(&self) -> bool {
        self.subscribers
            .lock()
            .expect("subscribers lock")
            .iter()
            .any(|tx| !tx.is_closed())
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

fn construct_stub_events(_ctx: &ResolveCtx) -> CompositionResult<SharedEventsService> {
    Ok(Arc::new(StubEventsService::new()))
}

#[linkme::distributed_slice(EVENTS_SERVICE_BINDINGS)]
static STUB_EVENTS_BINDING: EventsServiceBindingEntry = EventsServiceBindingEntry {
    name: "stub",
    description: "Recording in-memory event bus for tests",
    requires: &[],
    construct: construct_stub_events,
};
