//! Stub Destination
//!
//! Inbound endpoint stub fed from memory. Tests enqueue payloads; `recv`
//! yields them in order and waits when the queue is empty, like a real
//! socket with nothing inbound.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dcg_application::container::ResolveCtx;
use dcg_application::registry::{DESTINATION_BINDINGS, DestinationBindingEntry};
use dcg_domain::error::{CompositionResult, Error, Result};
use dcg_domain::ports::{Destination, SharedDestination};
use dcg_domain::value_objects::DestinationParams;
use tokio::sync::mpsc;

// Ports minted for ingress requests that ask for an ephemeral one.
static NEXT_EPHEMERAL_PORT: AtomicU16 = AtomicU16::new(49152);

#[derive(Debug)]
struct Bound {
    params: DestinationParams,
    port: u16,
}

/// Recording inbound endpoint
///
/// Opening with ingress port 0 mints a distinct fake port, mirroring an
/// OS-assigned ephemeral bind.
#[derive(Debug)]
pub struct StubDestination {
    state: Mutex<Option<Bound>>,
    feed: mpsc::UnboundedSender<Vec<u8>>,
    queue: tokio::sync::Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
}

impl StubDestination {
    /// Create a closed stub destination with an empty payload queue
    pub fn new() -> Self {
        let (feed, queue) = mpsc::unbounded_channel();
        Self {
            state: Mutex::new(None),
            feed,
            queue: tokio::sync::Mutex::new(queue),
        }
    }

    /// Queue a payload for the next `recv`
    pub fn enqueue(&self, payload: impl Into<Vec<u8>>) {
        // The receiver lives as long as self, so send cannot fail.
        let _ = self.feed.send(payload.into());
    }

    /// Parameters of the current open, when open
    pub fn open_params(&self) -> Option<DestinationParams> {
        self.state
            .lock()
            .expect("destination state lock")
            .as_ref()
            .map(|bound| bound.params.clone())
    }
}

impl Default for StubDestination {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Destination for StubDestination {
    async fn open(&self, params: DestinationParams) -> Result<()> {
        let mut state = self.state.lock().expect("destination state lock");
        if state.is_some() {
            return Err(Error::channel("destination is already open"));
        }
        let port = if params.ingress_port == 0 {
            NEXT_EPHEMERAL_PORT.fetch_add(1, Ordering::Relaxed)
        } else {
            params.ingress_port
        };
        *state = Some(Bound { params, port });
        Ok(())
    }

    async fn recv(&self) -> Result<Vec<u8>> {
        if !self.is_open() {
            return Err(Error::channel("destination is closed"));
        }
        self.queue
            .lock()
            .await
            .recv()
            .await
            .ok_or_else(|| Error::channel("payload queue closed"))
    }

    async fn close(&self) -> Result<()> {
        self.state.lock().expect("destination state lock").take();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.lock().expect("destination state lock").is_some()
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        self.state
            .lock()
            .expect("destination state lock")
            .as_ref()
            .map(|bound| SocketAddr::from(([127, 0, 0, 1], bound.port)))
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

fn construct_stub_destination(_ctx: &ResolveCtx) -> CompositionResult<SharedDestination> {
    Ok(Arc::new(StubDestination::new()))
}

#[linkme::distributed_slice(DESTINATION_BINDINGS)]
static STUB_DESTINATION_BINDING: DestinationBindingEntry = DestinationBindingEntry {
    name: "stub",
    description: "Recording inbound endpoint for tests",
    requires: &[],
    construct: construct_stub_destination,
};
