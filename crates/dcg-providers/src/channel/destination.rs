//! UDP Data-Channel Destination
//!
//! Inbound endpoint over a bound UDP socket. Opening binds the ingress
//! port named in the parameters (port 0 lets the OS pick one); `recv`
//! yields one datagram at a time.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dcg_application::container::ResolveCtx;
use dcg_application::registry::{DESTINATION_BINDINGS, DestinationBindingEntry};
use dcg_domain::error::{CompositionResult, Error, Result};
use dcg_domain::ports::{Destination, SharedDestination};
use dcg_domain::value_objects::DestinationParams;
use tokio::net::UdpSocket;
use tracing::debug;

/// Inbound data-channel endpoint over UDP
///
/// Starts closed. Each `recv` reads into a fresh buffer sized by the
/// configured receive buffer; datagrams longer than the buffer are
/// truncated by the transport.
pub struct UdpDataChannelDestination {
    recv_buffer_bytes: usize,
    state: Mutex<Option<Arc<UdpSocket>>>,
}

impl UdpDataChannelDestination {
    /// Create a closed destination with the given receive buffer size
    pub fn new(recv_buffer_bytes: usize) -> Self {
        Self {
            recv_buffer_bytes,
            state: Mutex::new(None),
        }
    }

    fn socket(&self) -> Option<Arc<UdpSocket>> {
        self.state
            .lock()
            .expect("destination state lock")
            .as_ref()
            .map(Arc::clone)
    }
}

impl std::fmt::Debug for UdpDataChannelDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpDataChannelDestination")
            .field("recv_buffer_bytes", &self.recv_buffer_bytes)
            .field("local_addr", &self.local_addr())
            .finish()
    }
}

#[async_trait]
impl Destination for UdpDataChannelDestination {
    async fn open(&self, params: DestinationParams) -> Result<()> {
        if self.is_open() {
            return Err(Error::channel("destination is already open"));
        }

        let socket = UdpSocket::bind(("0.0.0.0", params.ingress_port))
            .await
            .map_err(|err| {
                Error::network_with_source(
                    format!("Failed to bind ingress port {}", params.ingress_port),
                    err,
                )
            })?;

        debug!(
            topic = %params.destination_topic,
            local_addr = ?socket.local_addr().ok(),
            "Opened UDP destination"
        );

        let mut state = self.state.lock().expect("destination state lock");
        if state.is_some() {
            return Err(Error::channel("destination is already open"));
        }
        *state = Some(Arc::new(socket));
        Ok(())
    }

    async fn recv(&self) -> Result<Vec<u8>> {
        let socket = self
            .socket()
            .ok_or_else(|| Error::channel("destination is closed"))?;
        let mut buf = vec![0u8; self.recv_buffer_bytes];
        let (received, _peer) = socket
            .recv_from(&mut buf)
            .await
            .map_err(|err| Error::network_with_source("Failed to receive payload", err))?;
        buf.truncate(received);
        Ok(buf)
    }

    async fn close(&self) -> Result<()> {
        if self
            .state
            .lock()
            .expect("destination state lock")
            .take()
            .is_some()
        {
            debug!("Closed UDP destination");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.lock().expect("destination state lock").is_some()
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        self.socket().and_then(|socket| socket.local_addr().ok())
    }

    fn provider_name(&self) -> &str {
        "udp"
    }
}

fn construct_udp_destination(ctx: &ResolveCtx) -> CompositionResult<SharedDestination> {
    Ok(Arc::new(UdpDataChannelDestination::new(
        ctx.settings().recv_buffer_bytes,
    )))
}

#[linkme::distributed_slice(DESTINATION_BINDINGS)]
static UDP_DESTINATION_BINDING: DestinationBindingEntry = DestinationBindingEntry {
    name: "udp",
    description: "Bound UDP socket accepting inbound payloads on the ingress port",
    requires: &[],
    construct: construct_udp_destination,
};
