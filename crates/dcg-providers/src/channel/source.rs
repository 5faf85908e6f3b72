//! UDP Data-Channel Source
//!
//! Outbound endpoint over a connected UDP socket. Opening binds an
//! ephemeral local port and connects it toward the remote data-channel
//! endpoint; every forwarded payload leaves as one datagram.
//!
//! ## Example
//!
//! ```ignore
//! use dcg_providers::channel::UdpDataChannelSource;
//!
//! let source = UdpDataChannelSource::new();
//! source.open(params).await?;
//! let sent = source.forward(b"payload").await?;
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dcg_application::container::ResolveCtx;
use dcg_application::registry::{SOURCE_BINDINGS, SourceBindingEntry};
use dcg_domain::error::{CompositionResult, Error, Result};
use dcg_domain::ports::{SharedSource, Source};
use dcg_domain::value_objects::SourceParams;
use tokio::net::UdpSocket;
use tracing::debug;

/// Outbound data-channel endpoint over UDP
///
/// Starts closed. The socket lives behind a mutex so a retained handle can
/// close the endpoint while another task is forwarding; forwards that lose
/// the race fail with a channel error.
pub struct UdpDataChannelSource {
    state: Mutex<Option<Arc<UdpSocket>>>,
}

impl UdpDataChannelSource {
    /// Create a closed source
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    fn socket(&self) -> Option<Arc<UdpSocket>> {
        self.state
            .lock()
            .expect("source state lock")
            .as_ref()
            .map(Arc::clone)
    }
}

impl Default for UdpDataChannelSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UdpDataChannelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpDataChannelSource")
            .field("open", &self.is_open())
            .finish()
    }
}

#[async_trait]
impl Source for UdpDataChannelSource {
    async fn open(&self, params: SourceParams) -> Result<()> {
        if self.is_open() {
            return Err(Error::channel("source is already open"));
        }

        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|err| Error::network_with_source("Failed to bind source socket", err))?;
        socket.connect(params.channel_addr).await.map_err(|err| {
            Error::network_with_source(
                format!("Failed to connect source toward {}", params.channel_addr),
                err,
            )
        })?;

        debug!(
            topic = %params.source_topic,
            channel_addr = %params.channel_addr,
            "Opened UDP source"
        );

        let mut state = self.state.lock().expect("source state lock");
        if state.is_some() {
            return Err(Error::channel("source is already open"));
        }
        *state = Some(Arc::new(socket));
        Ok(())
    }

    async fn forward(&self, payload: &[u8]) -> Result<usize> {
        let socket = self
            .socket()
            .ok_or_else(|| Error::channel("source is closed"))?;
        socket
            .send(payload)
            .await
            .map_err(|err| Error::network_with_source("Failed to forward payload", err))
    }

    async fn close(&self) -> Result<()> {
        if self
            .state
            .lock()
            .expect("source state lock")
            .take()
            .is_some()
        {
            debug!("Closed UDP source");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.lock().expect("source state lock").is_some()
    }

    fn provider_name(&self) -> &str {
        "udp"
    }
}

fn construct_udp_source(_ctx: &ResolveCtx) -> CompositionResult<SharedSource> {
    Ok(Arc::new(UdpDataChannelSource::new()))
}

#[linkme::distributed_slice(SOURCE_BINDINGS)]
static UDP_SOURCE_BINDING: SourceBindingEntry = SourceBindingEntry {
    name: "udp",
    description: "Connected UDP socket toward the remote data-channel endpoint",
    requires: &[],
    construct: construct_udp_source,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn params_toward(addr: std::net::SocketAddr) -> SourceParams {
        let topic = dcg_domain::value_objects::TopicName::try_create("data/test/relay")
            .expect("valid topic name");
        SourceParams::new(topic, addr)
    }

    #[tokio::test]
    async fn forwarding_reaches_the_remote_endpoint() {
        let remote = UdpSocket::bind("127.0.0.1:0").await.expect("bind remote");
        let remote_addr = remote.local_addr().expect("remote addr");

        let source = UdpDataChannelSource::new();
        source.open(params_toward(remote_addr)).await.expect("open");
        let sent = source.forward(b"payload").await.expect("forward");
        assert_eq!(sent, 7);

        let mut buf = [0u8; 64];
        let (received, _) = remote.recv_from(&mut buf).await.expect("recv");
        assert_eq!(&buf[..received], b"payload");
    }

    #[tokio::test]
    async fn a_second_open_is_rejected() {
        let remote = UdpSocket::bind("127.0.0.1:0").await.expect("bind remote");
        let remote_addr = remote.local_addr().expect("remote addr");

        let source = UdpDataChannelSource::new();
        source.open(params_toward(remote_addr)).await.expect("open");
        let err = source.open(params_toward(remote_addr)).await.unwrap_err();
        assert!(matches!(err, Error::Channel { .. }));
    }

    #[tokio::test]
    async fn forwarding_on_a_closed_source_fails() {
        let source = UdpDataChannelSource::new();
        let err = source.forward(b"payload").await.unwrap_err();
        assert!(matches!(err, Error::Channel { .. }));
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let remote = UdpSocket::bind("127.0.0.1:0").await.expect("bind remote");
        let remote_addr = remote.local_addr().expect("remote addr");

        let source = UdpDataChannelSource::new();
        source.open(params_toward(remote_addr)).await.expect("open");
        source.close().await.expect("close");
        source.close().await.expect("close again");
        assert!(!source.is_open());
    }

    #[test]
    fn the_binding_entry_names_this_provider() {
        assert_eq!(UDP_SOURCE_BINDING.name, "udp");
        assert!(UDP_SOURCE_BINDING.requires.is_empty());
    }
}
