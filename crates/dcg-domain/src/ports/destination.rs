//! Data Channel Destination Port
//!
//! Inbound half of a relayed channel: a destination accepts payloads
//! arriving from the data channel on a local ingress port and hands them
//! to the gateway side.

use crate::error::Result;
use crate::value_objects::DestinationParams;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;

/// Inbound channel endpoint
///
/// A destination starts closed. `open` binds the local ingress port named
/// in the parameters; `recv` yields payloads as they arrive; `close`
/// releases the port. Implementations must tolerate `close` on an already
/// closed destination.
#[async_trait]
pub trait Destination: Send + Sync {
    /// Bind the local ingress port
    ///
    /// # Errors
    /// Returns `Error::Channel` when the destination is already open and
    /// an I/O error when the port cannot be bound.
    async fn open(&self, params: DestinationParams) -> Result<()>;

    /// Receive the next payload arriving on the ingress port
    async fn recv(&self) -> Result<Vec<u8>>;

    /// Close the destination and release its port
    async fn close(&self) -> Result<()>;

    /// Whether the destination is currently open
    fn is_open(&self) -> bool;

    /// The bound local address, when open
    fn local_addr(&self) -> Option<SocketAddr>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

/// Shared destination handle for dependency injection
pub type SharedDestination = Arc<dyn Destination>;
