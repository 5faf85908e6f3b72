//! Data Channel Source Port
//!
//! Outbound half of a relayed channel: a source takes payloads published
//! inside the gateway and forwards them to the remote data-channel
//! endpoint.

use crate::error::Result;
use crate::value_objects::SourceParams;
use async_trait::async_trait;
use std::sync::Arc;

/// Outbound channel endpoint
///
/// A source starts closed. `open` connects it toward the remote endpoint
/// named in the parameters; `forward` relays one payload; `close` releases
/// the transport. Implementations must tolerate `close` on an already
/// closed source.
#[async_trait]
pub trait Source: Send + Sync {
    /// Open the source toward the remote data-channel endpoint
    ///
    /// # Errors
    /// Returns `Error::Channel` when the source is already open and an
    /// I/O error when the transport cannot be set up.
    async fn open(&self, params: SourceParams) -> Result<()>;

    /// Relay one payload to the remote endpoint
    ///
    /// # Returns
    /// The number of bytes handed to the transport.
    async fn forward(&self, payload: &[u8]) -> Result<usize>;

    /// Close the source and release its transport
    async fn close(&self) -> Result<()>;

    /// Whether the source is currently open
    fn is_open(&self) -> bool;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

/// Shared source handle for dependency injection
pub type SharedSource = Arc<dyn Source>;
