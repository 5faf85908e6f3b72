//! Control Service Port
//!
//! The command surface of the gateway. Requests arrive as JSON command
//! envelopes, get dispatched to one handler, and produce a tagged
//! response. The wire shape follows the command envelope the WebRTC side
//! speaks:
//!
//! ```json
//! {"command": "connect", "params": {"channel_addr": "192.0.2.7:50000"}}
//! ```

use crate::error::Result;
use crate::value_objects::{DataConnectionId, TopicRoute};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

/// Control command envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "params", rename_all = "snake_case")]
pub enum ControlRequest {
    /// Establish a relayed channel toward a remote endpoint
    Connect {
        /// Remote data-channel endpoint to relay payloads to
        channel_addr: SocketAddr,
        /// Preassigned connection identifier; minted when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_connection_id: Option<DataConnectionId>,
    },
    /// Tear down a relayed channel
    Disconnect {
        /// Identifier of the channel to tear down
        data_connection_id: DataConnectionId,
    },
    /// Report the route and state of a relayed channel
    Status {
        /// Identifier of the channel to report on
        data_connection_id: DataConnectionId,
    },
}

/// Control command outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ControlResponse {
    /// Channel established; the registered route is reported back
    Connected {
        /// Routing record of the new channel
        route: TopicRoute,
    },
    /// Channel torn down
    Disconnected {
        /// Identifier of the closed channel
        data_connection_id: DataConnectionId,
    },
    /// Route and liveness of an existing channel
    Status {
        /// Routing record of the channel
        route: TopicRoute,
        /// Whether the channel endpoints are currently open
        open: bool,
    },
}

/// Command handler backing the control surface
///
/// Implementations own whatever per-channel state the commands touch.
/// Failures surface as domain errors; transports decide how to render
/// them on the wire.
#[async_trait]
pub trait ControlService: Send + Sync {
    /// Handle one control command
    async fn handle(&self, request: ControlRequest) -> Result<ControlResponse>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

/// Shared control service handle for dependency injection
pub type SharedControlService = Arc<dyn ControlService>;
