//! Channel lifecycle event types
//!
//! Events the gateway publishes as data channels come and go. Interested
//! parties subscribe through the events service port without coupling to
//! whoever raised the event.

use crate::value_objects::{DataConnectionId, TopicRoute};
use serde::{Deserialize, Serialize};

/// Lifecycle events of relayed data channels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ChannelEvent {
    /// A channel was established and its route registered
    ChannelOpened {
        /// The full routing record of the new channel
        route: TopicRoute,
    },
    /// A channel was torn down and its route removed
    ChannelClosed {
        /// Identifier of the closed channel
        data_connection_id: DataConnectionId,
    },
    /// A channel operation failed
    ChannelError {
        /// Identifier of the affected channel, when known
        data_connection_id: Option<DataConnectionId>,
        /// Human-readable description of the failure
        message: String,
    },
}

impl ChannelEvent {
    /// The connection this event concerns, when it names one
    pub fn data_connection_id(&self) -> Option<&DataConnectionId> {
        match self {
            Self::ChannelOpened { route } => Some(&route.data_connection_id),
            Self::ChannelClosed {
                data_connection_id,
            } => Some(data_connection_id),
            Self::ChannelError {
                data_connection_id,
                ..
            } => data_connection_id.as_ref(),
        }
    }
}
