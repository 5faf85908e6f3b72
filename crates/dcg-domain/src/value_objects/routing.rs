//! Routing value objects
//!
//! Parameter records handed to channel endpoints when they open, and the
//! route record the topic container keeps per live channel.

use super::channel::{DataConnectionId, TopicName};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Parameters for opening a data-channel source
///
/// A source subscribes to payloads published on `source_topic` and relays
/// them to the remote data-channel endpoint at `channel_addr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceParams {
    /// Topic the source drains
    pub source_topic: TopicName,

    /// Remote data-channel endpoint payloads are relayed to
    pub channel_addr: SocketAddr,
}

impl SourceParams {
    /// Create a new SourceParams instance
    pub fn new(source_topic: TopicName, channel_addr: SocketAddr) -> Self {
        Self {
            source_topic,
            channel_addr,
        }
    }
}

/// Parameters for opening a data-channel destination
///
/// A destination listens on local `ingress_port` for payloads arriving from
/// the data channel and publishes them on `destination_topic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationParams {
    /// Local port the destination accepts payloads on
    pub ingress_port: u16,

    /// Topic the destination publishes to
    pub destination_topic: TopicName,
}

impl DestinationParams {
    /// Create a new DestinationParams instance
    pub fn new(ingress_port: u16, destination_topic: TopicName) -> Self {
        Self {
            ingress_port,
            destination_topic,
        }
    }
}

/// One live channel's routing record
///
/// Everything the gateway needs to remember about an established data
/// channel: who it is, which topics feed it on either side, the remote
/// endpoint, and the local ingress port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRoute {
    /// Identifier of the data connection this route serves
    pub data_connection_id: DataConnectionId,

    /// Topic whose payloads are relayed out through the source
    pub source_topic: TopicName,

    /// Remote data-channel endpoint the source relays to
    pub channel_addr: SocketAddr,

    /// Local port the destination accepts payloads on
    pub ingress_port: u16,

    /// Topic the destination publishes inbound payloads to
    pub destination_topic: TopicName,
}

impl TopicRoute {
    /// Create a new TopicRoute instance
    pub fn new(
        data_connection_id: DataConnectionId,
        source_topic: TopicName,
        channel_addr: SocketAddr,
        ingress_port: u16,
        destination_topic: TopicName,
    ) -> Self {
        Self {
            data_connection_id,
            source_topic,
            channel_addr,
            ingress_port,
            destination_topic,
        }
    }

    /// Derive the canonical route for a connection
    ///
    /// Both topic names are derived from the connection identifier: the
    /// destination topic is the derived name itself and the source topic
    /// appends a `/relay` segment, keeping the pair distinct while staying
    /// traceable to the connection.
    pub fn canonical(
        data_connection_id: DataConnectionId,
        channel_addr: SocketAddr,
        ingress_port: u16,
    ) -> crate::error::Result<Self> {
        let destination_topic = TopicName::for_data_connection(&data_connection_id);
        let source_topic = destination_topic.with_segment("relay")?;
        Ok(Self::new(
            data_connection_id,
            source_topic,
            channel_addr,
            ingress_port,
            destination_topic,
        ))
    }
}
