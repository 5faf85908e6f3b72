//! Gateway Control Service
//!
//! Channel lifecycle handler. `connect` mints an endpoint pair, opens it
//! and registers the channel's route; `disconnect` tears the pair down and
//! unregisters; `status` reports the route and endpoint liveness.
//!
//! One source and one destination serve one data connection. The service
//! retains the endpoint factories resolved at construction, so channels can
//! be built for as long as the service is held, container or no container.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dcg_application::container::{DestinationFactory, ResolveCtx, SourceFactory};
use dcg_application::registry::{CONTROL_SERVICE_BINDINGS, ControlServiceBindingEntry};
use dcg_domain::Role;
use dcg_domain::error::{CompositionResult, Error, Result};
use dcg_domain::ports::{
    ControlRequest, ControlResponse, ControlService, SharedControlService,
    SharedDataTopicContainer, SharedDestination, SharedSource,
};
use dcg_domain::value_objects::{
    DataConnectionId, DestinationParams, SourceParams, TopicName, TopicRoute,
};
use tracing::{info, warn};

/// Endpoint pair serving one established channel
struct OpenChannel {
    source: SharedSource,
    destination: SharedDestination,
}

/// Production channel lifecycle handler
///
/// Routes live in the shared topic container; the endpoint pairs backing
/// them live here, keyed by connection identifier.
pub struct GatewayControlService {
    topics: SharedDataTopicContainer,
    sources: SourceFactory,
    destinations: DestinationFactory,
    ingress_port: u16,
    channels: DashMap<DataConnectionId, OpenChannel>,
}

impl GatewayControlService {
    /// Create a handler over the given collaborators
    ///
    /// `ingress_port` seeds every destination bind; 0 gives each channel an
    /// ephemeral port of its own.
    pub fn new(
        topics: SharedDataTopicContainer,
        sources: SourceFactory,
        destinations: DestinationFactory,
        ingress_port: u16,
    ) -> Self {
        Self {
            topics,
            sources,
            destinations,
            ingress_port,
            channels: DashMap::new(),
        }
    }

    async fn connect(
        &self,
        channel_addr: SocketAddr,
        preassigned: Option<DataConnectionId>,
    ) -> Result<ControlResponse> {
        let data_connection_id = preassigned.unwrap_or_else(DataConnectionId::generate);

        let destination = self.destinations.create()?;
        let destination_topic = TopicName::for_data_connection(&data_connection_id);
        destination
            .open(DestinationParams::new(self.ingress_port, destination_topic))
            .await?;
        // The route records the port actually bound, not the configured one.
        let ingress_port = destination
            .local_addr()
            .map_or(self.ingress_port, |addr| addr.port());

        let route =
            match TopicRoute::canonical(data_connection_id.clone(), channel_addr, ingress_port) {
                Ok(route) => route,
                Err(err) => {
                    let _ = destination.close().await;
                    return Err(err);
                }
            };

        let source = self.sources.create()?;
        if let Err(err) = source
            .open(SourceParams::new(route.source_topic.clone(), channel_addr))
            .await
        {
            let _ = destination.close().await;
            return Err(err);
        }

        if let Err(err) = self.topics.register(route.clone()) {
            let _ = source.close().await;
            let _ = destination.close().await;
            return Err(err);
        }

        self.channels.insert(
            data_connection_id.clone(),
            OpenChannel {
                source,
                destination,
            },
        );
        info!(
            data_connection_id = %data_connection_id,
            channel_addr = %channel_addr,
            ingress_port = route.ingress_port,
            "Channel connected"
        );
        Ok(ControlResponse::Connected { route })
    }

    async fn disconnect(&self, data_connection_id: DataConnectionId) -> Result<ControlResponse> {
        if self.topics.remove(&data_connection_id).is_none() {
            return Err(Error::not_found(format!(
                "data connection {data_connection_id}"
            )));
        }

        if let Some((_, channel)) = self.channels.remove(&data_connection_id) {
            if let Err(err) = channel.source.close().await {
                warn!(
                    data_connection_id = %data_connection_id,
                    error = %err,
                    "Failed to close source"
                );
            }
            if let Err(err) = channel.destination.close().await {
                warn!(
                    data_connection_id = %data_connection_id,
                    error = %err,
                    "Failed to close destination"
                );
            }
        }

        info!(data_connection_id = %data_connection_id, "Channel disconnected");
        Ok(ControlResponse::Disconnected { data_connection_id })
    }

    fn status(&self, data_connection_id: &DataConnectionId) -> Result<ControlResponse> {
        let Some(route) = self.topics.find(data_connection_id) else {
            return Err(Error::not_found(format!(
                "data connection {data_connection_id}"
            )));
        };
        let open = self
            .channels
            .get(data_connection_id)
            .is_some_and(|channel| channel.source.is_open() && channel.destination.is_open());
        Ok(ControlResponse::Status { route, open })
    }
}

#[async_trait]
impl ControlService for GatewayControlService {
    async fn handle(&self, request: ControlRequest) -> Result<ControlResponse> {
        match request {
            ControlRequest::Connect {
                channel_addr,
                data_connection_id,
            } => self.connect(channel_addr, data_connection_id).await,
            ControlRequest::Disconnect { data_connection_id } => {
                self.disconnect(data_connection_id).await
            }
            ControlRequest::Status { data_connection_id } => self.status(&data_connection_id),
        }
    }

    fn provider_name(&self) -> &str {
        "gateway"
    }
}

fn construct_gateway_control(ctx: &ResolveCtx) -> CompositionResult<SharedControlService> {
    Ok(Arc::new(GatewayControlService::new(
        ctx.data_topic_container()?,
        ctx.source_factory()?,
        ctx.destination_factory()?,
        ctx.settings().ingress_port,
    )))
}

#[linkme::distributed_slice(CONTROL_SERVICE_BINDINGS)]
static GATEWAY_CONTROL_BINDING: ControlServiceBindingEntry = ControlServiceBindingEntry {
    name: "gateway",
    description: "Channel lifecycle handler over the shared route table",
    requires: &[
        Role::DataTopicContainer,
        Role::SourceFactory,
        Role::DestinationFactory,
    ],
    construct: construct_gateway_control,
};
