//! Stub Control Service
//!
//! Channel lifecycle handler over stub endpoints. The command semantics
//! match the production handler: `connect` opens an endpoint pair and
//! registers the route, `disconnect` reverses it, `status` reports what is
//! known. Only the endpoints behind the commands are fakes.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
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

struct OpenChannel {
    source: SharedSource,
    destination: SharedDestination,
}

/// Channel lifecycle handler for tests
pub struct StubControlService {
    topics: SharedDataTopicContainer,
    sources: SourceFactory,
    destinations: DestinationFactory,
    ingress_port: u16,
    channels: Mutex<HashMap<DataConnectionId, OpenChannel>>,
}

impl StubControlService {
    /// Create a handler over the given collaborators
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
            channels: Mutex::new(HashMap::new()),
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
        let ingress_port = destination
            .local_addr()
            .map_or(self.ingress_port, |addr| addr.port());

        let route = TopicRoute::canonical(data_connection_id.clone(), channel_addr, ingress_port)?;

        let source = self.sources.create()?;
        source
            .open(SourceParams::new(route.source_topic.clone(), channel_addr))
            .await?;

        if let Err(err) = self.topics.register(route.clone()) {
            let _ = source.close().await;
            let _ = destination.close().await;
            return Err(err);
        }

        self.channels.lock().expect("channel table lock").insert(
            data_connection_id,
            OpenChannel {
                source,
                destination,
            },
        );
        Ok(ControlResponse::Connected { route })
    }

    async fn disconnect(&self, data_connection_id: DataConnectionId) -> Result<ControlResponse> {
        if self.topics.remove(&data_connection_id).is_none() {
            return Err(Error::not_found(format!(
                "data connection {data_connection_id}"
            )));
        }

        let channel = self
            .channels
            .lock()
            .expect("channel table lock")
            .remove(&data_connection_id);
        if let Some(channel) = channel {
            let _ = channel.source.close().await;
            let _ = channel.destination.close().await;
        }

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
            .lock()
            .expect("channel table lock")
            .get(data_connection_id)
            .is_some_and(|channel| channel.source.is_open() && channel.destination.is_open());
        Ok(ControlResponse::Status { route, open })
    }
}

#[async_trait]
impl ControlService for StubControlService {
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
        "stub"
    }
}

fn construct_stub_control(ctx: &ResolveCtx) -> CompositionResult<SharedControlService> {
    Ok(Arc::new(StubControlService::new(
        ctx.data_topic_container()?,
        ctx.source_factory()?,
        ctx.destination_factory()?,
        ctx.settings().ingress_port,
    )))
}

#[linkme::distributed_slice(CONTROL_SERVICE_BINDINGS)]
static STUB_CONTROL_BINDING: ControlServiceBindingEntry = ControlServiceBindingEntry {
    name: "stub",
    description: "Channel lifecycle handler over stub endpoints",
    requires: &[
        Role::DataTopicContainer,
        Role::SourceFactory,
        Role::DestinationFactory,
    ],
    construct: construct_stub_control,
};
