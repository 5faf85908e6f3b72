//! In-memory fixtures shared by the container and registry tests
//!
//! Plain (non-registered) binding entries plus the minimal provider
//! implementations behind them. Keeping the entries out of the distributed
//! slices lets each test assemble exactly the graph it wants.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream;

use dcg_domain::binding::Role;
use dcg_domain::error::{CompositionResult, Error, Result};
use dcg_domain::events::ChannelEvent;
use dcg_domain::ports::{
    ChannelEventStream, ControlRequest, ControlResponse, ControlService, DataTopicContainer,
    Destination, EventsService, SharedControlService, SharedDataTopicContainer, SharedDestination,
    SharedEventsService, SharedSource, Source,
};
use dcg_domain::value_objects::{DataConnectionId, DestinationParams, SourceParams, TopicRoute};

use super::config::ComponentConfig;
use super::handles::{DestinationFactory, SourceFactory};
use super::resolver::ResolveCtx;
use crate::registry::{
    ControlServiceBindingEntry, DestinationBindingEntry, EventsServiceBindingEntry,
    SourceBindingEntry, TopicContainerBindingEntry,
};

pub(crate) static LOOP_SOURCE: SourceBindingEntry = SourceBindingEntry {
    name: "fixture-loop",
    description: "Source that counts bytes instead of sending them",
    requires: &[],
    construct: construct_loop_source,
};

pub(crate) static ALT_LOOP_SOURCE: SourceBindingEntry = SourceBindingEntry {
    name: "fixture-loop-alt",
    description: "Second source entry used to provoke duplicates",
    requires: &[],
    construct: construct_loop_source,
};

pub(crate) static MAP_TOPICS: TopicContainerBindingEntry = TopicContainerBindingEntry {
    name: "fixture-map",
    description: "Route table over a plain locked map",
    requires: &[],
    construct: construct_map_topics,
};

pub(crate) static LOOP_DESTINATION: DestinationBindingEntry = DestinationBindingEntry {
    name: "fixture-sink",
    description: "Destination that accepts opens and buffers nothing",
    requires: &[],
    construct: construct_loop_destination,
};

pub(crate) static FIXTURE_CONTROL: ControlServiceBindingEntry = ControlServiceBindingEntry {
    name: "fixture-control",
    description: "Control surface wired to the shared route table",
    requires: &[
        Role::DataTopicContainer,
        Role::SourceFactory,
        Role::DestinationFactory,
    ],
    construct: construct_fixture_control,
};

pub(crate) static FIXTURE_EVENTS: EventsServiceBindingEntry = EventsServiceBindingEntry {
    name: "fixture-bus",
    description: "Event bus that records what was published",
    requires: &[],
    construct: construct_fixture_events,
};

pub(crate) static GREEDY_EVENTS: EventsServiceBindingEntry = EventsServiceBindingEntry {
    name: "fixture-bus-greedy",
    description: "Event bus that resolves a role it never declared",
    requires: &[],
    construct: construct_greedy_events,
};

/// One declaration per role, enough to build a complete container
pub(crate) fn full_fixture_set() -> Vec<ComponentConfig> {
    vec![
        ComponentConfig::source(&LOOP_SOURCE),
        ComponentConfig::data_topic_container(&MAP_TOPICS),
        ComponentConfig::destination(&LOOP_DESTINATION),
        ComponentConfig::control_service(&FIXTURE_CONTROL),
        ComponentConfig::events_service(&FIXTURE_EVENTS),
    ]
}

pub(crate) fn construct_loop_source(_ctx: &ResolveCtx) -> CompositionResult<SharedSource> {
    Ok(Arc::new(LoopSource::default()))
}

pub(crate) fn construct_map_topics(
    _ctx: &ResolveCtx,
) -> CompositionResult<SharedDataTopicContainer> {
    Ok(Arc::new(MapTopics::default()))
}

pub(crate) fn construct_loop_destination(
    _ctx: &ResolveCtx,
) -> CompositionResult<SharedDestination> {
    Ok(Arc::new(LoopDestination::default()))
}

pub(crate) fn construct_fixture_control(
    ctx: &ResolveCtx,
) -> CompositionResult<SharedControlService> {
    Ok(Arc::new(FixtureControl {
        topics: ctx.data_topic_container()?,
        sources: ctx.source_factory()?,
        destinations: ctx.destination_factory()?,
    }))
}

pub(crate) fn construct_fixture_events(_ctx: &ResolveCtx) -> CompositionResult<SharedEventsService> {
    Ok(Arc::new(FixtureEvents::default()))
}

pub(crate) fn construct_greedy_events(ctx: &ResolveCtx) -> CompositionResult<SharedEventsService> {
    // Resolves a role missing from its requires list on purpose.
    let _ = ctx.data_topic_container()?;
    construct_fixture_events(ctx)
}

#[derive(Default)]
struct LoopSource {
    open: AtomicBool,
}

#[async_trait]
impl Source for LoopSource {
    async fn open(&self, _params: SourceParams) -> Result<()> {
        if self.open.swap(true, Ordering::SeqCst) {
            return Err(Error::channel("source is already open"));
        }
        Ok(())
    }

    async fn forward(&self, payload: &[u8]) -> Result<usize> {
        if !self.is_open() {
            return Err(Error::channel("source is closed"));
        }
        Ok(payload.len())
    }

    async fn close(&self) -> Result<()> {
        self.open.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn provider_name(&self) -> &str {
        "fixture-loop"
    }
}

#[derive(Default)]
struct MapTopics {
    routes: Mutex<HashMap<DataConnectionId, TopicRoute>>,
}

impl DataTopicContainer for MapTopics {
    fn register(&self, route: TopicRoute) -> Result<()> {
        let mut routes = self.routes.lock().expect("route table lock");
        if routes.contains_key(&route.data_connection_id) {
            return Err(Error::topic(format!(
                "connection {} is already registered",
                route.data_connection_id
            )));
        }
        if routes.values().any(|r| r.source_topic == route.source_topic) {
            return Err(Error::topic(format!(
                "source topic {} is already registered",
                route.source_topic
            )));
        }
        routes.insert(route.data_connection_id.clone(), route);
        Ok(())
    }

    fn find(&self, id: &DataConnectionId) -> Option<TopicRoute> {
        self.routes.lock().expect("route table lock").get(id).cloned()
    }

    fn remove(&self, id: &DataConnectionId) -> Option<TopicRoute> {
        self.routes.lock().expect("route table lock").remove(id)
    }

    fn routes(&self) -> Vec<TopicRoute> {
        self.routes
            .lock()
            .expect("route table lock")
            .values()
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.routes.lock().expect("route table lock").len()
    }

    fn clear(&self) {
        self.routes.lock().expect("route table lock").clear();
    }

    fn provider_name(&self) -> &str {
        "fixture-map"
    }
}

#[derive(Default)]
struct LoopDestination {
    bound: Mutex<Option<DestinationParams>>,
}

#[async_trait]
impl Destination for LoopDestination {
    async fn open(&self, params: DestinationParams) -> Result<()> {
        let mut bound = self.bound.lock().expect("destination lock");
        if bound.is_some() {
            return Err(Error::channel("destination is already open"));
        }
        *bound = Some(params);
        Ok(())
    }

    async fn recv(&self) -> Result<Vec<u8>> {
        Err(Error::channel("fixture destination buffers no payloads"))
    }

    async fn close(&self) -> Result<()> {
        self.bound.lock().expect("destination lock").take();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.bound.lock().expect("destination lock").is_some()
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        self.bound
            .lock()
            .expect("destination lock")
            .as_ref()
            .map(|params| SocketAddr::from(([127, 0, 0, 1], params.ingress_port)))
    }

    fn provider_name(&self) -> &str {
        "fixture-sink"
    }
}

struct FixtureControl {
    topics: SharedDataTopicContainer,
    sources: SourceFactory,
    destinations: DestinationFactory,
}

#[async_trait]
impl ControlService for FixtureControl {
    async fn handle(&self, request: ControlRequest) -> Result<ControlResponse> {
        match request {
            ControlRequest::Connect {
                channel_addr,
                data_connection_id,
            } => {
                let id = data_connection_id.unwrap_or_else(DataConnectionId::generate);
                let route = TopicRoute::canonical(id, channel_addr, 0)?;
                self.topics.register(route.clone())?;

                let source = self.sources.create()?;
                source
                    .open(SourceParams::new(
                        route.source_topic.clone(),
                        route.channel_addr,
                    ))
                    .await?;
                let destination = self.destinations.create()?;
                destination
                    .open(DestinationParams::new(
                        route.ingress_port,
                        route.destination_topic.clone(),
                    ))
                    .await?;

                Ok(ControlResponse::Connected { route })
            }
            ControlRequest::Disconnect { data_connection_id } => {
                match self.topics.remove(&data_connection_id) {
                    Some(_) => Ok(ControlResponse::Disconnected { data_connection_id }),
                    None => Err(Error::not_found(format!(
                        "data connection {data_connection_id}"
                    ))),
                }
            }
            ControlRequest::Status { data_connection_id } => {
                match self.topics.find(&data_connection_id) {
                    Some(route) => Ok(ControlResponse::Status { route, open: false }),
                    None => Err(Error::not_found(format!(
                        "data connection {data_connection_id}"
                    ))),
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        "fixture-control"
    }
}

#[derive(Default)]
struct FixtureEvents {
    published: Mutex<Vec<ChannelEvent>>,
    subscribers: AtomicUsize,
}

#[async_trait]
impl EventsService for FixtureEvents {
    async fn publish(&self, event: ChannelEvent) -> Result<()> {
        self.published.lock().expect("event log lock").push(event);
        Ok(())
    }

    async fn subscribe(&self) -> Result<ChannelEventStream> {
        self.subscribers.fetch_add(1, Ordering::SeqCst);
        // Replays what was published before the call, which is all the
        // wiring tests need.
        let events = self.published.lock().expect("event log lock").clone();
        Ok(Box::pin(stream::iter(events)))
    }

    fn has_subscribers(&self) -> bool {
        self.subscribers.load(Ordering::SeqCst) > 0
    }

    fn provider_name(&self) -> &str {
        "fixture-bus"
    }
}
