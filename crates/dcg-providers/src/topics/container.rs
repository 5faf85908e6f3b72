//! In-Memory Data Topic Container
//!
//! Route table over a concurrent map. Registration enforces the container
//! invariants: one route per connection identifier, one connection per
//! source topic.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use dcg_application::container::ResolveCtx;
use dcg_application::registry::{TOPIC_CONTAINER_BINDINGS, TopicContainerBindingEntry};
use dcg_domain::error::{CompositionResult, Error, Result};
use dcg_domain::ports::{DataTopicContainer, SharedDataTopicContainer};
use dcg_domain::value_objects::{DataConnectionId, TopicRoute};
use tracing::debug;

/// Shared in-memory route table
///
/// Lookups and removals go straight at the concurrent map. Registrations
/// serialize on a write lock so the two uniqueness checks hold together.
#[derive(Debug, Default)]
pub struct InMemoryDataTopicContainer {
    routes: DashMap<DataConnectionId, TopicRoute>,
    // Serializes register; find/remove stay lock-free.
    write_lock: Mutex<()>,
}

impl InMemoryDataTopicContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataTopicContainer for InMemoryDataTopicContainer {
    fn register(&self, route: TopicRoute) -> Result<()> {
        let _guard = self.write_lock.lock().expect("route write lock");

        if self.routes.contains_key(&route.data_connection_id) {
            return Err(Error::topic(format!(
                "data connection {} is already registered",
                route.data_connection_id
            )));
        }
        if self
            .routes
            .iter()
            .any(|existing| existing.source_topic == route.source_topic)
        {
            return Err(Error::topic(format!(
                "source topic {} is already registered",
                route.source_topic
            )));
        }

        debug!(
            data_connection_id = %route.data_connection_id,
            source_topic = %route.source_topic,
            "Registered route"
        );
        self.routes.insert(route.data_connection_id.clone(), route);
        Ok(())
    }

    fn find(&self, id: &DataConnectionId) -> Option<TopicRoute> {
        self.routes.get(id).map(|entry| entry.value().clone())
    }

    fn remove(&self, id: &DataConnectionId) -> Option<TopicRoute> {
        let removed = self.routes.remove(id).map(|(_, route)| route);
        if removed.is_some() {
            debug!(data_connection_id = %id, "Removed route");
        }
        removed
    }

    fn routes(&self) -> Vec<TopicRoute> {
        self.routes
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.routes.len()
    }

    fn clear(&self) {
        self.routes.clear();
    }

    fn provider_name(&self) -> &str {
        "in-memory"
    }
}

fn construct_in_memory_topics(_ctx: &ResolveCtx) -> CompositionResult<SharedDataTopicContainer> {
    Ok(Arc::new(InMemoryDataTopicContainer::new()))
}

#[linkme::distributed_slice(TOPIC_CONTAINER_BINDINGS)]
static IN_MEMORY_TOPICS_BINDING: TopicContainerBindingEntry = TopicContainerBindingEntry {
    name: "in-memory",
    description: "Concurrent in-process route table",
    requires: &[],
    construct: construct_in_memory_topics,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn route(n: u16) -> TopicRoute {
        let id = DataConnectionId::generate();
        let addr = format!("192.0.2.1:{}", 40000 + n).parse().expect("addr");
        TopicRoute::canonical(id, addr, 50000 + n).expect("canonical route")
    }

    #[test]
    fn registered_routes_are_found_by_id() {
        let container = InMemoryDataTopicContainer::new();
        let route = route(1);
        container.register(route.clone()).expect("register");

        let found = container
            .find(&route.data_connection_id)
            .expect("route present");
        assert_eq!(found, route);
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn a_duplicate_connection_id_is_rejected() {
        let container = InMemoryDataTopicContainer::new();
        let route = route(2);
        container.register(route.clone()).expect("register");

        let err = container.register(route).unwrap_err();
        assert!(matches!(err, Error::Topic { .. }));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn a_duplicate_source_topic_is_rejected() {
        let container = InMemoryDataTopicContainer::new();
        let first = route(3);
        container.register(first.clone()).expect("register");

        let mut clashing = route(4);
        clashing.source_topic = first.source_topic.clone();
        let err = container.register(clashing).unwrap_err();
        assert!(matches!(err, Error::Topic { .. }));
    }

    #[test]
    fn removal_returns_the_route_and_frees_its_topics() {
        let container = InMemoryDataTopicContainer::new();
        let first = route(5);
        container.register(first.clone()).expect("register");

        let removed = container
            .remove(&first.data_connection_id)
            .expect("route present");
        assert_eq!(removed, first);
        assert!(container.is_empty());

        // The freed source topic may be registered again.
        let mut successor = route(6);
        successor.source_topic = first.source_topic.clone();
        container.register(successor).expect("register successor");
    }

    #[test]
    fn removing_an_unknown_id_yields_nothing() {
        let container = InMemoryDataTopicContainer::new();
        assert!(container.remove(&DataConnectionId::generate()).is_none());
    }

    #[test]
    fn clear_drops_every_route() {
        let container = InMemoryDataTopicContainer::new();
        container.register(route(7)).expect("register");
        container.register(route(8)).expect("register");
        assert_eq!(container.routes().len(), 2);

        container.clear();
        assert!(container.is_empty());
    }

    #[test]
    fn the_binding_entry_names_this_provider() {
        assert_eq!(IN_MEMORY_TOPICS_BINDING.name, "in-memory");
        assert!(IN_MEMORY_TOPICS_BINDING.requires.is_empty());
    }
}
