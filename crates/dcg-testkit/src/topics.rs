//! Stub Route Table
//!
//! In-memory topic container over a plain map. Enforces the same
//! uniqueness rules as the production container.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dcg_application::container::ResolveCtx;
use dcg_application::registry::{TOPIC_CONTAINER_BINDINGS, TopicContainerBindingEntry};
use dcg_domain::error::{CompositionResult, Error, Result};
use dcg_domain::ports::{DataTopicContainer, SharedDataTopicContainer};
use dcg_domain::value_objects::{DataConnectionId, TopicRoute};

/// Route table stub for tests
#[derive(Debug, Default)]
pub struct StubTopicContainer {
    routes: Mutex<HashMap<DataConnectionId, TopicRoute>>,
}

impl StubTopicContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataTopicContainer for StubTopicContainer {
    fn register(&self, route: TopicRoute) -> Result<()> {
        let mut routes = self.routes.lock().expect("route table lock");
        if routes.contains_key(&route.data_connection_id) {
            return Err(Error::topic(format!(
                "data connection {} is already registered",
                route.data_connection_id
            )));
        }
        if routes
            .values()
            .any(|existing| existing.source_topic == route.source_topic)
        {
            return Err(Error::topic(format!(
                "source topic {} is already registered",
                route.source_topic
            )));
        }
        routes.insert(route.data_connection_id.clone(), route);
        Ok(())
    }

    fn find(&self, id: &DataConnectionId) -> Option<TopicRoute> {
        self.routes
            .lock()
            .expect("route table lock")
            .get(id)
            .cloned()
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
        "stub"
    }
}

fn construct_stub_topics(_ctx: &ResolveCtx) -> CompositionResult<SharedDataTopicContainer> {
    Ok(Arc::new(StubTopicContainer::new()))
}

#[linkme::distributed_slice(TOPIC_CONTAINER_BINDINGS)]
static STUB_TOPICS_BINDING: TopicContainerBindingEntry = TopicContainerBindingEntry {
    name: "stub",
    description: "Plain in-memory route table for tests",
    requires: &[],
    construct: construct_stub_topics,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn route(n: u16) -> TopicRoute {
        let id = DataConnectionId::generate();
        let addr = format!("192.0.2.2:{}", 41000 + n).parse().expect("addr");
        TopicRoute::canonical(id, addr, 51000 + n).expect("canonical route")
    }

    #[test]
    fn uniqueness_rules_match_the_production_container() {
        let container = StubTopicContainer::new();
        let first = route(1);
        container.register(first.clone()).expect("register");

        assert!(container.register(first.clone()).is_err());

        let mut clashing = route(2);
        clashing.source_topic = first.source_topic.clone();
        assert!(container.register(clashing).is_err());

        assert_eq!(container.len(), 1);
    }

    #[test]
    fn removal_frees_the_id_and_topics() {
        let container = StubTopicContainer::new();
        let first = route(3);
        container.register(first.clone()).expect("register");

        assert_eq!(container.remove(&first.data_connection_id), Some(first));
        assert!(container.is_empty());
    }

    #[test]
    fn the_binding_entry_names_the_stub() {
        assert_eq!(STUB_TOPICS_BINDING.name, "stub");
        assert!(STUB_TOPICS_BINDING.requires.is_empty());
    }
}
