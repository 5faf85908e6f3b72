//! Composition with both binding units linked
//!
//! Linking the production unit and the test unit into one binary leaves
//! every registry slice with two entries, and composition must refuse to
//! guess between them.
//!
//! Run with: `cargo test -p dcg-infrastructure --test duplicate_bindings`

// Force-link both binding units so every role is doubly bound
extern crate dcg_providers;
extern crate dcg_testkit;

use dcg_domain::{CompositionError, Role};
use dcg_infrastructure::di::{
    compose, control_service_component, data_topic_container_component, destination_component,
    events_service_component, source_component,
};

fn assert_conflict(err: &CompositionError, expected_role: Role, expected_names: [&'static str; 2]) {
    match err {
        CompositionError::DuplicateBinding { role, names } => {
            assert_eq!(*role, expected_role);
            assert_eq!(names.len(), 2);
            for name in expected_names {
                assert!(names.contains(&name), "missing contender {name}: {names:?}");
            }
        }
        other => panic!("expected duplicate binding, got {other:?}"),
    }
}

#[test]
fn every_accessor_names_both_contenders() {
    assert_conflict(
        &source_component().unwrap_err(),
        Role::SourceFactory,
        ["udp", "stub"],
    );
    assert_conflict(
        &data_topic_container_component().unwrap_err(),
        Role::DataTopicContainer,
        ["in-memory", "stub"],
    );
    assert_conflict(
        &destination_component().unwrap_err(),
        Role::DestinationFactory,
        ["udp", "stub"],
    );
    assert_conflict(
        &control_service_component().unwrap_err(),
        Role::ControlServiceFactory,
        ["gateway", "stub"],
    );
    assert_conflict(
        &events_service_component().unwrap_err(),
        Role::EventsServiceFactory,
        ["tokio-broadcast", "stub"],
    );
}

#[test]
fn composition_fails_before_any_construction() {
    let err = compose().unwrap_err();
    assert_conflict(&err, Role::SourceFactory, ["udp", "stub"]);
}

#[test]
fn the_error_message_names_the_role() {
    let err = source_component().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Duplicate binding"), "{message}");
    assert!(message.contains("source_factory"), "{message}");
}
