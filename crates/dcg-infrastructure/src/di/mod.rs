//! Dependency Injection System - Composition Root and Bootstrap
//!
//! The gateway's wiring lives in two pieces:
//!
//! ```text
//! binding unit (linked)          di::composition              di::bootstrap
//! ─────────────────────          ───────────────              ─────────────
//! linkme slice entries    →    per-role accessors      →    init_gateway()
//!                              compose() / compose_with()   GatewayContext
//! ```
//!
//! [`composition`] answers *which binding implements each role* purely from
//! what is linked; [`bootstrap`] turns that answer into a running context
//! and is where initialization gets logged.
//!
//! **ARCHITECTURE**: this module contains only wiring logic. Concrete role
//! implementations live in binding-unit crates and are selected at link
//! time, never referenced here.

pub mod bootstrap;
pub mod composition;

pub use bootstrap::{GatewayContext, init_gateway, init_test_gateway};
pub use composition::{
    compose, compose_with, control_service_component, data_topic_container_component,
    destination_component, events_service_component, source_component,
};
