//! Domain layer for the Data Channel Gateway
//!
//! Core vocabulary of the gateway: the abstract roles a composed gateway
//! needs an implementation for, the binding and lifetime contract those
//! roles obey, channel value objects, lifecycle events, and the port
//! traits concrete providers implement.
//!
//! This crate is dependency-light on purpose. It knows nothing about
//! sockets, registries, or configuration files; those live in the outer
//! layers.

pub mod binding;
pub mod constants;
pub mod error;
pub mod events;
pub mod ports;
pub mod value_objects;

pub use binding::{Lifetime, Role};
pub use error::{CompositionError, CompositionResult, Error, Result};
pub use events::ChannelEvent;
