//! Application Layer - Data Channel Gateway
//!
//! The binding machinery of the gateway: the registry slices binding units
//! register into at link time, and the container that turns the selected
//! bindings into resolvable roles.
//!
//! ## Architecture
//!
//! The application layer:
//! - Declares one registry slice per role for link-time binding registration
//! - Enforces the exactly-one-binding-per-role rule
//! - Assembles validated containers with per-role lifetime policy
//! - Has no dependencies on concrete providers or external transports
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `dcg-domain`: For roles, ports, value objects, and error types
//! - `linkme` and `once_cell` for registration and lazy singletons

pub mod container;
pub mod registry;

pub use container::*;
pub use registry::*;
