//! # Data Channel Gateway
//!
//! Runtime surface of the gateway: initialization, the control listener
//! and event logging. The composition itself lives in
//! `dcg-infrastructure`; this crate only drives what composition hands it.
//!
//! ## Architecture
//!
//! - Domain layer: roles, ports, value objects and events (dcg-domain)
//! - Application layer: binding registry and container machinery (dcg-application)
//! - Infrastructure: configuration, logging and the composition root (dcg-infrastructure)
//! - Gateway: CLI, control listener and shutdown handling (this crate)

pub mod init;
pub mod listener;

pub use init::run;
