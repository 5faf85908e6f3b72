//! # Data Channel Gateway - Production Binding Unit
//!
//! This crate contains the production implementations behind the gateway's
//! abstract roles. Each implementation fulfils a port (trait) defined in
//! `dcg-domain` and registers itself into the binding registry declared in
//! `dcg-application` at link time.
//!
//! ## Binding Categories
//!
//! | Role | Port | Implementation | Binding name |
//! |------|------|----------------|--------------|
//! | Source | `Source` | UDP outbound endpoint | `udp` |
//! | Data Topic Container | `DataTopicContainer` | In-memory route table | `in-memory` |
//! | Destination | `Destination` | UDP ingress endpoint | `udp` |
//! | Control Service | `ControlService` | Channel lifecycle handler | `gateway` |
//! | Events Service | `EventsService` | Tokio broadcast bus | `tokio-broadcast` |
//!
//! ## Usage
//!
//! Binaries do not call into this crate; they link it so the registry
//! entries exist, then resolve through the container:
//!
//! ```ignore
//! // Force-link dcg-providers to ensure linkme binding registrations are included
//! extern crate dcg_providers;
//!
//! let container = dcg_infrastructure::di::compose()?;
//! let control = container.control_service()?;
//! ```
//!
//! Exactly one binding unit may be linked into a binary. Linking this crate
//! together with `dcg-testkit` makes every role doubly bound and composition
//! fails with `DuplicateBinding`.

// Re-export dcg-domain types commonly used with the providers
pub use dcg_domain::error::{Error, Result};

/// Data-channel endpoint implementations
///
/// Implements the `Source` and `Destination` ports over UDP sockets.
pub mod channel;

/// Control and events service implementations
///
/// Implements the `ControlService` and `EventsService` ports.
pub mod services;

/// Topic container implementations
///
/// Implements the `DataTopicContainer` port over an in-memory table.
pub mod topics;
