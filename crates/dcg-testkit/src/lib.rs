//! # Data Channel Gateway - Test Binding Unit
//!
//! This crate contains recording stub implementations for every role the
//! gateway composes. Each stub fulfils the same port as its production
//! counterpart, registers under the binding name `stub`, and keeps what
//! happened to it inspectable, so tests can swap the whole production set
//! out without touching composition code.
//!
//! ## Stub Behavior
//!
//! | Role | Stub | Observable state |
//! |------|------|------------------|
//! | Source | `StubSource` | Forwarded payloads |
//! | Data Topic Container | `StubTopicContainer` | Registered routes |
//! | Destination | `StubDestination` | Queued payloads, minted ports |
//! | Control Service | `StubControlService` | Routes in the shared container |
//! | Events Service | `StubEventsService` | Published events |
//!
//! ## Usage
//!
//! Test binaries link this crate instead of `dcg-providers`:
//!
//! ```ignore
//! // Force-link dcg-testkit to ensure linkme binding registrations are included
//! extern crate dcg_testkit;
//!
//! let container = dcg_infrastructure::di::compose()?;
//! assert_eq!(container.control_service()?.provider_name(), "stub");
//! ```
//!
//! Linking this crate together with `dcg-providers` into one binary makes
//! every role doubly bound and composition fails with `DuplicateBinding`.

// Re-export dcg-domain types commonly used with the stubs
pub use dcg_domain::error::{Error, Result};

/// Stub channel lifecycle handler
pub mod control;

/// Stub inbound endpoint
pub mod destination;

/// Stub event bus
pub mod events;

/// Stub outbound endpoint
pub mod source;

/// Stub route table
pub mod topics;

pub use control::StubControlService;
pub use destination::StubDestination;
pub use events::StubEventsService;
pub use source::StubSource;
pub use topics::StubTopicContainer;
