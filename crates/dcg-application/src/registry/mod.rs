//! Binding Registry System
//!
//! Link-time registration infrastructure for role bindings. Uses the
//! `linkme` crate: binding units contribute entries at compile time and the
//! composition root discovers them at startup.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Binding Registration Flow                    │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  1. Binding unit:   #[linkme::distributed_slice(SOURCE_BINDINGS)]│
//! │                     static ENTRY: SourceBindingEntry = ...       │
//! │                              ↓                                   │
//! │  2. Registry:       #[linkme::distributed_slice]                 │
//! │                     pub static SOURCE_BINDINGS: [Entry] = [..]   │
//! │                              ↓                                   │
//! │  3. Composition:    unique_source_binding()                      │
//! │                       0 entries  → UnsatisfiedBinding            │
//! │                       1 entry    → the binding                   │
//! │                       2+ entries → DuplicateBinding              │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exactly one binding unit is meant to be linked per binary: production
//! binaries pull in `dcg-providers`, test harnesses pull in `dcg-testkit`.
//! Linking both, or neither, is a composition error reported before any
//! service runs.
//!
//! ## Usage
//!
//! ### Registering a binding (in a binding unit)
//!
//! ```ignore
//! use dcg_application::registry::{SOURCE_BINDINGS, SourceBindingEntry};
//!
//! #[linkme::distributed_slice(SOURCE_BINDINGS)]
//! static UDP_SOURCE: SourceBindingEntry = SourceBindingEntry {
//!     name: "udp",
//!     description: "UDP relay source",
//!     requires: &[],
//!     construct: |ctx| Ok(Arc::new(DataChannelSourceImpl::new(ctx.settings()))),
//! };
//! ```
//!
//! ### Selecting a binding (in the composition root)
//!
//! ```ignore
//! use dcg_application::registry::unique_source_binding;
//!
//! let entry = unique_source_binding()?;
//! ```

pub mod control;
pub mod destination;
pub mod events;
pub mod source;
pub mod topics;

// Re-export all registry types and functions
pub use control::{
    CONTROL_SERVICE_BINDINGS, ControlServiceBindingEntry, list_control_service_bindings,
    unique_control_service_binding,
};
pub use destination::{
    DESTINATION_BINDINGS, DestinationBindingEntry, list_destination_bindings,
    unique_destination_binding,
};
pub use events::{
    EVENTS_SERVICE_BINDINGS, EventsServiceBindingEntry, list_events_service_bindings,
    unique_events_service_binding,
};
pub use source::{SOURCE_BINDINGS, SourceBindingEntry, list_source_bindings, unique_source_binding};
pub use topics::{
    TOPIC_CONTAINER_BINDINGS, TopicContainerBindingEntry, list_topic_container_bindings,
    unique_topic_container_binding,
};
