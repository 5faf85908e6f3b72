//! Control and Events Service Implementations
//!
//! Provides the command surface and the event bus of the composed gateway.
//!
//! ## Available Services
//!
//! | Service | Port | Description |
//! |---------|------|-------------|
//! | GatewayControlService | `ControlService` | Opens, tears down and reports relayed channels |
//! | TokioBroadcastEventsService | `EventsService` | Tokio broadcast channels |
//!
//! The control service is the only binding with declared dependencies: it
//! resolves the shared topic container and retains the source and
//! destination factories so it can mint one endpoint pair per channel.

pub mod control;
pub mod events;

// Re-export services
pub use control::GatewayControlService;
pub use events::TokioBroadcastEventsService;

// Re-export port traits from the domain layer
pub use dcg_domain::ports::{ControlService, EventsService};
