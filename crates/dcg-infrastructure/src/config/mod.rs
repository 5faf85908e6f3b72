//! Configuration management
//!
//! Typed configuration with three merged sources: built-in defaults, a TOML
//! file and `DCG_*` environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{ChannelConfig, ControlConfig, EventsConfig, GatewayConfig, LoggingConfig};
