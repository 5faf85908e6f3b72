//! Typed configuration sections

pub mod gateway;
pub mod logging;

pub use gateway::{ChannelConfig, ControlConfig, EventsConfig, GatewayConfig};
pub use logging::LoggingConfig;
