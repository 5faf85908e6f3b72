//! Gateway configuration sections

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONTROL_HOST, DEFAULT_CONTROL_PORT};
use dcg_application::container::{
    BindingSettings, DEFAULT_EVENT_CAPACITY, DEFAULT_RECV_BUFFER_BYTES,
};

use super::logging::LoggingConfig;

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Control listener configuration
    pub control: ControlConfig,
    /// Data-channel endpoint configuration
    pub channel: ChannelConfig,
    /// Event bus configuration
    pub events: EventsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Settings handed to binding constructors at composition
    pub fn binding_settings(&self) -> BindingSettings {
        BindingSettings::new()
            .with_event_capacity(self.events.capacity)
            .with_recv_buffer_bytes(self.channel.recv_buffer_bytes)
            .with_ingress_port(self.channel.ingress_port)
    }
}

/// Control listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Host the control listener binds
    pub host: String,
    /// Port the control listener binds
    pub port: u16,
}

impl ControlConfig {
    /// The `host:port` string the listener binds
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CONTROL_HOST.to_string(),
            port: DEFAULT_CONTROL_PORT,
        }
    }
}

/// Data-channel endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Local ingress port destinations bind; 0 lets the OS pick one per
    /// channel
    pub ingress_port: u16,
    /// Receive buffer size for inbound payloads
    pub recv_buffer_bytes: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            ingress_port: 0,
            recv_buffer_bytes: DEFAULT_RECV_BUFFER_BYTES,
        }
    }
}

/// Event bus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Capacity of the channel event bus
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}
