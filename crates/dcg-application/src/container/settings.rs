//! Runtime settings threaded into binding constructors
//!
//! The composition root stays parameterless; whatever tunables a concrete
//! binding needs arrive through these settings at container assembly time.
//! Bindings use what they need and ignore the rest.

use std::collections::HashMap;

/// Default capacity of the channel event bus
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Default receive buffer for inbound payloads (one max-size UDP datagram)
pub const DEFAULT_RECV_BUFFER_BYTES: usize = 65536;

/// Default ingress port for destination endpoints (0 lets the OS pick)
pub const DEFAULT_INGRESS_PORT: u16 = 0;

/// Settings available to binding constructors
///
/// # Example
///
/// ```
/// use dcg_application::container::BindingSettings;
///
/// let settings = BindingSettings::new()
///     .with_event_capacity(64)
///     .with_extra("region", "lab");
/// assert_eq!(settings.event_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct BindingSettings {
    /// Capacity of the channel event bus
    pub event_capacity: usize,
    /// Receive buffer size for inbound payloads
    pub recv_buffer_bytes: usize,
    /// Ingress port destinations bind to (0 picks an ephemeral port)
    pub ingress_port: u16,
    /// Additional binding-specific configuration
    pub extra: HashMap<String, String>,
}

impl BindingSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
            recv_buffer_bytes: DEFAULT_RECV_BUFFER_BYTES,
            ingress_port: DEFAULT_INGRESS_PORT,
            extra: HashMap::new(),
        }
    }

    /// Set the event bus capacity
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Set the receive buffer size
    pub fn with_recv_buffer_bytes(mut self, bytes: usize) -> Self {
        self.recv_buffer_bytes = bytes;
        self
    }

    /// Set the destination ingress port
    pub fn with_ingress_port(mut self, port: u16) -> Self {
        self.ingress_port = port;
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Default for BindingSettings {
    fn default() -> Self {
        Self::new()
    }
}
