//! Data-Channel Endpoint Implementations
//!
//! Provides the UDP endpoints a live channel is made of.
//!
//! ## Available Endpoints
//!
//! | Endpoint | Port | Description |
//! |----------|------|-------------|
//! | UdpDataChannelSource | `Source` | Connected socket toward the remote endpoint |
//! | UdpDataChannelDestination | `Destination` | Bound ingress socket for inbound payloads |
//!
//! Both endpoints start closed and are opened with the parameters carried in
//! a channel's routing record. One source and one destination pair serves one
//! data connection.

pub mod destination;
pub mod source;

// Re-export endpoints
pub use destination::UdpDataChannelDestination;
pub use source::UdpDataChannelSource;

// Re-export port traits from the domain layer
pub use dcg_domain::ports::{Destination, Source};
