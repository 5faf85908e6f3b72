//! Value objects for channel identity and routing
//!
//! Validated identifiers plus the parameter and route records that flow
//! between the control surface, the channel endpoints, and the topic
//! container.

pub mod channel;
pub mod routing;

pub use channel::{DataConnectionId, TopicName};
pub use routing::{DestinationParams, SourceParams, TopicRoute};
