//! Port traits for the five gateway roles
//!
//! Each port is the contract one [`Role`](crate::binding::Role) is resolved
//! against. Concrete implementations live in binding-unit crates and reach
//! consumers only as trait objects handed out by the container.

pub mod control;
pub mod destination;
pub mod events;
pub mod source;
pub mod topics;

pub use control::{ControlRequest, ControlResponse, ControlService, SharedControlService};
pub use destination::{Destination, SharedDestination};
pub use events::{ChannelEventStream, EventsService, SharedEventsService};
pub use source::{SharedSource, Source};
pub use topics::{DataTopicContainer, SharedDataTopicContainer};
