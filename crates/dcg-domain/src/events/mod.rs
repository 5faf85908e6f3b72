//! Channel lifecycle events

pub mod channel_events;

pub use channel_events::ChannelEvent;
