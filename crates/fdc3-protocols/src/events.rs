//! Channel membership events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::channel::{ChannelId, Identity};

/// The kinds of event a channel can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelEventType {
    /// A window joined the channel.
    WindowAdded,
    /// A window left the channel.
    WindowRemoved,
}

/// An event raised by the runtime for a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelEvent {
    /// The channel the event concerns.
    pub channel_id: ChannelId,
    /// What happened.
    pub event_type: ChannelEventType,
    /// The window the event concerns.
    pub identity: Identity,
    /// When the runtime raised the event.
    pub timestamp: DateTime<Utc>,
}

impl ChannelEvent {
    /// Create an event stamped with the current time.
    pub fn new(
        channel_id: impl Into<ChannelId>,
        event_type: ChannelEventType,
        identity: Identity,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            event_type,
            identity,
            timestamp: Utc::now(),
        }
    }
}
