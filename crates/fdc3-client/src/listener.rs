//! Listener tokens and handles.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use fdc3_protocols::{ChannelEvent, ChannelEventType, ChannelId, Context};

/// Opaque token identifying a single registered listener.
///
/// Returned from subscribe operations so that removal can be scoped to
/// exactly one listener rather than a whole channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Callback invoked when context is broadcast on a subscribed channel.
pub type ContextHandler = Arc<dyn Fn(&Context) + Send + Sync>;

/// Callback invoked when a subscribed channel event fires.
pub type EventHandler = Arc<dyn Fn(&ChannelEvent) + Send + Sync>;

/// How a subscribe call was satisfied.
///
/// Always a resolved, meaningful value: either the runtime acknowledged a
/// fresh subscription, or an existing one was reused without a runtime
/// call. Callers can tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// First listener for the key; the runtime acknowledged a new
    /// subscription.
    Acknowledged,
    /// An existing runtime subscription was reused.
    Piggybacked,
}

/// Handle to a registered context listener.
#[derive(Debug, Clone)]
pub struct ContextListenerHandle {
    pub(crate) id: ListenerId,
    pub(crate) channel_id: ChannelId,
    pub(crate) outcome: SubscribeOutcome,
}

impl ContextListenerHandle {
    /// The listener's token.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The channel the listener is registered on.
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// How the registration was satisfied.
    pub fn outcome(&self) -> SubscribeOutcome {
        self.outcome
    }
}

/// Handle to a registered event listener.
#[derive(Debug, Clone)]
pub struct EventListenerHandle {
    pub(crate) id: ListenerId,
    pub(crate) channel_id: ChannelId,
    pub(crate) event_type: ChannelEventType,
    pub(crate) outcome: SubscribeOutcome,
}

impl EventListenerHandle {
    /// The listener's token.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The channel the listener is registered on.
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// The event kind the listener is registered for.
    pub fn event_type(&self) -> ChannelEventType {
        self.event_type
    }

    /// How the registration was satisfied.
    pub fn outcome(&self) -> SubscribeOutcome {
        self.outcome
    }
}
