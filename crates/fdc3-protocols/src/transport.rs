//! The transport trait abstracting the desktop runtime connection.
//!
//! Every channel operation the SDK exposes is ultimately a call into the
//! host runtime process. This trait is the seam: wire protocol, framing,
//! and reconnection all live behind an implementation of it.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::channel::{ChannelId, Identity};
use crate::context::Context;
use crate::error::TransportError;
use crate::events::{ChannelEvent, ChannelEventType};

/// A notification pushed by the runtime to the client.
#[derive(Debug, Clone)]
pub enum RuntimeNotification {
    /// Context was broadcast on a channel the client subscribed to.
    ContextBroadcast {
        channel_id: ChannelId,
        context: Context,
    },
    /// A channel membership event.
    Event(ChannelEvent),
}

/// Connection to the host desktop runtime.
///
/// Request methods suspend until the runtime responds; failures surface as
/// [`TransportError`] and are propagated to SDK callers unchanged. The
/// runtime's push path is exposed as a broadcast stream of
/// [`RuntimeNotification`]s.
#[async_trait]
pub trait ConnectionTransport: Send + Sync {
    /// All windows currently connected to the channel.
    async fn channel_members(&self, channel_id: &str) -> Result<Vec<Identity>, TransportError>;

    /// The last context set on the channel, if any.
    async fn current_context(&self, channel_id: &str) -> Result<Option<Context>, TransportError>;

    /// Add a window to the channel. `None` means the calling window.
    async fn join_channel(
        &self,
        channel_id: &str,
        identity: Option<Identity>,
    ) -> Result<(), TransportError>;

    /// Remove a window from the channel. `None` means the calling window.
    async fn leave_channel(
        &self,
        channel_id: &str,
        identity: Option<Identity>,
    ) -> Result<(), TransportError>;

    /// Broadcast context on the channel.
    async fn broadcast(&self, channel_id: &str, context: Context) -> Result<(), TransportError>;

    /// Ask the runtime to push context broadcasts for the channel.
    async fn add_context_listener(&self, channel_id: &str) -> Result<(), TransportError>;

    /// Tear down the runtime-side context subscription for the channel.
    async fn remove_context_listener(&self, channel_id: &str) -> Result<(), TransportError>;

    /// Ask the runtime to push the given event kind for the channel.
    async fn add_event_listener(
        &self,
        channel_id: &str,
        event_type: ChannelEventType,
    ) -> Result<(), TransportError>;

    /// Tear down the runtime-side event subscription for the channel.
    async fn remove_event_listener(
        &self,
        channel_id: &str,
        event_type: ChannelEventType,
    ) -> Result<(), TransportError>;

    /// Subscribe to notifications pushed by the runtime.
    fn notifications(&self) -> broadcast::Receiver<RuntimeNotification>;
}
