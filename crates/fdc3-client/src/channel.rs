//! Channel facade.
//!
//! A [`Channel`] binds a channel identity to a session's transport and
//! listener registries. Operations validate nothing locally and forward to
//! the runtime with the channel's identity; their semantics are the
//! runtime's.

use std::sync::Arc;

use fdc3_protocols::{
    ChannelEvent, ChannelEventType, ChannelId, ChannelType, ConnectionTransport, Context,
    Identity, TransportError,
};

use crate::listener::{ContextListenerHandle, EventListenerHandle};
use crate::registry::{ContextListenerRegistry, EventListenerRegistry};

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;

/// A handle to one channel of the desktop runtime.
///
/// Obtained from [`DesktopSession`](crate::DesktopSession); cheap to create
/// and to clone, since all state lives in the session and the runtime.
#[derive(Clone)]
pub struct Channel {
    id: ChannelId,
    channel_type: ChannelType,
    transport: Arc<dyn ConnectionTransport>,
    contexts: Arc<ContextListenerRegistry>,
    events: Arc<EventListenerRegistry>,
    legacy_removal: bool,
}

impl Channel {
    pub(crate) fn new(
        id: ChannelId,
        channel_type: ChannelType,
        transport: Arc<dyn ConnectionTransport>,
        contexts: Arc<ContextListenerRegistry>,
        events: Arc<EventListenerRegistry>,
        legacy_removal: bool,
    ) -> Self {
        Self {
            id,
            channel_type,
            transport,
            contexts,
            events,
            legacy_removal,
        }
    }

    /// The channel's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The channel's kind.
    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    /// All windows currently connected to this channel.
    pub async fn members(&self) -> Result<Vec<Identity>, TransportError> {
        self.transport.channel_members(&self.id).await
    }

    /// The last context set on this channel.
    ///
    /// Returns `None` if nothing has set context on the channel since it
    /// was last cleared of all windows. Context set by any means - not only
    /// broadcast - is observable here.
    pub async fn current_context(&self) -> Result<Option<Context>, TransportError> {
        self.transport.current_context(&self.id).await
    }

    /// Add a window to this channel. `None` means the calling window.
    ///
    /// If the channel has a current context it is passed to the window's
    /// context listener upon joining.
    pub async fn join(&self, identity: Option<Identity>) -> Result<(), TransportError> {
        self.transport.join_channel(&self.id, identity).await
    }

    /// Remove a window from this channel. `None` means the calling window.
    pub async fn leave(&self, identity: Option<Identity>) -> Result<(), TransportError> {
        self.transport.leave_channel(&self.id, identity).await
    }

    /// Broadcast context to every window on this channel.
    pub async fn broadcast(&self, context: Context) -> Result<(), TransportError> {
        self.transport.broadcast(&self.id, context).await
    }

    /// Register a callback for context broadcast on this channel.
    ///
    /// The returned handle reports whether the runtime acknowledged a fresh
    /// subscription or an existing one was reused.
    pub async fn add_context_listener<F>(
        &self,
        handler: F,
    ) -> Result<ContextListenerHandle, TransportError>
    where
        F: Fn(&Context) + Send + Sync + 'static,
    {
        let (id, outcome) = self.contexts.subscribe(&self.id, Arc::new(handler)).await?;
        Ok(ContextListenerHandle {
            id,
            channel_id: self.id.clone(),
            outcome,
        })
    }

    /// Remove the context listener the handle refers to.
    ///
    /// With `listeners.legacy_channel_removal` enabled this reverts to the
    /// legacy behavior: every context listener on the handle's channel is
    /// removed and the runtime subscription is torn down unconditionally.
    pub async fn remove_context_listener(
        &self,
        handle: &ContextListenerHandle,
    ) -> Result<(), TransportError> {
        if self.legacy_removal {
            self.contexts.unsubscribe_channel(&handle.channel_id).await?;
        } else {
            self.contexts.unsubscribe(handle.id).await?;
        }
        Ok(())
    }

    /// Remove every context listener on this channel (legacy semantics).
    pub async fn remove_all_context_listeners(&self) -> Result<usize, TransportError> {
        self.contexts.unsubscribe_channel(&self.id).await
    }

    /// Register a callback for an event kind on this channel.
    pub async fn add_event_listener<F>(
        &self,
        event_type: ChannelEventType,
        handler: F,
    ) -> Result<EventListenerHandle, TransportError>
    where
        F: Fn(&ChannelEvent) + Send + Sync + 'static,
    {
        let (id, outcome) = self
            .events
            .subscribe(&self.id, event_type, Arc::new(handler))
            .await?;
        Ok(EventListenerHandle {
            id,
            channel_id: self.id.clone(),
            event_type,
            outcome,
        })
    }

    /// Remove the event listener the handle refers to.
    pub async fn remove_event_listener(
        &self,
        handle: &EventListenerHandle,
    ) -> Result<bool, TransportError> {
        self.events.unsubscribe(handle.id).await
    }
}
