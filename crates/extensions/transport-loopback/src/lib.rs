//! # FDC3 Transport - Loopback
//!
//! In-process [`ConnectionTransport`] that models the desktop runtime's
//! channel state: per-channel membership and current context, broadcast
//! fan-out, and the context reset when a channel loses its last window.
//!
//! Intended for tests and offline development. Notification delivery is
//! unconditional; listener add/remove calls are recorded and observable
//! through the `*_adds`/`*_removes` accessors so dedup behavior can be
//! asserted against it.
//!
//! ## Usage
//!
//! ```ignore
//! use fdc3_protocols::Identity;
//! use fdc3_transport_loopback::LoopbackTransport;
//!
//! let transport = Arc::new(LoopbackTransport::new(Identity::new("my-app")));
//! let session = DesktopSession::connect(transport, config);
//! ```

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use fdc3_protocols::{
    ChannelEvent, ChannelEventType, ChannelId, ConnectionTransport, Context, Identity,
    RuntimeNotification, TransportError,
};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Per-channel runtime state.
#[derive(Default)]
struct ChannelState {
    members: Vec<Identity>,
    current_context: Option<Context>,
}

/// In-process stand-in for the desktop runtime.
pub struct LoopbackTransport {
    local_identity: Identity,
    channels: DashMap<ChannelId, ChannelState>,
    context_adds: DashMap<ChannelId, usize>,
    context_removes: DashMap<ChannelId, usize>,
    event_adds: DashMap<(ChannelId, ChannelEventType), usize>,
    event_removes: DashMap<(ChannelId, ChannelEventType), usize>,
    notify_tx: broadcast::Sender<RuntimeNotification>,
}

impl LoopbackTransport {
    /// Create a loopback runtime; `local_identity` stands in for the
    /// calling window wherever an operation passes no identity.
    pub fn new(local_identity: Identity) -> Self {
        let (notify_tx, _) = broadcast::channel(256);
        Self {
            local_identity,
            channels: DashMap::new(),
            context_adds: DashMap::new(),
            context_removes: DashMap::new(),
            event_adds: DashMap::new(),
            event_removes: DashMap::new(),
            notify_tx,
        }
    }

    fn resolve(&self, identity: Option<Identity>) -> Identity {
        identity.unwrap_or_else(|| self.local_identity.clone())
    }

    fn push(&self, notification: RuntimeNotification) {
        // No subscribers is fine; the runtime does not care who listens.
        let _ = self.notify_tx.send(notification);
    }

    /// How many context-listener subscribe calls the channel has received.
    pub fn context_listener_adds(&self, channel_id: &str) -> usize {
        self.context_adds.get(channel_id).map(|c| *c).unwrap_or(0)
    }

    /// How many context-listener teardown calls the channel has received.
    pub fn context_listener_removes(&self, channel_id: &str) -> usize {
        self.context_removes.get(channel_id).map(|c| *c).unwrap_or(0)
    }

    /// How many event-listener subscribe calls the (channel, kind) pair has
    /// received.
    pub fn event_listener_adds(&self, channel_id: &str, event_type: ChannelEventType) -> usize {
        self.event_adds
            .get(&(channel_id.to_string(), event_type))
            .map(|c| *c)
            .unwrap_or(0)
    }

    /// How many event-listener teardown calls the (channel, kind) pair has
    /// received.
    pub fn event_listener_removes(&self, channel_id: &str, event_type: ChannelEventType) -> usize {
        self.event_removes
            .get(&(channel_id.to_string(), event_type))
            .map(|c| *c)
            .unwrap_or(0)
    }
}

#[async_trait]
impl ConnectionTransport for LoopbackTransport {
    async fn channel_members(&self, channel_id: &str) -> Result<Vec<Identity>, TransportError> {
        Ok(self
            .channels
            .get(channel_id)
            .map(|state| state.members.clone())
            .unwrap_or_default())
    }

    async fn current_context(&self, channel_id: &str) -> Result<Option<Context>, TransportError> {
        Ok(self
            .channels
            .get(channel_id)
            .and_then(|state| state.current_context.clone()))
    }

    async fn join_channel(
        &self,
        channel_id: &str,
        identity: Option<Identity>,
    ) -> Result<(), TransportError> {
        let identity = self.resolve(identity);
        {
            let mut state = self.channels.entry(channel_id.to_string()).or_default();
            if state.members.contains(&identity) {
                return Ok(());
            }
            state.members.push(identity.clone());
        }

        debug!(channel = channel_id, uuid = %identity.uuid, "window joined channel");
        self.push(RuntimeNotification::Event(ChannelEvent::new(
            channel_id,
            ChannelEventType::WindowAdded,
            identity,
        )));
        Ok(())
    }

    async fn leave_channel(
        &self,
        channel_id: &str,
        identity: Option<Identity>,
    ) -> Result<(), TransportError> {
        let identity = self.resolve(identity);
        let was_member = {
            let mut state = self.channels.entry(channel_id.to_string()).or_default();
            let before = state.members.len();
            state.members.retain(|member| *member != identity);
            // A channel cleared of all windows returns to its initial
            // context-less state.
            if state.members.is_empty() {
                state.current_context = None;
            }
            state.members.len() < before
        };

        if was_member {
            debug!(channel = channel_id, uuid = %identity.uuid, "window left channel");
            self.push(RuntimeNotification::Event(ChannelEvent::new(
                channel_id,
                ChannelEventType::WindowRemoved,
                identity,
            )));
        }
        Ok(())
    }

    async fn broadcast(&self, channel_id: &str, context: Context) -> Result<(), TransportError> {
        self.channels
            .entry(channel_id.to_string())
            .or_default()
            .current_context = Some(context.clone());

        debug!(channel = channel_id, context_type = %context.context_type, "context broadcast");
        self.push(RuntimeNotification::ContextBroadcast {
            channel_id: channel_id.to_string(),
            context,
        });
        Ok(())
    }

    async fn add_context_listener(&self, channel_id: &str) -> Result<(), TransportError> {
        *self.context_adds.entry(channel_id.to_string()).or_insert(0) += 1;
        Ok(())
    }

    async fn remove_context_listener(&self, channel_id: &str) -> Result<(), TransportError> {
        *self.context_removes.entry(channel_id.to_string()).or_insert(0) += 1;
        Ok(())
    }

    async fn add_event_listener(
        &self,
        channel_id: &str,
        event_type: ChannelEventType,
    ) -> Result<(), TransportError> {
        *self
            .event_adds
            .entry((channel_id.to_string(), event_type))
            .or_insert(0) += 1;
        Ok(())
    }

    async fn remove_event_listener(
        &self,
        channel_id: &str,
        event_type: ChannelEventType,
    ) -> Result<(), TransportError> {
        *self
            .event_removes
            .entry((channel_id.to_string(), event_type))
            .or_insert(0) += 1;
        Ok(())
    }

    fn notifications(&self) -> broadcast::Receiver<RuntimeNotification> {
        self.notify_tx.subscribe()
    }
}
