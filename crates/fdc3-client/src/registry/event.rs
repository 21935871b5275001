//! Event-listener registry.
//!
//! Structured mapping from (channel identity, event kind) to an ordered
//! set of callbacks. Runtime-level subscriptions are deduplicated per
//! (channel, kind) pair, with explicit add, remove-one, and remove-all
//! operations.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use fdc3_protocols::{ChannelEvent, ChannelEventType, ChannelId, ConnectionTransport, TransportError};

use crate::listener::{EventHandler, ListenerId, SubscribeOutcome};

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

type EventKey = (ChannelId, ChannelEventType);

#[derive(Default)]
struct EventListeners {
    entries: Vec<(ListenerId, EventHandler)>,
}

/// Per-session registry of channel-event listeners.
pub struct EventListenerRegistry {
    transport: Arc<dyn ConnectionTransport>,
    keys: DashMap<EventKey, Arc<Mutex<EventListeners>>>,
    index: DashMap<ListenerId, EventKey>,
}

impl EventListenerRegistry {
    /// Create a registry issuing subscription calls over `transport`.
    pub fn new(transport: Arc<dyn ConnectionTransport>) -> Self {
        Self {
            transport,
            keys: DashMap::new(),
            index: DashMap::new(),
        }
    }

    fn slot(&self, channel_id: &str, event_type: ChannelEventType) -> Arc<Mutex<EventListeners>> {
        self.keys
            .entry((channel_id.to_string(), event_type))
            .or_default()
            .clone()
    }

    /// Register `handler` for `event_type` on `channel_id`.
    ///
    /// Only the first registration for a (channel, kind) pair reaches the
    /// runtime; later ones reuse the existing subscription.
    pub async fn subscribe(
        &self,
        channel_id: &str,
        event_type: ChannelEventType,
        handler: EventHandler,
    ) -> Result<(ListenerId, SubscribeOutcome), TransportError> {
        let slot = self.slot(channel_id, event_type);
        let mut listeners = slot.lock().await;

        let outcome = if listeners.entries.is_empty() {
            self.transport.add_event_listener(channel_id, event_type).await?;
            SubscribeOutcome::Acknowledged
        } else {
            SubscribeOutcome::Piggybacked
        };

        let id = ListenerId::new();
        listeners.entries.push((id, handler));
        self.index.insert(id, (channel_id.to_string(), event_type));
        debug!(channel = channel_id, ?event_type, listener = %id, ?outcome, "event listener registered");
        Ok((id, outcome))
    }

    /// Remove exactly the listener named by `id`.
    ///
    /// Removing the last listener for a (channel, kind) pair issues one
    /// runtime teardown for that pair.
    pub async fn unsubscribe(&self, id: ListenerId) -> Result<bool, TransportError> {
        let Some((_, (channel_id, event_type))) = self.index.remove(&id) else {
            return Ok(false);
        };

        let slot = self.slot(&channel_id, event_type);
        let mut listeners = slot.lock().await;
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        let removed = listeners.entries.len() < before;

        if removed && listeners.entries.is_empty() {
            self.transport.remove_event_listener(&channel_id, event_type).await?;
            debug!(channel = %channel_id, ?event_type, "event subscription torn down");
        }

        Ok(removed)
    }

    /// Remove every listener for the (channel, kind) pair.
    ///
    /// Issues one runtime teardown when anything was removed. Returns how
    /// many were removed.
    pub async fn unsubscribe_all(
        &self,
        channel_id: &str,
        event_type: ChannelEventType,
    ) -> Result<usize, TransportError> {
        let slot = self.slot(channel_id, event_type);
        let mut listeners = slot.lock().await;
        let drained: Vec<_> = listeners.entries.drain(..).collect();
        for (id, _) in &drained {
            self.index.remove(id);
        }

        if !drained.is_empty() {
            self.transport.remove_event_listener(channel_id, event_type).await?;
            debug!(channel = channel_id, ?event_type, removed = drained.len(), "event listeners removed");
        }

        Ok(drained.len())
    }

    /// Invoke every handler registered for the event's (channel, kind)
    /// pair, in registration order.
    pub async fn notify(&self, event: &ChannelEvent) {
        let key = (event.channel_id.clone(), event.event_type);
        let Some(slot) = self.keys.get(&key).map(|entry| Arc::clone(entry.value())) else {
            return;
        };

        let handlers: Vec<EventHandler> = {
            let listeners = slot.lock().await;
            listeners
                .entries
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };

        for handler in handlers {
            handler(event);
        }
    }

    /// Number of listeners registered for the (channel, kind) pair.
    pub async fn listener_count(&self, channel_id: &str, event_type: ChannelEventType) -> usize {
        let key = (channel_id.to_string(), event_type);
        match self.keys.get(&key).map(|entry| Arc::clone(entry.value())) {
            Some(slot) => slot.lock().await.entries.len(),
            None => 0,
        }
    }
}
