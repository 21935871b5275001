//! Context-listener registry.
//!
//! Allows any number of local callbacks per channel while holding at most
//! one runtime-level subscription per channel: only the first registration
//! for a channel reaches the transport, and only the removal of the last
//! one tears the subscription down.
//!
//! The legacy client removed listeners by channel identity, so removing one
//! of several listeners dropped them all and always issued a teardown.
//! That behavior survives as [`unsubscribe_channel`]; token-scoped
//! [`unsubscribe`] is the default.
//!
//! [`unsubscribe`]: ContextListenerRegistry::unsubscribe
//! [`unsubscribe_channel`]: ContextListenerRegistry::unsubscribe_channel

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use fdc3_protocols::{ChannelId, ConnectionTransport, Context, TransportError};

use crate::listener::{ContextHandler, ListenerId, SubscribeOutcome};

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

#[derive(Default)]
struct ChannelListeners {
    entries: Vec<(ListenerId, ContextHandler)>,
}

/// Per-session registry of context listeners, keyed by channel identity.
pub struct ContextListenerRegistry {
    transport: Arc<dyn ConnectionTransport>,
    channels: DashMap<ChannelId, Arc<Mutex<ChannelListeners>>>,
    index: DashMap<ListenerId, ChannelId>,
}

impl ContextListenerRegistry {
    /// Create a registry issuing subscription calls over `transport`.
    pub fn new(transport: Arc<dyn ConnectionTransport>) -> Self {
        Self {
            transport,
            channels: DashMap::new(),
            index: DashMap::new(),
        }
    }

    fn slot(&self, channel_id: &str) -> Arc<Mutex<ChannelListeners>> {
        self.channels
            .entry(channel_id.to_string())
            .or_default()
            .clone()
    }

    /// Register `handler` for context broadcasts on `channel_id`.
    ///
    /// The first registration for a channel issues exactly one runtime
    /// subscribe call and resolves once the runtime acknowledges it
    /// ([`SubscribeOutcome::Acknowledged`]); later registrations reuse the
    /// existing subscription and resolve immediately
    /// ([`SubscribeOutcome::Piggybacked`]).
    ///
    /// # Errors
    ///
    /// A failed runtime subscribe propagates unchanged; the handler is not
    /// registered in that case.
    pub async fn subscribe(
        &self,
        channel_id: &str,
        handler: ContextHandler,
    ) -> Result<(ListenerId, SubscribeOutcome), TransportError> {
        let slot = self.slot(channel_id);
        // The check / insert / runtime-call sequence must not interleave
        // with another subscribe or unsubscribe for the same channel.
        let mut listeners = slot.lock().await;

        let outcome = if listeners.entries.is_empty() {
            self.transport.add_context_listener(channel_id).await?;
            SubscribeOutcome::Acknowledged
        } else {
            SubscribeOutcome::Piggybacked
        };

        let id = ListenerId::new();
        listeners.entries.push((id, handler));
        self.index.insert(id, channel_id.to_string());
        debug!(channel = channel_id, listener = %id, ?outcome, "context listener registered");
        Ok((id, outcome))
    }

    /// Remove exactly the listener named by `id`.
    ///
    /// Removing the last listener for a channel issues one runtime
    /// teardown. An unknown token removes nothing, issues no runtime call,
    /// and returns `Ok(false)`.
    pub async fn unsubscribe(&self, id: ListenerId) -> Result<bool, TransportError> {
        let Some((_, channel_id)) = self.index.remove(&id) else {
            return Ok(false);
        };

        let slot = self.slot(&channel_id);
        let mut listeners = slot.lock().await;
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        let removed = listeners.entries.len() < before;

        if removed && listeners.entries.is_empty() {
            self.transport.remove_context_listener(&channel_id).await?;
            debug!(channel = %channel_id, "context subscription torn down");
        }

        Ok(removed)
    }

    /// Remove every listener registered for `channel_id`.
    ///
    /// Legacy removal semantics: all local listeners for the channel are
    /// dropped and one runtime teardown is issued unconditionally, even if
    /// none were registered. Returns how many were removed.
    pub async fn unsubscribe_channel(&self, channel_id: &str) -> Result<usize, TransportError> {
        let slot = self.channels.get(channel_id).map(|entry| Arc::clone(entry.value()));
        let removed = match slot {
            Some(slot) => {
                let mut listeners = slot.lock().await;
                let drained: Vec<_> = listeners.entries.drain(..).collect();
                for (id, _) in &drained {
                    self.index.remove(id);
                }
                drained.len()
            }
            None => 0,
        };

        self.transport.remove_context_listener(channel_id).await?;
        debug!(channel = channel_id, removed, "all context listeners removed");
        Ok(removed)
    }

    /// Invoke every handler registered for `channel_id`, in registration
    /// order.
    pub async fn notify(&self, channel_id: &str, context: &Context) {
        let Some(slot) = self.channels.get(channel_id).map(|entry| Arc::clone(entry.value()))
        else {
            return;
        };

        let handlers: Vec<ContextHandler> = {
            let listeners = slot.lock().await;
            listeners
                .entries
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };

        debug!(channel = channel_id, handlers = handlers.len(), "dispatching context broadcast");
        for handler in handlers {
            handler(context);
        }
    }

    /// Number of listeners currently registered for `channel_id`.
    pub async fn listener_count(&self, channel_id: &str) -> usize {
        match self.channels.get(channel_id).map(|entry| Arc::clone(entry.value())) {
            Some(slot) => slot.lock().await.entries.len(),
            None => 0,
        }
    }
}
