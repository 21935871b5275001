//! Desktop session.
//!
//! The session owns the transport handle and the listener registries, and
//! pumps notifications pushed by the runtime into them. Registries are
//! per-session state: sessions in the same process never share listeners.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use fdc3_config::ClientConfig;
use fdc3_protocols::{
    ChannelId, ChannelType, ConnectionTransport, Identity, RuntimeNotification,
};

use crate::channel::Channel;
use crate::registry::{ContextListenerRegistry, EventListenerRegistry};

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

/// A client session against a desktop runtime.
pub struct DesktopSession {
    transport: Arc<dyn ConnectionTransport>,
    contexts: Arc<ContextListenerRegistry>,
    events: Arc<EventListenerRegistry>,
    config: ClientConfig,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl DesktopSession {
    /// Connect over the given transport and start dispatching runtime
    /// notifications to this session's listeners.
    pub fn connect(transport: Arc<dyn ConnectionTransport>, config: ClientConfig) -> Arc<Self> {
        let contexts = Arc::new(ContextListenerRegistry::new(Arc::clone(&transport)));
        let events = Arc::new(EventListenerRegistry::new(Arc::clone(&transport)));

        let notifications = transport.notifications();
        let pump = tokio::spawn(pump_notifications(
            notifications,
            Arc::clone(&contexts),
            Arc::clone(&events),
        ));

        info!(app = %config.app.uuid, "desktop session connected");
        Arc::new(Self {
            transport,
            contexts,
            events,
            config,
            pump: Mutex::new(Some(pump)),
        })
    }

    /// The identity this session presents to the runtime.
    pub fn identity(&self) -> Identity {
        Identity {
            uuid: self.config.app.uuid.clone(),
            name: self.config.app.name.clone(),
        }
    }

    /// The session's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A handle to the channel with the given identity and kind.
    pub fn channel(&self, id: impl Into<ChannelId>, channel_type: ChannelType) -> Channel {
        Channel::new(
            id.into(),
            channel_type,
            Arc::clone(&self.transport),
            Arc::clone(&self.contexts),
            Arc::clone(&self.events),
            self.config.listeners.legacy_channel_removal,
        )
    }

    /// A handle to a runtime-defined system channel.
    pub fn system_channel(&self, id: impl Into<ChannelId>) -> Channel {
        self.channel(id, ChannelType::System)
    }

    /// A handle to an application-created channel.
    pub fn app_channel(&self, id: impl Into<ChannelId>) -> Channel {
        self.channel(id, ChannelType::App)
    }

    /// Stop dispatching runtime notifications.
    ///
    /// Registered listeners stay in place but no longer fire. Dropping the
    /// session has the same effect.
    pub fn disconnect(&self) {
        if let Some(pump) = self.pump.lock().take() {
            pump.abort();
            info!("desktop session disconnected");
        }
    }
}

impl Drop for DesktopSession {
    fn drop(&mut self) {
        self.disconnect();
    }
}

async fn pump_notifications(
    mut notifications: broadcast::Receiver<RuntimeNotification>,
    contexts: Arc<ContextListenerRegistry>,
    events: Arc<EventListenerRegistry>,
) {
    loop {
        match notifications.recv().await {
            Ok(RuntimeNotification::ContextBroadcast {
                channel_id,
                context,
            }) => {
                contexts.notify(&channel_id, &context).await;
            }
            Ok(RuntimeNotification::Event(event)) => {
                events.notify(&event).await;
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "runtime notifications dropped");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("runtime notification stream closed");
                break;
            }
        }
    }
}
