//! Test doubles shared by the crate's unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use fdc3_protocols::{
    ChannelEventType, ChannelId, ConnectionTransport, Context, Identity, RuntimeNotification,
    TransportError,
};

/// Transport double recording every runtime call.
///
/// Request methods answer from in-memory state; `push` feeds the
/// notification stream the way a runtime would.
pub(crate) struct RecordingTransport {
    context_adds: DashMap<ChannelId, usize>,
    context_removes: DashMap<ChannelId, usize>,
    event_adds: DashMap<(ChannelId, ChannelEventType), usize>,
    event_removes: DashMap<(ChannelId, ChannelEventType), usize>,
    joins: Mutex<Vec<(ChannelId, Option<Identity>)>>,
    leaves: Mutex<Vec<(ChannelId, Option<Identity>)>>,
    broadcasts: Mutex<Vec<(ChannelId, Context)>>,
    current: DashMap<ChannelId, Context>,
    members: DashMap<ChannelId, Vec<Identity>>,
    fail_context_add: AtomicBool,
    notify_tx: broadcast::Sender<RuntimeNotification>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        let (notify_tx, _) = broadcast::channel(64);
        Arc::new(Self {
            context_adds: DashMap::new(),
            context_removes: DashMap::new(),
            event_adds: DashMap::new(),
            event_removes: DashMap::new(),
            joins: Mutex::new(Vec::new()),
            leaves: Mutex::new(Vec::new()),
            broadcasts: Mutex::new(Vec::new()),
            current: DashMap::new(),
            members: DashMap::new(),
            fail_context_add: AtomicBool::new(false),
            notify_tx,
        })
    }

    /// Feed a notification into the stream, as the runtime would.
    pub fn push(&self, notification: RuntimeNotification) {
        let _ = self.notify_tx.send(notification);
    }

    /// Make subsequent `add_context_listener` calls fail.
    pub fn fail_context_adds(&self) {
        self.fail_context_add.store(true, Ordering::SeqCst);
    }

    pub fn set_members(&self, channel_id: &str, members: Vec<Identity>) {
        self.members.insert(channel_id.to_string(), members);
    }

    pub fn context_adds_for(&self, channel_id: &str) -> usize {
        self.context_adds.get(channel_id).map(|c| *c).unwrap_or(0)
    }

    pub fn context_removes_for(&self, channel_id: &str) -> usize {
        self.context_removes.get(channel_id).map(|c| *c).unwrap_or(0)
    }

    pub fn event_adds_for(&self, channel_id: &str, event_type: ChannelEventType) -> usize {
        self.event_adds
            .get(&(channel_id.to_string(), event_type))
            .map(|c| *c)
            .unwrap_or(0)
    }

    pub fn event_removes_for(&self, channel_id: &str, event_type: ChannelEventType) -> usize {
        self.event_removes
            .get(&(channel_id.to_string(), event_type))
            .map(|c| *c)
            .unwrap_or(0)
    }

    pub fn joins(&self) -> Vec<(ChannelId, Option<Identity>)> {
        self.joins.lock().clone()
    }

    pub fn leaves(&self) -> Vec<(ChannelId, Option<Identity>)> {
        self.leaves.lock().clone()
    }

    pub fn broadcasts(&self) -> Vec<(ChannelId, Context)> {
        self.broadcasts.lock().clone()
    }
}

#[async_trait]
impl ConnectionTransport for RecordingTransport {
    async fn channel_members(&self, channel_id: &str) -> Result<Vec<Identity>, TransportError> {
        Ok(self.members.get(channel_id).map(|m| m.clone()).unwrap_or_default())
    }

    async fn current_context(&self, channel_id: &str) -> Result<Option<Context>, TransportError> {
        Ok(self.current.get(channel_id).map(|c| c.clone()))
    }

    async fn join_channel(
        &self,
        channel_id: &str,
        identity: Option<Identity>,
    ) -> Result<(), TransportError> {
        self.joins.lock().push((channel_id.to_string(), identity));
        Ok(())
    }

    async fn leave_channel(
        &self,
        channel_id: &str,
        identity: Option<Identity>,
    ) -> Result<(), TransportError> {
        self.leaves.lock().push((channel_id.to_string(), identity));
        Ok(())
    }

    async fn broadcast(&self, channel_id: &str, context: Context) -> Result<(), TransportError> {
        self.current.insert(channel_id.to_string(), context.clone());
        self.broadcasts.lock().push((channel_id.to_string(), context));
        Ok(())
    }

    async fn add_context_listener(&self, channel_id: &str) -> Result<(), TransportError> {
        if self.fail_context_add.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected("context listeners unavailable".to_string()));
        }
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

/// Poll `cond` until it holds or a second has passed.
pub(crate) async fn wait_until(cond: impl Fn() -> bool) {
    for _ in 0..100 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 1s");
}
