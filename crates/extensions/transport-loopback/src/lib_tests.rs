use super::*;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use fdc3_client::DesktopSession;
use fdc3_config::ClientConfig;

fn transport() -> Arc<LoopbackTransport> {
    Arc::new(LoopbackTransport::new(Identity::new("local-app")))
}

async fn wait_until(cond: impl Fn() -> bool) {
    for _ in 0..100 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 1s");
}

#[tokio::test]
async fn test_join_adds_the_local_window() {
    let transport = transport();

    transport.join_channel("red", None).await.unwrap();

    let members = transport.channel_members("red").await.unwrap();
    assert_eq!(members, vec![Identity::new("local-app")]);
}

#[tokio::test]
async fn test_join_is_idempotent_per_window() {
    let transport = transport();

    transport.join_channel("red", None).await.unwrap();
    transport.join_channel("red", None).await.unwrap();

    assert_eq!(transport.channel_members("red").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_join_raises_window_added_event() {
    let transport = transport();
    let mut notifications = transport.notifications();

    transport
        .join_channel("red", Some(Identity::new("viewer")))
        .await
        .unwrap();

    let notification = tokio::time::timeout(Duration::from_secs(1), notifications.recv())
        .await
        .unwrap()
        .unwrap();
    match notification {
        RuntimeNotification::Event(event) => {
            assert_eq!(event.channel_id, "red");
            assert_eq!(event.event_type, ChannelEventType::WindowAdded);
            assert_eq!(event.identity.uuid, "viewer");
        }
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[tokio::test]
async fn test_current_context_is_none_until_broadcast() {
    let transport = transport();

    assert!(transport.current_context("red").await.unwrap().is_none());

    let ctx = Context::new("fdc3.instrument").with_id("ticker", "AAPL");
    transport.broadcast("red", ctx.clone()).await.unwrap();

    assert_eq!(transport.current_context("red").await.unwrap(), Some(ctx));
}

#[tokio::test]
async fn test_last_leave_clears_current_context() {
    let transport = transport();

    transport.join_channel("red", None).await.unwrap();
    transport
        .join_channel("red", Some(Identity::new("viewer")))
        .await
        .unwrap();
    transport
        .broadcast("red", Context::new("fdc3.instrument"))
        .await
        .unwrap();

    transport.leave_channel("red", None).await.unwrap();
    // One window left: context survives.
    assert!(transport.current_context("red").await.unwrap().is_some());

    transport
        .leave_channel("red", Some(Identity::new("viewer")))
        .await
        .unwrap();
    assert!(transport.current_context("red").await.unwrap().is_none());
    assert!(transport.channel_members("red").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_leave_of_non_member_raises_no_event() {
    let transport = transport();
    let mut notifications = transport.notifications();

    transport.leave_channel("red", None).await.unwrap();

    let result = tokio::time::timeout(Duration::from_millis(100), notifications.recv()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_listener_calls_are_recorded() {
    let transport = transport();

    transport.add_context_listener("red").await.unwrap();
    transport.add_context_listener("red").await.unwrap();
    transport.remove_context_listener("red").await.unwrap();
    transport
        .add_event_listener("red", ChannelEventType::WindowAdded)
        .await
        .unwrap();

    assert_eq!(transport.context_listener_adds("red"), 2);
    assert_eq!(transport.context_listener_removes("red"), 1);
    assert_eq!(transport.event_listener_adds("red", ChannelEventType::WindowAdded), 1);
    assert_eq!(transport.event_listener_removes("red", ChannelEventType::WindowAdded), 0);
}

#[tokio::test]
async fn test_session_roundtrip_over_loopback() {
    let transport = transport();
    let mut config = ClientConfig::default();
    config.app.uuid = "viewer".to_string();
    let session = DesktopSession::connect(transport.clone(), config);

    let channel = session.system_channel("red");
    channel.join(None).await.unwrap();

    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    channel
        .add_context_listener(move |ctx| sink.lock().push(ctx.context_type.clone()))
        .await
        .unwrap();
    assert_eq!(transport.context_listener_adds("red"), 1);

    channel
        .broadcast(Context::new("fdc3.instrument"))
        .await
        .unwrap();

    wait_until(|| !received.lock().is_empty()).await;
    assert_eq!(*received.lock(), vec!["fdc3.instrument".to_string()]);

    let current = channel.current_context().await.unwrap().unwrap();
    assert_eq!(current.context_type, "fdc3.instrument");
}

#[tokio::test]
async fn test_membership_events_flow_through_session() {
    let transport = transport();
    let mut config = ClientConfig::default();
    config.app.uuid = "viewer".to_string();
    let session = DesktopSession::connect(transport.clone(), config);

    let channel = session.system_channel("red");
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    channel
        .add_event_listener(ChannelEventType::WindowAdded, move |event| {
            sink.lock().push(event.identity.uuid.clone())
        })
        .await
        .unwrap();

    channel.join(Some(Identity::new("blotter"))).await.unwrap();

    wait_until(|| !received.lock().is_empty()).await;
    assert_eq!(*received.lock(), vec!["blotter".to_string()]);
}
