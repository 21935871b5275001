//! # FDC3
//!
//! Client SDK for the FDC3 desktop-interoperability protocol: discover,
//! join, and exchange context over named channels hosted by a desktop
//! runtime.
//!
//! The runtime connection is abstracted behind
//! [`ConnectionTransport`]; the SDK contributes channel operations,
//! listener registries that deduplicate runtime-level subscriptions, and
//! per-session state isolation. An in-process [`LoopbackTransport`] is
//! included for tests and offline development.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use fdc3::{ClientConfig, Context, DesktopSession, Identity, LoopbackTransport};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), fdc3::TransportError> {
//! let transport = Arc::new(LoopbackTransport::new(Identity::new("my-app")));
//! let mut config = ClientConfig::default();
//! config.app.uuid = "my-app".to_string();
//!
//! let session = DesktopSession::connect(transport, config);
//! let channel = session.system_channel("red");
//!
//! channel.join(None).await?;
//! let handle = channel
//!     .add_context_listener(|ctx| println!("context: {}", ctx.context_type))
//!     .await?;
//! channel
//!     .broadcast(Context::new("fdc3.instrument").with_id("ticker", "AAPL"))
//!     .await?;
//! channel.remove_context_listener(&handle).await?;
//! # Ok(())
//! # }
//! ```

pub use fdc3_client as client;
pub use fdc3_config as config;
pub use fdc3_protocols as protocols;
pub use fdc3_transport_loopback as loopback;

pub use fdc3_client::{
    Channel, ContextListenerHandle, DesktopSession, EventListenerHandle, ListenerId,
    SubscribeOutcome,
};
pub use fdc3_config::{ClientConfig, ConfigError, ConfigLoader};
pub use fdc3_protocols::{
    ChannelEvent, ChannelEventType, ChannelId, ChannelType, ConnectionTransport, Context,
    Identity, RuntimeNotification, TransportError,
};
pub use fdc3_transport_loopback::LoopbackTransport;
