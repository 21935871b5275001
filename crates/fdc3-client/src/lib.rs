//! # FDC3 Client
//!
//! Client-side channel operations for an FDC3 desktop runtime.
//!
//! ## Components
//!
//! - [`DesktopSession`] - Owns the transport connection and the listener
//!   registries, and dispatches runtime notifications to local callbacks
//! - [`Channel`] - Facade for a single channel's operations
//! - [`ContextListenerRegistry`] / [`EventListenerRegistry`] - Deduplicate
//!   runtime-level subscriptions while tracking local callbacks
//!
//! All registry state is owned by the session - there are no process-wide
//! statics, so multiple sessions in one process stay isolated.

pub mod channel;
pub mod listener;
pub mod registry;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use channel::Channel;
pub use listener::{
    ContextHandler, ContextListenerHandle, EventHandler, EventListenerHandle, ListenerId,
    SubscribeOutcome,
};
pub use registry::{ContextListenerRegistry, EventListenerRegistry};
pub use session::DesktopSession;
