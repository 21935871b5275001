//! # FDC3 Protocols
//!
//! Core protocol definitions for the FDC3 client SDK.
//! Contains the data model and the transport trait - no runtime bindings.
//!
//! ## Core Types
//!
//! - [`Context`] - Payload broadcast between applications on a channel
//! - [`ChannelType`] / [`ChannelId`] - Channel identity
//! - [`Identity`] - A window/application identity within the desktop runtime
//! - [`ChannelEvent`] - Membership events raised by the runtime
//! - [`ConnectionTransport`] - Trait abstracting the desktop runtime connection

pub mod channel;
pub mod context;
pub mod error;
pub mod events;
pub mod transport;

pub use channel::{ChannelId, ChannelType, Identity};
pub use context::Context;
pub use error::TransportError;
pub use events::{ChannelEvent, ChannelEventType};
pub use transport::{ConnectionTransport, RuntimeNotification};
