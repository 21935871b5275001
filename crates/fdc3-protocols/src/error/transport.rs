//! Transport errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Runtime disconnected")]
    Disconnected,

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rejected by runtime: {0}")]
    Rejected(String),
}
