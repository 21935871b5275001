//! Channel identity types.
//!
//! A channel is a named context-sharing scope that windows can join. The
//! channel itself owns no state beyond its identity - current context and
//! membership live in the desktop runtime.

use serde::{Deserialize, Serialize};

/// Channel unique identifier type.
pub type ChannelId = String;

/// The kind of channel a [`ChannelId`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    /// A runtime-defined channel (e.g. the colored "user" channels).
    System,
    /// A channel created on demand by an application.
    App,
    /// A channel private to a pair of applications.
    Private,
}

/// A window/application identity within the desktop runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Application uuid as assigned by the runtime.
    pub uuid: String,
    /// Optional window name within the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Identity {
    /// Create an identity for an application's main window.
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: None,
        }
    }

    /// Create an identity for a named window of an application.
    pub fn with_name(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: Some(name.into()),
        }
    }
}
