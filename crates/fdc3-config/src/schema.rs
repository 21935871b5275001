//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub listeners: ListenersConfig,
}

impl ClientConfig {
    /// Validate the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the application uuid is empty or the runtime
    /// endpoint is not a parseable URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.uuid.is_empty() {
            return Err(ConfigError::MissingField("app.uuid".to_string()));
        }

        url::Url::parse(&self.runtime.endpoint).map_err(|e| ConfigError::InvalidValue {
            field: "runtime.endpoint".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }
}

/// Desktop runtime connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Endpoint of the host runtime process.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Timeout applied to runtime requests.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "ws://127.0.0.1:9696".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Identity this client presents to the runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application uuid (required).
    #[serde(default)]
    pub uuid: String,

    /// Optional window name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Listener behavior switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListenersConfig {
    /// Restore the legacy removal behavior where removing one context
    /// listener drops every listener registered for that channel.
    #[serde(default)]
    pub legacy_channel_removal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.runtime.endpoint, "ws://127.0.0.1:9696");
        assert_eq!(config.runtime.timeout_seconds, 30);
        assert!(config.app.uuid.is_empty());
        assert!(!config.listeners.legacy_channel_removal);
    }

    #[test]
    fn test_validate_rejects_empty_uuid() {
        let config = ClientConfig::default();
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = ClientConfig::default();
        config.app.uuid = "my-app".to_string();
        config.runtime.endpoint = "not a url".to_string();
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let mut config = ClientConfig::default();
        config.app.uuid = "my-app".to_string();
        assert!(config.validate().is_ok());
    }
}
