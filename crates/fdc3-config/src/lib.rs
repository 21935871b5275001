//! # FDC3 Config
//!
//! Configuration management for the FDC3 client SDK.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{AppConfig, ClientConfig, ListenersConfig, RuntimeConfig};
