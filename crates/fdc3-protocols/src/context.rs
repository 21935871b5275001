//! Context payloads.
//!
//! FDC3 contexts are type-discriminated JSON objects exchanged between
//! applications joined to the same channel. The SDK treats them as opaque
//! beyond the standard envelope fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// A context payload broadcast on a channel.
///
/// Every context carries a `type` string (e.g. `"fdc3.instrument"`), an
/// optional display `name`, and an optional `id` map of equivalent
/// identifiers. Any further fields are preserved verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// The context type discriminator.
    #[serde(rename = "type")]
    pub context_type: String,

    /// Human-readable display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Map of equivalent identifiers (e.g. `{"ticker": "AAPL"}`).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub id: HashMap<String, String>,

    /// Type-specific fields, preserved as-is.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Context {
    /// Create a context of the given type with no further fields.
    pub fn new(context_type: impl Into<String>) -> Self {
        Self {
            context_type: context_type.into(),
            name: None,
            id: HashMap::new(),
            extra: HashMap::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an identifier under the given scheme (e.g. `"ticker"`).
    pub fn with_id(mut self, scheme: impl Into<String>, value: impl Into<String>) -> Self {
        self.id.insert(scheme.into(), value.into());
        self
    }

    /// Add a type-specific field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
