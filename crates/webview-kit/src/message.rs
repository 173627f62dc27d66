// SPDX-License-Identifier: MIT OR Apache-2.0
//! Envelope for messages posted by embedded content to the native host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named message posted by the embedded content.
///
/// The content side addresses a handler by `name` and attaches an
/// arbitrary JSON `body`. Hosts dispatch on the name and decode the body
/// with their own domain contract; this envelope stays schema-free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMessage {
    /// Handler name the content posted to.
    pub name: String,
    /// Attached JSON payload, `Value::Null` when the message carries none.
    #[serde(default)]
    pub body: Value,
}

impl ContentMessage {
    /// Build a message with a payload.
    pub fn new(name: impl Into<String>, body: Value) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    /// Build a payload-free message.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Value::Null,
        }
    }
}
