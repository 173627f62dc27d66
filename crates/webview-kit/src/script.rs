// SPDX-License-Identifier: MIT OR Apache-2.0
//! Codec for `namespace.function(argument)` invocation scripts.
//!
//! The host drives embedded content by evaluating short call scripts
//! against a well-known namespace object. Rendering is strict about
//! function names so a malformed call never reaches the content side;
//! parsing is the inverse and exists mainly for test doubles that need
//! to decode what the host sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SurfaceError;

/// A single function invocation to evaluate inside embedded content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptCall {
    /// Function name, resolved against the caller-supplied namespace.
    pub function: String,
    /// Optional single JSON argument.
    pub argument: Option<Value>,
}

impl ScriptCall {
    /// Build an argument-free call.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            argument: None,
        }
    }

    /// Attach the call's single JSON argument.
    pub fn with_argument(mut self, argument: Value) -> Self {
        self.argument = Some(argument);
        self
    }

    /// Render the call as an evaluatable script string.
    ///
    /// The function name must be a plain identifier; anything else is
    /// rejected before it can reach the content side.
    pub fn render(&self, namespace: &str) -> Result<String, SurfaceError> {
        if !is_identifier(&self.function) {
            return Err(SurfaceError::InvalidCallName(self.function.clone()));
        }
        let rendered = match &self.argument {
            Some(argument) => {
                let encoded = serde_json::to_string(argument).map_err(SurfaceError::Serialize)?;
                format!("{namespace}.{}({encoded})", self.function)
            }
            None => format!("{namespace}.{}()", self.function),
        };
        Ok(rendered)
    }

    /// Parse a script produced by [`render`](ScriptCall::render).
    ///
    /// Returns `None` for anything that is not a single well-formed call
    /// against `namespace`.
    pub fn parse(namespace: &str, script: &str) -> Option<Self> {
        let rest = script.strip_prefix(namespace)?.strip_prefix('.')?;
        let open = rest.find('(')?;
        let (function, tail) = rest.split_at(open);
        if !is_identifier(function) {
            return None;
        }
        let inner = tail.strip_prefix('(')?.strip_suffix(')')?;
        let argument = match inner.trim() {
            "" => None,
            trimmed => Some(serde_json::from_str(trimmed).ok()?),
        };
        Some(Self {
            function: function.to_string(),
            argument,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
