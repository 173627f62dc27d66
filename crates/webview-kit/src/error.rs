// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error type shared by surface implementations and the script codec.

use thiserror::Error;

/// Errors produced while driving an embedded web surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The surface could not start loading the requested URL.
    #[error("content load failed: {0}")]
    Load(String),

    /// The content rejected or failed to evaluate a script.
    #[error("script evaluation failed: {0}")]
    Eval(String),

    /// The surface has been torn down and accepts no further work.
    #[error("surface disposed")]
    Disposed,

    /// A script call was built with a function name that is not a valid
    /// JavaScript identifier.
    #[error("invalid call name: {0:?}")]
    InvalidCallName(String),

    /// A call argument could not be serialized to JSON.
    #[error("argument serialization failed")]
    Serialize(#[source] serde_json::Error),
}
