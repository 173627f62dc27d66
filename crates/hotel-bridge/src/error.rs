// SPDX-License-Identifier: MIT OR Apache-2.0
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("contract error: {0}")]
    Contract(#[from] hsb_core::ContractError),

    #[error("surface error: {0}")]
    Surface(#[from] webview_kit::SurfaceError),

    #[error("effect receiver dropped")]
    EffectsClosed,
}
