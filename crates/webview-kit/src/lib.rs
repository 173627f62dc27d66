// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! webview-kit
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Value-based transport seam between a native host and embedded web
//! content. The host drives the content by evaluating small invocation
//! scripts; the content answers by posting named JSON messages back.
//! Everything domain-specific sits in crates layered above this one.

pub mod cancel;
pub mod error;
pub mod message;
pub mod script;
pub mod surface;

pub use cancel::CancelToken;
pub use error::SurfaceError;
pub use message::ContentMessage;
pub use script::ScriptCall;
pub use surface::{surface_channel, SurfaceEvent, WebSurface};
