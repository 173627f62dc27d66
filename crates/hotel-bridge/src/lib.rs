// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! hotel-bridge
#![deny(unsafe_code)]
//!
//! Host bridge controller for embedded hotel search content.
//!
//! # Layers
//!
//! - [`HostBridge`] -- the controller itself: owns the surface handle and
//!   mirrored state, sends `JSAPI` calls, turns inbound events into
//!   [`UiEffect`]s. Direct use is mostly for tests.
//! - [`BridgeSession`] -- spawns the controller inside a single event-loop
//!   task, marshaling UI calls ([`HostCommand`]) and content traffic onto
//!   that one task. This is the intended integration surface.

pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod session;
pub mod state;

pub use config::BridgeConfig;
pub use controller::HostBridge;
pub use effect::{LOAD_FAILED_DISMISS, LOAD_FAILED_MESSAGE, LOAD_FAILED_TITLE, UiEffect, results_title};
pub use error::BridgeError;
pub use session::{BridgeSession, HostCommand};
pub use state::BridgeState;
