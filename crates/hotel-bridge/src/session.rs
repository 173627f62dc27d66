// SPDX-License-Identifier: MIT OR Apache-2.0
//! Single-task event loop wrapping a [`HostBridge`].

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info};
use uuid::Uuid;

use hsb_core::SortOption;
use webview_kit::{CancelToken, SurfaceEvent, WebSurface};

use crate::config::BridgeConfig;
use crate::controller::HostBridge;
use crate::effect::UiEffect;
use crate::error::BridgeError;

/// A UI-side call, marshaled onto the session task before it touches
/// bridge state.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Start a search (see [`HostBridge::begin_search`]).
    BeginSearch {
        /// Free-text location query.
        location: String,
        /// Check-in date.
        date_start: NaiveDate,
        /// Check-out date.
        date_end: NaiveDate,
    },

    /// Apply a sort order.
    SetSort(SortOption),

    /// Apply a sort order picked by display label.
    SetSortLabel(String),

    /// Apply price bounds (0 = unbounded).
    SetPriceRange {
        /// Lower bound in dollars.
        min: u32,
        /// Upper bound in dollars.
        max: u32,
    },
}

/// A running bridge session.
///
/// All bridge state lives inside one spawned task that serializes
/// commands, content messages, and load failures. Dropping the session
/// cancels that task.
pub struct BridgeSession {
    /// Send half for UI-side calls.
    pub commands: mpsc::Sender<HostCommand>,

    /// Stream of effects for the shell to render.
    pub effects: ReceiverStream<UiEffect>,

    /// Handle to the session task.
    pub wait: tokio::task::JoinHandle<Result<(), BridgeError>>,

    /// Cancel token; signals the session task to stop.
    pub cancel: CancelToken,
}

impl Drop for BridgeSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl BridgeSession {
    /// Spawn the session loop over `surface`, consuming the surface's
    /// event receiver.
    pub fn start(
        surface: Arc<dyn WebSurface>,
        mut surface_events: mpsc::Receiver<SurfaceEvent>,
        config: BridgeConfig,
    ) -> Self {
        // tokio channels assert capacity > 0.
        let capacity = config.channel_capacity.max(1);
        let (command_tx, mut command_rx) = mpsc::channel::<HostCommand>(capacity);
        let (effect_tx, effect_rx) = mpsc::channel::<UiEffect>(capacity);
        let cancel = CancelToken::new();
        let cancel_clone = cancel.clone();
        let session_id = Uuid::new_v4();
        let mut bridge = HostBridge::new(surface, effect_tx, config);

        let wait = tokio::spawn(async move {
            info!(target: "hotel_bridge", "session {session_id} started");
            loop {
                tokio::select! {
                    _ = cancel_clone.cancelled() => {
                        info!(target: "hotel_bridge", "session {session_id} cancelled");
                        return Ok(());
                    }

                    command = command_rx.recv() => {
                        match command {
                            Some(HostCommand::BeginSearch { location, date_start, date_end }) => {
                                bridge.begin_search(location, date_start, date_end).await?;
                            }
                            Some(HostCommand::SetSort(option)) => {
                                bridge.set_sort(option).await?;
                            }
                            Some(HostCommand::SetSortLabel(label)) => {
                                bridge.set_sort_by_label(&label).await?;
                            }
                            Some(HostCommand::SetPriceRange { min, max }) => {
                                bridge.set_price_range(min, max).await?;
                            }
                            None => {
                                debug!(target: "hotel_bridge", "command channel closed; session {session_id} stopping");
                                return Ok(());
                            }
                        }
                    }

                    event = surface_events.recv() => {
                        match event {
                            Some(SurfaceEvent::Message(message)) => {
                                bridge.handle_message(&message).await?;
                            }
                            Some(SurfaceEvent::LoadFailed { reason }) => {
                                bridge.handle_load_failure(&reason).await?;
                            }
                            None => {
                                debug!(target: "hotel_bridge", "surface gone; session {session_id} stopping");
                                return Ok(());
                            }
                        }
                    }
                }
            }
        });

        Self {
            commands: command_tx,
            effects: ReceiverStream::new(effect_rx),
            wait,
            cancel,
        }
    }

    /// Consume the session and return its constituent parts, disabling
    /// the automatic cancel-on-drop behavior.
    #[allow(clippy::type_complexity)]
    #[allow(unsafe_code)]
    pub fn into_parts(
        self,
    ) -> (
        mpsc::Sender<HostCommand>,
        ReceiverStream<UiEffect>,
        tokio::task::JoinHandle<Result<(), BridgeError>>,
        CancelToken,
    ) {
        // SAFETY: We need to move fields out of a Drop type.
        // We use ManuallyDrop to prevent the destructor from running.
        let this = std::mem::ManuallyDrop::new(self);
        unsafe {
            let commands = std::ptr::read(&this.commands);
            let effects = std::ptr::read(&this.effects);
            let wait = std::ptr::read(&this.wait);
            let cancel = std::ptr::read(&this.cancel);
            (commands, effects, wait, cancel)
        }
    }
}
