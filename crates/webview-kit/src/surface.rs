// SPDX-License-Identifier: MIT OR Apache-2.0
//! The async seam between the host and an embedded web view.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::SurfaceError;
use crate::message::ContentMessage;

/// Asynchronous handle to an embedded web view.
///
/// Real implementations wrap a platform web view; tests use an in-process
/// double. Both report content-originated traffic through the event
/// channel created by [`surface_channel`], never through return values:
/// a load that fails after navigation started surfaces as
/// [`SurfaceEvent::LoadFailed`], not as an `Err` from [`load`](WebSurface::load).
#[async_trait]
pub trait WebSurface: Send + Sync {
    /// Begin loading `url` in the embedded view.
    ///
    /// An `Err` here means the surface could not even start the
    /// navigation (for example, it was already disposed).
    async fn load(&self, url: &str) -> Result<(), SurfaceError>;

    /// Evaluate a script string inside the loaded content.
    async fn eval(&self, script: &str) -> Result<(), SurfaceError>;
}

/// Things a surface reports back to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The embedded content posted a named message.
    Message(ContentMessage),
    /// Navigation or rendering failed before the page became interactive.
    LoadFailed {
        /// Human-readable failure description from the platform layer.
        reason: String,
    },
}

/// Create the event channel a surface implementation feeds.
///
/// The sender half goes to the surface, the receiver half to the host's
/// event loop.
pub fn surface_channel(capacity: usize) -> (mpsc::Sender<SurfaceEvent>, mpsc::Receiver<SurfaceEvent>) {
    mpsc::channel(capacity)
}
