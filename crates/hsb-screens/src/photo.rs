// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cancellable photo fetching for the detail surface.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;
use webview_kit::CancelToken;

/// Fetches photo bytes for a URL.
///
/// The error type is deliberately transport-free so test doubles do not
/// drag an HTTP stack into every screen test.
#[async_trait]
pub trait PhotoFetcher: Send + Sync {
    /// Fetch the photo at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PhotoError>;
}

/// Errors from the photo fetch boundary.
///
/// These never propagate past the owning screen; they collapse into its
/// empty photo state.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// The request could not be completed.
    #[error("photo request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("photo response status {0}")]
    Status(u16),

    /// The fetch was cancelled before it finished.
    #[error("photo fetch cancelled")]
    Cancelled,
}

/// [`PhotoFetcher`] backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpPhotoFetcher {
    client: reqwest::Client,
}

impl HttpPhotoFetcher {
    /// Build a fetcher with its own client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhotoFetcher for HttpPhotoFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PhotoError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| PhotoError::Request(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::Status(status.as_u16()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| PhotoError::Request(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// An in-flight photo fetch.
///
/// Dropping the load cancels the fetch, so a discarded screen can never
/// receive a stale completion.
pub struct PhotoLoad {
    /// The fetch outcome, delivered once.
    pub result: oneshot::Receiver<Result<Vec<u8>, PhotoError>>,

    /// Handle to the background fetch task.
    pub wait: tokio::task::JoinHandle<()>,

    /// Cancel token for the fetch.
    pub cancel: CancelToken,
}

impl Drop for PhotoLoad {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl PhotoLoad {
    /// Start fetching `url` in the background.
    pub fn start(fetcher: Arc<dyn PhotoFetcher>, url: impl Into<String>) -> Self {
        let (result_tx, result_rx) = oneshot::channel();
        let cancel = CancelToken::new();
        let cancel_clone = cancel.clone();
        let url = url.into();

        let wait = tokio::spawn(async move {
            tokio::select! {
                _ = cancel_clone.cancelled() => {
                    let _ = result_tx.send(Err(PhotoError::Cancelled));
                }
                fetched = fetcher.fetch(&url) => {
                    let _ = result_tx.send(fetched);
                }
            }
        });

        Self {
            result: result_rx,
            wait,
            cancel,
        }
    }

    /// Wait for the fetch outcome without consuming the handle.
    pub async fn outcome(&mut self) -> Result<Vec<u8>, PhotoError> {
        match (&mut self.result).await {
            Ok(outcome) => outcome,
            // Sender dropped: the task was torn down before it reported.
            Err(_) => Err(PhotoError::Cancelled),
        }
    }
}
