// SPDX-License-Identifier: MIT OR Apache-2.0
//! The detail surface model: defensive field projection plus photo state.

use std::sync::Arc;

use tracing::debug;

use hsb_core::{HotelCard, HotelSelection};

use crate::photo::{PhotoFetcher, PhotoLoad};

/// What the photo area of the detail surface shows.
#[derive(Debug, PartialEq)]
pub enum PhotoState {
    /// Fetch in flight; show the loading indicator.
    Loading,

    /// Photo bytes ready to display.
    Loaded(Vec<u8>),

    /// No photo: the payload had no reference, or the fetch failed.
    Empty,
}

/// Display model for one selected hotel.
///
/// Projection is total: any subset of the payload renders as a sparse
/// screen. The photo fetch is owned by the screen, so discarding the
/// screen cancels it.
pub struct DetailScreen {
    card: HotelCard,
    photo: PhotoState,
    load: Option<PhotoLoad>,
}

impl DetailScreen {
    /// Project `selection` and, when it carries a photo reference, start
    /// the fetch.
    pub fn configure(selection: &HotelSelection, fetcher: Arc<dyn PhotoFetcher>) -> Self {
        let card = HotelCard::from_selection(selection);
        let (photo, load) = match card.photo_url.as_deref() {
            Some(url) => (
                PhotoState::Loading,
                Some(PhotoLoad::start(fetcher, url)),
            ),
            None => (PhotoState::Empty, None),
        };
        Self { card, photo, load }
    }

    /// The projected display fields.
    pub fn card(&self) -> &HotelCard {
        &self.card
    }

    /// Current photo area state.
    pub fn photo(&self) -> &PhotoState {
        &self.photo
    }

    /// Name line; empty when the payload had none.
    pub fn name_text(&self) -> &str {
        self.card.name.as_deref().unwrap_or("")
    }

    /// Address line; empty when the payload had none.
    pub fn address_text(&self) -> &str {
        self.card.address.as_deref().unwrap_or("")
    }

    /// Price line, `"$0"` when the payload had no price.
    pub fn price_text(&self) -> String {
        self.card.price_label()
    }

    /// Drive the in-flight fetch (if any) to completion and settle the
    /// photo state.
    ///
    /// Failures stop the loading indicator and leave the empty state;
    /// they never escape the screen.
    pub async fn resolve_photo(&mut self) {
        let Some(mut load) = self.load.take() else {
            return;
        };
        self.photo = match load.outcome().await {
            Ok(bytes) => PhotoState::Loaded(bytes),
            Err(err) => {
                debug!(target: "hsb_screens", "photo fetch failed: {err}");
                PhotoState::Empty
            }
        };
    }
}
