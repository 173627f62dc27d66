// SPDX-License-Identifier: MIT OR Apache-2.0
//! The host bridge controller: outbound calls, inbound dispatch, state.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use webview_kit::{ContentMessage, WebSurface};

use hsb_core::{
    ApiCall, ContentEvent, HotelSelection, PriceRange, SearchRequest, SortOption,
};

use crate::config::BridgeConfig;
use crate::effect::{LOAD_FAILED_MESSAGE, LOAD_FAILED_TITLE, UiEffect, results_title};
use crate::error::BridgeError;
use crate::state::BridgeState;

/// Owns the embedded content surface and mediates all traffic across it.
///
/// All methods must be called from one logical task;
/// [`BridgeSession`](crate::session::BridgeSession) provides that
/// single-task home. Each mutating
/// operation stores its value and sends the matching `JSAPI` call in the
/// same step, so the content's view of sort/filter state never drifts
/// from the host's.
pub struct HostBridge {
    surface: Arc<dyn WebSurface>,
    state: BridgeState,
    effects: tokio::sync::mpsc::Sender<UiEffect>,
    config: BridgeConfig,
}

impl HostBridge {
    /// Build a controller over `surface`, emitting effects on `effects`.
    pub fn new(
        surface: Arc<dyn WebSurface>,
        effects: tokio::sync::mpsc::Sender<UiEffect>,
        config: BridgeConfig,
    ) -> Self {
        Self {
            surface,
            state: BridgeState::default(),
            effects,
            config,
        }
    }

    /// Read-only view of the mirrored state.
    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    /// Start a search: store it as pending and begin loading the content.
    ///
    /// Does not block on the load; the stored request is sent once the
    /// content posts its ready signal. A search already pending is
    /// replaced by the new one (the old request is never sent).
    pub async fn begin_search(
        &mut self,
        location: impl Into<String>,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<(), BridgeError> {
        let request = SearchRequest::new(location, date_start, date_end);
        info!(target: "hotel_bridge", "beginning search for {:?}", request.location);
        if let Some(prior) = self.state.replace_pending(request) {
            warn!(
                target: "hotel_bridge",
                "replacing still-pending search for {:?}", prior.location
            );
        }
        self.surface.load(&self.config.entry_url).await?;
        Ok(())
    }

    /// Store a sort order and mirror it into the content.
    ///
    /// `Unset` stores but sends nothing; there is no wire token for it.
    pub async fn set_sort(&mut self, option: SortOption) -> Result<(), BridgeError> {
        self.state.set_sort(option);
        match option.wire_token() {
            Some(token) => self.send_call(&ApiCall::SetHotelSort { token }).await,
            None => {
                debug!(target: "hotel_bridge", "sort cleared; nothing sent");
                Ok(())
            }
        }
    }

    /// [`set_sort`](Self::set_sort) driven from a display label.
    ///
    /// Unrecognized labels map to `Unset`.
    pub async fn set_sort_by_label(&mut self, label: &str) -> Result<(), BridgeError> {
        self.set_sort(SortOption::from_label(label)).await
    }

    /// Store price bounds and mirror them into the content.
    ///
    /// A bound of 0 means "unbounded" and crosses the wire as `null`.
    pub async fn set_price_range(&mut self, min: u32, max: u32) -> Result<(), BridgeError> {
        let filters = self.state.set_price_range(PriceRange::new(min, max));
        self.send_call(&ApiCall::SetHotelFilters(filters)).await
    }

    /// Dispatch one posted message through the closed event contract.
    ///
    /// Unrecognized names are ignored; malformed payloads for known names
    /// are logged and dropped rather than crashing the session.
    pub async fn handle_message(&mut self, message: &ContentMessage) -> Result<(), BridgeError> {
        let event = match ContentEvent::parse(message) {
            Ok(Some(event)) => event,
            Ok(None) => {
                debug!(
                    target: "hotel_bridge",
                    "ignoring unrecognized message {:?}", message.name
                );
                return Ok(());
            }
            Err(err) => {
                warn!(
                    target: "hotel_bridge",
                    "dropping malformed {:?} payload: {err}", message.name
                );
                return Ok(());
            }
        };
        match event {
            ContentEvent::ApiReady => self.on_api_ready().await,
            ContentEvent::HotelSelected(selection) => self.on_hotel_selected(selection).await,
            ContentEvent::ResultsReady { results } => self.on_results_ready(results.len()).await,
        }
    }

    /// React to an asynchronous content-load failure.
    ///
    /// Emits the dismissible notice effect; no automatic retry.
    pub async fn handle_load_failure(&mut self, reason: &str) -> Result<(), BridgeError> {
        warn!(target: "hotel_bridge", "content load failed: {reason}");
        self.send_effect(UiEffect::LoadFailed {
            title: LOAD_FAILED_TITLE.to_owned(),
            message: LOAD_FAILED_MESSAGE.to_owned(),
        })
        .await
    }

    /// The content is ready: send the pending search, exactly once.
    ///
    /// # Panics
    ///
    /// Reaching the ready signal without a pending search means the host
    /// never called [`begin_search`](Self::begin_search); that is a
    /// programming error and the bridge fails loudly rather than
    /// continuing with undefined state.
    async fn on_api_ready(&mut self) -> Result<(), BridgeError> {
        let request = self
            .state
            .take_pending()
            .expect("content signalled ready with no pending search; begin_search must run first");
        info!(
            target: "hotel_bridge",
            "content ready; running search for {:?}", request.location
        );
        self.send_call(&ApiCall::RunHotelSearch(request)).await
    }

    async fn on_hotel_selected(&mut self, selection: HotelSelection) -> Result<(), BridgeError> {
        info!(target: "hotel_bridge", "hotel selected; requesting detail navigation");
        self.send_effect(UiEffect::ShowHotelDetail { selection }).await
    }

    async fn on_results_ready(&mut self, count: usize) -> Result<(), BridgeError> {
        debug!(target: "hotel_bridge", "results ready: {count}");
        self.send_effect(UiEffect::TitleChanged {
            title: results_title(count),
        })
        .await
    }

    async fn send_call(&self, call: &ApiCall) -> Result<(), BridgeError> {
        let script = call.to_script()?;
        debug!(target: "hotel_bridge", "eval {:?}", call.name());
        self.surface.eval(&script).await?;
        Ok(())
    }

    async fn send_effect(&self, effect: UiEffect) -> Result<(), BridgeError> {
        self.effects
            .send(effect)
            .await
            .map_err(|_| BridgeError::EffectsClosed)
    }
}
