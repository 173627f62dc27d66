// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end flows across the bridge, the mock content, and the leaf
//! screens, driven only through public crate APIs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_stream::StreamExt;

use hotel_bridge::{BridgeConfig, BridgeSession, HostCommand, UiEffect};
use hsb_core::{PriceRange, SortOption};
use hsb_mock_content::{LoadBehavior, MockContent, sample_results, sample_selection};
use hsb_screens::{
    DetailScreen, PhotoError, PhotoFetcher, PhotoState, PriceColumn, PricePicker, SortSheet,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

async fn wait_for_scripts(mock: &MockContent, count: usize) {
    let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(2);
    while mock.scripts().len() < count {
        assert!(
            tokio::time::Instant::now() < deadline,
            "content never saw {count} scripts, got {:?}",
            mock.scripts()
        );
        tokio::task::yield_now().await;
    }
}

struct StubFetcher(&'static [u8]);

#[async_trait]
impl PhotoFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, PhotoError> {
        Ok(self.0.to_vec())
    }
}

// ── The canonical search flow ────────────────────────────────────────

#[tokio::test]
async fn search_sort_filter_select_detail_full_flow() {
    let (mock, surface_events) = MockContent::connect(LoadBehavior::AnnounceReady);
    mock.respond_with_results(sample_results());
    let mut session = BridgeSession::start(mock.clone(), surface_events, BridgeConfig::default());

    session
        .commands
        .send(HostCommand::BeginSearch {
            location: "Boston".into(),
            date_start: date("2024-06-01"),
            date_end: date("2024-06-05"),
        })
        .await
        .unwrap();

    assert_eq!(
        session.effects.next().await,
        Some(UiEffect::TitleChanged {
            title: "3 Results".to_owned(),
        })
    );

    session
        .commands
        .send(HostCommand::SetSort(SortOption::PriceAscending))
        .await
        .unwrap();
    session
        .commands
        .send(HostCommand::SetPriceRange { min: 0, max: 200 })
        .await
        .unwrap();
    wait_for_scripts(&mock, 3).await;
    assert_eq!(
        mock.scripts(),
        vec![
            r#"window.JSAPI.runHotelSearch({"location":"Boston","dateStart":"2024-06-01","dateEnd":"2024-06-05"})"#.to_owned(),
            r#"window.JSAPI.setHotelSort("priceAscend")"#.to_owned(),
            r#"window.JSAPI.setHotelFilters({"priceMin":null,"priceMax":200})"#.to_owned(),
        ]
    );

    mock.select_hotel(sample_selection()).await;
    let selection = match session.effects.next().await {
        Some(UiEffect::ShowHotelDetail { selection }) => selection,
        other => panic!("expected detail effect, got {other:?}"),
    };

    let mut screen = DetailScreen::configure(&selection, Arc::new(StubFetcher(b"jpeg")));
    assert_eq!(screen.name_text(), "Parker House");
    assert_eq!(screen.address_text(), "60 School St");
    assert_eq!(screen.price_text(), "$140");
    assert_eq!(screen.photo(), &PhotoState::Loading);

    screen.resolve_photo().await;
    assert_eq!(screen.photo(), &PhotoState::Loaded(b"jpeg".to_vec()));
}

#[tokio::test]
async fn a_second_search_reloads_and_reruns() {
    let (mock, surface_events) = MockContent::connect(LoadBehavior::AnnounceReady);
    mock.respond_with_results(sample_results());
    let mut session = BridgeSession::start(mock.clone(), surface_events, BridgeConfig::default());

    for location in ["Boston", "Chicago"] {
        session
            .commands
            .send(HostCommand::BeginSearch {
                location: location.into(),
                date_start: date("2024-06-01"),
                date_end: date("2024-06-05"),
            })
            .await
            .unwrap();
        assert_eq!(
            session.effects.next().await,
            Some(UiEffect::TitleChanged {
                title: "3 Results".to_owned(),
            })
        );
    }

    assert_eq!(mock.loads().len(), 2, "each search reloads the page");
    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].function, "runHotelSearch");
    assert_eq!(
        calls[0].argument.as_ref().unwrap()["location"],
        "Boston",
        "first run carries the first request"
    );
    assert_eq!(calls[1].argument.as_ref().unwrap()["location"], "Chicago");
}

// ── Choice surfaces feeding the session ──────────────────────────────

#[tokio::test]
async fn choosers_feed_the_session_commands() {
    let (mock, surface_events) = MockContent::connect(LoadBehavior::Silent);
    let session = BridgeSession::start(mock.clone(), surface_events, BridgeConfig::default());

    // User taps "Price Descending" on the sort sheet.
    let mut sheet = SortSheet::new(SortOption::Unset);
    let chosen = sheet.choose("Price Descending");
    session
        .commands
        .send(HostCommand::SetSort(chosen))
        .await
        .unwrap();

    // User picks row 3 in the Max column: $200.
    let mut picker = PricePicker::new(PriceRange::default());
    picker.select(3, PriceColumn::Max);
    let (min, max) = picker.selection();
    session
        .commands
        .send(HostCommand::SetPriceRange { min, max })
        .await
        .unwrap();

    wait_for_scripts(&mock, 2).await;
    assert_eq!(
        mock.scripts(),
        vec![
            r#"window.JSAPI.setHotelSort("priceDescend")"#.to_owned(),
            r#"window.JSAPI.setHotelFilters({"priceMin":null,"priceMax":200})"#.to_owned(),
        ]
    );
}

#[tokio::test]
async fn an_unknown_sheet_label_clears_without_sending() {
    let (mock, surface_events) = MockContent::connect(LoadBehavior::Silent);
    let session = BridgeSession::start(mock.clone(), surface_events, BridgeConfig::default());

    session
        .commands
        .send(HostCommand::SetSortLabel("Distance".into()))
        .await
        .unwrap();
    session
        .commands
        .send(HostCommand::SetSortLabel("Name".into()))
        .await
        .unwrap();

    // Only the recognized label produces traffic; had "Distance" sent
    // anything it would appear first.
    wait_for_scripts(&mock, 1).await;
    assert_eq!(
        mock.scripts(),
        vec![r#"window.JSAPI.setHotelSort("name")"#.to_owned()]
    );
}
