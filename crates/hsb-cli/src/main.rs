// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing_subscriber::EnvFilter;

use hotel_bridge::{BridgeConfig, BridgeSession, HostCommand, LOAD_FAILED_DISMISS, UiEffect};
use hsb_core::{DEFAULT_ENTRY_URL, HotelSelection, PriceRange, SortOption};
use hsb_mock_content::{LoadBehavior, MockContent, sample_results, sample_selection};
use hsb_screens::{
    DetailScreen, PRICE_ROWS, PRICE_SHEET_TITLE, PhotoError, PhotoFetcher, PhotoState, PriceColumn,
    PricePicker, SORT_SHEET_TITLE,
};

/// How long `search` waits for any single effect before giving up.
const EFFECT_WAIT: Duration = Duration::from_secs(5);

/// Bytes served by the placeholder photo fetcher (a bare JPEG marker
/// pair), so `--open-first` never touches the network.
const PLACEHOLDER_PHOTO: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

#[derive(Parser, Debug)]
#[command(name = "hsb", version, about = "Hotel search bridge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the selectable sort orders and their wire tokens.
    Sorts,

    /// Show the price picker rows for both columns.
    Prices,

    /// Drive a search session against the built-in mock content.
    Search {
        /// Where to search.
        #[arg(long, default_value = "Boston")]
        location: String,

        /// Check-in date (YYYY-MM-DD).
        #[arg(long, default_value = "2024-06-01")]
        date_start: NaiveDate,

        /// Check-out date (YYYY-MM-DD).
        #[arg(long, default_value = "2024-06-05")]
        date_end: NaiveDate,

        /// Sort order applied once results arrive.
        #[arg(long, value_enum, default_value_t = SortArg::Unset)]
        sort: SortArg,

        /// Lower price bound in dollars; 0 means unbounded.
        #[arg(long, default_value_t = 0)]
        price_min: u32,

        /// Upper price bound in dollars; 0 means unbounded.
        #[arg(long, default_value_t = 0)]
        price_max: u32,

        /// Simulate an unreachable server instead of loading the page.
        #[arg(long)]
        fail_load: bool,

        /// Select the first result and render its detail screen.
        #[arg(long)]
        open_first: bool,

        /// Print effects as JSON lines instead of pretty output.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    PriceAscend,
    PriceDescend,
    Unset,
}

impl From<SortArg> for SortOption {
    fn from(v: SortArg) -> Self {
        match v {
            SortArg::Name => SortOption::ByName,
            SortArg::PriceAscend => SortOption::PriceAscending,
            SortArg::PriceDescend => SortOption::PriceDescending,
            SortArg::Unset => SortOption::Unset,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match std::env::var("HSB_LOG_LEVEL") {
        Ok(level) => EnvFilter::new(level),
        Err(_) if cli.debug => EnvFilter::new("hotel_bridge=debug,hsb_screens=debug"),
        Err(_) => EnvFilter::new("hotel_bridge=info"),
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Sorts => cmd_sorts(),
        Commands::Prices => cmd_prices(),
        Commands::Search {
            location,
            date_start,
            date_end,
            sort,
            price_min,
            price_max,
            fail_load,
            open_first,
            json,
        } => {
            cmd_search(
                location,
                date_start,
                date_end,
                sort.into(),
                PriceRange::new(price_min, price_max),
                fail_load,
                open_first,
                json,
            )
            .await
        }
    }
}

fn cmd_sorts() -> Result<()> {
    println!("{SORT_SHEET_TITLE}");
    for option in SortOption::SELECTABLE {
        if let Some(token) = option.wire_token() {
            println!("{} ({token})", option.label());
        }
    }
    Ok(())
}

fn cmd_prices() -> Result<()> {
    println!("{PRICE_SHEET_TITLE}");
    for row in 0..PRICE_ROWS {
        println!(
            "{:>4}  {:>4}",
            PricePicker::row_title(row, PriceColumn::Min),
            PricePicker::row_title(row, PriceColumn::Max),
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn cmd_search(
    location: String,
    date_start: NaiveDate,
    date_end: NaiveDate,
    sort: SortOption,
    price: PriceRange,
    fail_load: bool,
    open_first: bool,
    json: bool,
) -> Result<()> {
    let entry_url = resolve_entry_url();
    let behavior = if fail_load {
        LoadBehavior::Fail
    } else {
        LoadBehavior::AnnounceReady
    };
    let (mock, surface_events) = MockContent::connect(behavior);
    mock.respond_with_results(sample_results());

    if !json {
        eprintln!("searching {location}: {date_start} to {date_end}");
        eprintln!("entry url: {entry_url}");
        eprintln!("---");
    }

    let session = BridgeSession::start(
        mock.clone(),
        surface_events,
        BridgeConfig::new().with_entry_url(entry_url),
    );
    let (commands, mut effects, wait, cancel) = session.into_parts();

    commands
        .send(HostCommand::BeginSearch {
            location,
            date_start,
            date_end,
        })
        .await
        .context("bridge task stopped before the search began")?;

    let first = next_effect(&mut effects).await?;
    let load_failed = matches!(first, UiEffect::LoadFailed { .. });
    print_effect(&first, json)?;

    if !load_failed {
        let mut expected_calls = 1;
        if sort != SortOption::Unset {
            commands
                .send(HostCommand::SetSort(sort))
                .await
                .context("bridge task stopped before the sort was applied")?;
            expected_calls += 1;
        }
        if price != PriceRange::default() {
            commands
                .send(HostCommand::SetPriceRange {
                    min: price.min,
                    max: price.max,
                })
                .await
                .context("bridge task stopped before the filters were applied")?;
            expected_calls += 1;
        }
        wait_for_calls(&mock, expected_calls).await?;

        if !json {
            eprintln!("---");
            for call in mock.calls() {
                match call.argument {
                    Some(argument) => eprintln!("[call] {}({argument})", call.function),
                    None => eprintln!("[call] {}()", call.function),
                }
            }
        }

        if open_first {
            mock.select_hotel(sample_selection()).await;
            let effect = next_effect(&mut effects).await?;
            print_effect(&effect, json)?;
            if !json && let UiEffect::ShowHotelDetail { selection } = effect {
                show_detail(selection).await;
            }
        }
    }

    cancel.cancel();
    wait.await.context("join bridge task")??;
    Ok(())
}

async fn next_effect(effects: &mut ReceiverStream<UiEffect>) -> Result<UiEffect> {
    tokio::time::timeout(EFFECT_WAIT, effects.next())
        .await
        .context("timed out waiting for the bridge")?
        .context("bridge stopped before the next effect")
}

fn print_effect(effect: &UiEffect, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(effect)?);
        return Ok(());
    }
    match effect {
        UiEffect::TitleChanged { title } => println!("{title}"),
        UiEffect::ShowHotelDetail { .. } => eprintln!("[detail] hotel selected"),
        UiEffect::LoadFailed { title, message } => {
            eprintln!("[failed] {title}: {message} [{LOAD_FAILED_DISMISS}]")
        }
    }
    Ok(())
}

/// Wait until the mock has recorded `expected` decoded `JSAPI` calls.
///
/// Commands are marshaled onto the session task, so the call log trails
/// the sends by a few scheduler ticks.
async fn wait_for_calls(mock: &MockContent, expected: usize) -> Result<()> {
    let deadline = tokio::time::Instant::now() + EFFECT_WAIT;
    while mock.calls().len() < expected {
        if tokio::time::Instant::now() >= deadline {
            anyhow::bail!(
                "content saw {} of {expected} expected calls",
                mock.calls().len()
            );
        }
        tokio::task::yield_now().await;
    }
    Ok(())
}

async fn show_detail(selection: HotelSelection) {
    let mut screen = DetailScreen::configure(&selection, Arc::new(PlaceholderPhotos));
    screen.resolve_photo().await;
    eprintln!("---");
    println!("{}", screen.name_text());
    println!("{}", screen.address_text());
    println!("{}", screen.price_text());
    match screen.photo() {
        PhotoState::Loaded(bytes) => eprintln!("[photo] {} bytes", bytes.len()),
        PhotoState::Empty => eprintln!("[photo] none"),
        PhotoState::Loading => eprintln!("[photo] still loading"),
    }
}

/// Serves fixed bytes for any URL.
struct PlaceholderPhotos;

#[async_trait]
impl PhotoFetcher for PlaceholderPhotos {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, PhotoError> {
        Ok(PLACEHOLDER_PHOTO.to_vec())
    }
}

fn resolve_entry_url() -> String {
    if let Ok(url) = std::env::var("HSB_ENTRY_URL") {
        return url;
    }
    if let Some(url) = load_config().and_then(|config| config.content.entry_url) {
        return url;
    }
    DEFAULT_ENTRY_URL.to_owned()
}

// ── Config file support ──────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct HsbConfig {
    #[serde(default)]
    content: ContentConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ContentConfig {
    entry_url: Option<String>,
}

fn load_config() -> Option<HsbConfig> {
    let path = std::path::Path::new("hsb.toml");
    if path.exists() {
        let content = std::fs::read_to_string(path).ok()?;
        toml::from_str(&content).ok()
    } else {
        None
    }
}
