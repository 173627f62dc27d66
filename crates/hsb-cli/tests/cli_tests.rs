// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for the `hsb` CLI binary.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn hsb() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("hsb").expect("binary `hsb` should be built")
}

// ── Help & version ──────────────────────────────────────────────────

#[test]
fn help_flag_prints_usage() {
    hsb()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Hotel search bridge CLI"))
        .stdout(contains("search"))
        .stdout(contains("sorts"))
        .stdout(contains("prices"));
}

#[test]
fn version_flag_prints_version() {
    hsb()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn search_help_shows_all_options() {
    hsb()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(contains("--location"))
        .stdout(contains("--date-start"))
        .stdout(contains("--date-end"))
        .stdout(contains("--sort"))
        .stdout(contains("--price-min"))
        .stdout(contains("--price-max"))
        .stdout(contains("--fail-load"))
        .stdout(contains("--open-first"))
        .stdout(contains("--json"));
}

// ── Subcommands ─────────────────────────────────────────────────────

#[test]
fn sorts_lists_the_selectable_orders_under_the_sheet_title() {
    hsb()
        .arg("sorts")
        .assert()
        .success()
        .stdout(contains("Sort results by:"))
        .stdout(contains("Name (name)"))
        .stdout(contains("Price Ascending (priceAscend)"))
        .stdout(contains("Price Descending (priceDescend)"))
        .stdout(contains("Unset").not());
}

#[test]
fn prices_lists_the_picker_rows_under_the_sheet_title() {
    hsb()
        .arg("prices")
        .assert()
        .success()
        .stdout(contains("Filter by price:"))
        .stdout(contains("Min"))
        .stdout(contains("Max"))
        .stdout(contains("$0"))
        .stdout(contains("$900"));
}

#[test]
fn search_prints_the_result_count() {
    hsb()
        .arg("search")
        .assert()
        .success()
        .stdout(contains("3 Results"));
}

#[test]
fn failing_load_prints_the_notice_and_exits_cleanly() {
    hsb()
        .args(["search", "--fail-load"])
        .assert()
        .success()
        .stderr(contains("Could not load page"))
        .stderr(contains("Looks like the server isn't running."))
        .stderr(contains("Bummer"));
}

#[test]
fn rejects_a_malformed_date() {
    hsb()
        .args(["search", "--date-start", "June 1"])
        .assert()
        .failure()
        .stderr(contains("invalid value"));
}

// ── Entry URL resolution ────────────────────────────────────────────

#[test]
fn config_file_sets_the_entry_url() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        tmp.path().join("hsb.toml"),
        "[content]\nentry_url = \"http://localhost:9999/page\"\n",
    )
    .expect("write config");

    hsb()
        .current_dir(tmp.path())
        .arg("search")
        .assert()
        .success()
        .stderr(contains("entry url: http://localhost:9999/page"));
}

#[test]
fn env_var_overrides_the_config_file() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        tmp.path().join("hsb.toml"),
        "[content]\nentry_url = \"http://localhost:9999/page\"\n",
    )
    .expect("write config");

    hsb()
        .current_dir(tmp.path())
        .env("HSB_ENTRY_URL", "http://env.example/page")
        .arg("search")
        .assert()
        .success()
        .stderr(contains("entry url: http://env.example/page"));
}
