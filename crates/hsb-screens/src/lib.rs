// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! hsb-screens
#![deny(unsafe_code)]

pub mod detail;
pub mod photo;
pub mod picker;

pub use detail::{DetailScreen, PhotoState};
pub use photo::{HttpPhotoFetcher, PhotoError, PhotoFetcher, PhotoLoad};
pub use picker::{
    PRICE_ROWS, PRICE_SHEET_TITLE, PRICE_STEP, PriceColumn, PricePicker, SORT_SHEET_TITLE,
    SortSheet,
};
