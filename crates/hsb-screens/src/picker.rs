// SPDX-License-Identifier: MIT OR Apache-2.0
//! Models for the sort sheet and the two-column price picker.

use hsb_core::{PriceRange, SortOption};

/// Title of the sort choice sheet.
pub const SORT_SHEET_TITLE: &str = "Sort results by:";

/// Title of the price filter sheet.
pub const PRICE_SHEET_TITLE: &str = "Filter by price:";

/// Rows per price column, header row included.
pub const PRICE_ROWS: usize = 11;

/// Dollar step between adjacent price buckets.
pub const PRICE_STEP: u32 = 100;

/// The sort chooser: three labels, one checkmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSheet {
    current: SortOption,
}

impl SortSheet {
    /// Open the sheet with `current` checked.
    pub fn new(current: SortOption) -> Self {
        Self { current }
    }

    /// Labels in display order.
    pub fn labels(&self) -> [&'static str; 3] {
        [
            SortOption::ByName.label(),
            SortOption::PriceAscending.label(),
            SortOption::PriceDescending.label(),
        ]
    }

    /// Whether `label` carries the checkmark.
    pub fn is_checked(&self, label: &str) -> bool {
        self.current.label() == label
    }

    /// Currently checked option.
    pub fn current(&self) -> SortOption {
        self.current
    }

    /// Pick by label, returning the option to forward to the bridge.
    ///
    /// Unrecognized labels yield `Unset`, same as the contract mapping.
    pub fn choose(&mut self, label: &str) -> SortOption {
        self.current = SortOption::from_label(label);
        self.current
    }
}

/// The two columns of the price picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceColumn {
    /// Lower bound column.
    Min,
    /// Upper bound column.
    Max,
}

impl PriceColumn {
    /// Header shown in this column's row 0.
    pub fn header(&self) -> &'static str {
        match self {
            PriceColumn::Min => "Min",
            PriceColumn::Max => "Max",
        }
    }
}

/// The price chooser: 2 columns x 11 rows of $100 buckets.
///
/// Row 0 is a non-selectable header; row `r >= 1` means
/// `(r - 1) * 100` dollars, so row 1 is $0 ("no bound").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePicker {
    min_row: usize,
    max_row: usize,
}

impl PricePicker {
    /// Open the picker with both columns restored from `range`.
    pub fn new(range: PriceRange) -> Self {
        Self {
            min_row: Self::initial_row(range.min),
            max_row: Self::initial_row(range.max),
        }
    }

    /// The row that re-selects a previously stored bound.
    ///
    /// Bounds past the top bucket clamp to the last row, same as
    /// [`select`](Self::select).
    pub fn initial_row(amount: u32) -> usize {
        ((amount / PRICE_STEP) as usize + 1).min(PRICE_ROWS - 1)
    }

    /// Dollar amount a row stands for; the header row counts as $0.
    pub fn amount_for_row(row: usize) -> u32 {
        row.saturating_sub(1) as u32 * PRICE_STEP
    }

    /// Display title for a row: the column header on row 0, a dollar
    /// figure everywhere else.
    pub fn row_title(row: usize, column: PriceColumn) -> String {
        if row == 0 {
            column.header().to_owned()
        } else {
            format!("${}", Self::amount_for_row(row))
        }
    }

    /// Apply a user selection, returning the effective dollar amount.
    ///
    /// Row 0 is the header and auto-advances to row 1; rows past the end
    /// clamp to the last bucket.
    pub fn select(&mut self, row: usize, column: PriceColumn) -> u32 {
        let row = row.clamp(1, PRICE_ROWS - 1);
        match column {
            PriceColumn::Min => self.min_row = row,
            PriceColumn::Max => self.max_row = row,
        }
        Self::amount_for_row(row)
    }

    /// Currently selected row in `column`.
    pub fn row(&self, column: PriceColumn) -> usize {
        match column {
            PriceColumn::Min => self.min_row,
            PriceColumn::Max => self.max_row,
        }
    }

    /// The `(min, max)` dollar amounts to forward to the bridge.
    pub fn selection(&self) -> (u32, u32) {
        (
            Self::amount_for_row(self.min_row),
            Self::amount_for_row(self.max_row),
        )
    }
}
