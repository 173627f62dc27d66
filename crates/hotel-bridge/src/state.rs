// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mirrored bridge state, owned exclusively by the controller.

use hsb_core::{PriceFilters, PriceRange, SearchRequest, SortOption};

/// The three pieces of state the host mirrors into the content.
///
/// Fields are private: choice surfaces and shells go through the
/// controller's named operations, never through direct writes, so every
/// mutation pairs with its outbound call in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeState {
    pending: Option<SearchRequest>,
    sort: SortOption,
    price: PriceRange,
}

impl BridgeState {
    /// The search waiting for the content's ready signal, if any.
    pub fn pending(&self) -> Option<&SearchRequest> {
        self.pending.as_ref()
    }

    /// Currently stored sort order.
    pub fn sort(&self) -> SortOption {
        self.sort
    }

    /// Currently stored price bounds.
    pub fn price(&self) -> PriceRange {
        self.price
    }

    /// Store a new pending search, returning the replaced one if a prior
    /// search was still waiting.
    pub(crate) fn replace_pending(&mut self, request: SearchRequest) -> Option<SearchRequest> {
        self.pending.replace(request)
    }

    /// Consume the pending search (single use).
    pub(crate) fn take_pending(&mut self) -> Option<SearchRequest> {
        self.pending.take()
    }

    pub(crate) fn set_sort(&mut self, option: SortOption) {
        self.sort = option;
    }

    /// Store new bounds and hand back their wire form in the same step.
    pub(crate) fn set_price_range(&mut self, range: PriceRange) -> PriceFilters {
        self.price = range;
        range.filters()
    }
}
