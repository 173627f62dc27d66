// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed effects the bridge emits for the host shell to render.

use serde::Serialize;

use hsb_core::HotelSelection;

/// Title of the notice shown when the content fails to load.
pub const LOAD_FAILED_TITLE: &str = "Could not load page";

/// Body of the load-failure notice.
pub const LOAD_FAILED_MESSAGE: &str = "Looks like the server isn't running.";

/// Label of the load-failure notice's single dismiss action.
pub const LOAD_FAILED_DISMISS: &str = "Bummer";

/// Display title for a result count.
pub fn results_title(count: usize) -> String {
    format!("{count} Results")
}

/// Something the shell should render in response to bridge activity.
///
/// Effects are the bridge's only outward surface besides `JSAPI` calls;
/// it never draws or navigates itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum UiEffect {
    /// The displayed title should change (result count updates).
    TitleChanged {
        /// New title text.
        title: String,
    },

    /// Navigate to the detail surface for this selection.
    ///
    /// Ownership of the payload moves to the consumer here; the bridge
    /// keeps no copy.
    ShowHotelDetail {
        /// The raw selection payload, untouched.
        selection: HotelSelection,
    },

    /// Show a dismissible load-failure notice. No automatic retry.
    LoadFailed {
        /// Notice title.
        title: String,
        /// Notice body.
        message: String,
    },
}
