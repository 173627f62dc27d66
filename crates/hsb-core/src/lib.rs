//! hsb-core
//!
//! The stable wire contract between the native host and the embedded
//! hotel search content.
//!
//! If you only take one dependency, take this one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use webview_kit::{ContentMessage, ScriptCall, SurfaceError};

/// JavaScript namespace object the content exposes for outbound calls.
pub const JSAPI_NAMESPACE: &str = "window.JSAPI";

/// Default entry URL for the embedded search page.
pub const DEFAULT_ENTRY_URL: &str = "http://hipmunk.github.io/hipproblems/ios_hotelapp/";

/// Inbound message: the content's `JSAPI` object is ready for calls.
pub const MSG_API_READY: &str = "API_READY";

/// Inbound message: the user picked a result inside the content.
pub const MSG_HOTEL_SELECTED: &str = "HOTEL_API_HOTEL_SELECTED";

/// Inbound message: a result set finished rendering.
pub const MSG_RESULTS_READY: &str = "HOTEL_API_RESULTS_READY";

/// Outbound call: submit a search request.
pub const CALL_RUN_SEARCH: &str = "runHotelSearch";

/// Outbound call: apply a sort order.
pub const CALL_SET_SORT: &str = "setHotelSort";

/// Outbound call: apply price filters.
pub const CALL_SET_FILTERS: &str = "setHotelFilters";

/// A single hotel search, immutable once constructed.
///
/// Held by the bridge as the "pending" request until the content signals
/// readiness, then serialized into [`ApiCall::RunHotelSearch`] and
/// discarded. Dates serialize as ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text location query.
    pub location: String,

    /// Check-in date.
    pub date_start: NaiveDate,

    /// Check-out date.
    pub date_end: NaiveDate,
}

impl SearchRequest {
    /// Build a request for `location` between the two dates.
    pub fn new(location: impl Into<String>, date_start: NaiveDate, date_end: NaiveDate) -> Self {
        Self {
            location: location.into(),
            date_start,
            date_end,
        }
    }
}

/// Result ordering applied inside the content.
///
/// Carries two mappings: a display label for choice surfaces
/// ([`label`](SortOption::label) / [`from_label`](SortOption::from_label))
/// and the wire token sent through [`ApiCall::SetHotelSort`]
/// ([`wire_token`](SortOption::wire_token)). `Unset` is the initial state
/// and has no wire token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Alphabetical by hotel name.
    ByName,

    /// Cheapest first.
    PriceAscending,

    /// Most expensive first.
    PriceDescending,

    /// No ordering chosen yet.
    #[default]
    Unset,
}

impl SortOption {
    /// The options a choice surface offers, in display order.
    pub const SELECTABLE: [SortOption; 3] = [
        SortOption::ByName,
        SortOption::PriceAscending,
        SortOption::PriceDescending,
    ];

    /// Display label shown on choice surfaces. `Unset` has no label.
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::ByName => "Name",
            SortOption::PriceAscending => "Price Ascending",
            SortOption::PriceDescending => "Price Descending",
            SortOption::Unset => "",
        }
    }

    /// Map a display label back to its option.
    ///
    /// Anything unrecognized yields `Unset`, matching the choice-surface
    /// contract that a stray selection clears the ordering.
    pub fn from_label(label: &str) -> Self {
        SortOption::SELECTABLE
            .into_iter()
            .find(|option| option.label() == label)
            .unwrap_or(SortOption::Unset)
    }

    /// The token sent over the wire, or `None` for `Unset`.
    pub fn wire_token(&self) -> Option<&'static str> {
        match self {
            SortOption::ByName => Some("name"),
            SortOption::PriceAscending => Some("priceAscend"),
            SortOption::PriceDescending => Some("priceDescend"),
            SortOption::Unset => None,
        }
    }
}

/// Stored price bounds in whole dollars, where 0 is the sentinel for
/// "unbounded" on that side.
///
/// The sentinel never reaches the wire: [`filters`](PriceRange::filters)
/// encodes 0 as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceRange {
    /// Lower bound; 0 means no lower bound.
    pub min: u32,

    /// Upper bound; 0 means no upper bound.
    pub max: u32,
}

impl PriceRange {
    /// Build a range from raw bounds.
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Wire form of this range with sentinel zeros mapped to `null`.
    pub fn filters(&self) -> PriceFilters {
        fn bound(value: u32) -> Option<u32> {
            (value != 0).then_some(value)
        }
        PriceFilters {
            price_min: bound(self.min),
            price_max: bound(self.max),
        }
    }
}

/// Wire form of [`PriceRange`], sent through [`ApiCall::SetHotelFilters`].
///
/// Both fields always serialize; an unbounded side is an explicit `null`,
/// never an omitted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilters {
    /// Minimum price in dollars, `null` when unbounded.
    pub price_min: Option<u32>,

    /// Maximum price in dollars, `null` when unbounded.
    pub price_max: Option<u32>,
}

/// Opaque payload of a [`ContentEvent::HotelSelected`] event.
///
/// Captured verbatim from the content and handed to the detail surface
/// unchanged; the bridge never merges or rewrites it. Use
/// [`HotelCard::from_selection`] for the typed projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelSelection(Map<String, Value>);

impl HotelSelection {
    /// Wrap a raw JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Unwrap back into a plain JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for HotelSelection {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Typed projection of a [`HotelSelection`] for the detail surface.
///
/// Extraction is total: missing or wrong-typed fields degrade to `None`
/// (or 0 for the price) instead of failing, so a sparse payload renders a
/// sparse screen rather than no screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HotelCard {
    /// Hotel display name, when present.
    pub name: Option<String>,

    /// Street address, when present.
    pub address: Option<String>,

    /// Nightly price in whole dollars; 0 when absent.
    pub price: i64,

    /// Photo URL, when present.
    pub photo_url: Option<String>,
}

impl HotelCard {
    /// Project the fields the detail surface displays.
    ///
    /// Reads `result.price` plus `result.hotel.{name, address, imageURL}`.
    pub fn from_selection(selection: &HotelSelection) -> Self {
        let result = selection.get("result").and_then(Value::as_object);
        let hotel = result
            .and_then(|result| result.get("hotel"))
            .and_then(Value::as_object);
        let text = |object: Option<&Map<String, Value>>, key: &str| {
            object
                .and_then(|object| object.get(key))
                .and_then(Value::as_str)
                .map(str::to_owned)
        };
        Self {
            name: text(hotel, "name"),
            address: text(hotel, "address"),
            price: result
                .and_then(|result| result.get("price"))
                .and_then(Value::as_i64)
                .unwrap_or(0),
            photo_url: text(hotel, "imageURL"),
        }
    }

    /// Price formatted for display.
    pub fn price_label(&self) -> String {
        format!("${}", self.price)
    }
}

/// An outbound `JSAPI` call, closed over the three operations the
/// content understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    /// `runHotelSearch({...})` with the serialized request.
    RunHotelSearch(SearchRequest),

    /// `setHotelSort("...")` with a token from [`SortOption::wire_token`].
    SetHotelSort {
        /// Wire token; `Unset` never constructs this call.
        token: &'static str,
    },

    /// `setHotelFilters({...})` with sentinel zeros already mapped to `null`.
    SetHotelFilters(PriceFilters),
}

impl ApiCall {
    /// Function name under [`JSAPI_NAMESPACE`].
    pub fn name(&self) -> &'static str {
        match self {
            ApiCall::RunHotelSearch(_) => CALL_RUN_SEARCH,
            ApiCall::SetHotelSort { .. } => CALL_SET_SORT,
            ApiCall::SetHotelFilters(_) => CALL_SET_FILTERS,
        }
    }

    /// The call's single JSON argument.
    pub fn argument(&self) -> Result<Value, ContractError> {
        let argument = match self {
            ApiCall::RunHotelSearch(request) => serde_json::to_value(request)?,
            ApiCall::SetHotelSort { token } => Value::String((*token).to_owned()),
            ApiCall::SetHotelFilters(filters) => serde_json::to_value(filters)?,
        };
        Ok(argument)
    }

    /// Render the evaluatable `window.JSAPI.<name>(<argument>)` script.
    pub fn to_script(&self) -> Result<String, ContractError> {
        let script = ScriptCall::new(self.name())
            .with_argument(self.argument()?)
            .render(JSAPI_NAMESPACE)?;
        Ok(script)
    }
}

/// An inbound event, decoded from a [`ContentMessage`].
///
/// [`parse`](ContentEvent::parse) is the single registration point for
/// message names; handlers downstream match this enum exhaustively, so a
/// new message kind is a compile-checked, one-place change.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentEvent {
    /// The content's `JSAPI` is ready; the pending search may be sent.
    ApiReady,

    /// The user picked a result; payload travels to the detail surface.
    HotelSelected(HotelSelection),

    /// A result set finished rendering.
    ResultsReady {
        /// The rendered results, kept opaque; only the count is consumed.
        results: Vec<Value>,
    },
}

impl ContentEvent {
    /// Decode a posted message into an event.
    ///
    /// Returns `Ok(None)` for message names outside the contract (they
    /// are ignored, not errors) and a typed [`EventDecodeError`] when a
    /// known name carries a malformed payload.
    pub fn parse(message: &ContentMessage) -> Result<Option<Self>, EventDecodeError> {
        match message.name.as_str() {
            MSG_API_READY => Ok(Some(ContentEvent::ApiReady)),
            MSG_HOTEL_SELECTED => {
                let Value::Object(fields) = &message.body else {
                    return Err(EventDecodeError::PayloadNotObject {
                        message: MSG_HOTEL_SELECTED,
                    });
                };
                Ok(Some(ContentEvent::HotelSelected(HotelSelection::new(
                    fields.clone(),
                ))))
            }
            MSG_RESULTS_READY => {
                let Value::Object(fields) = &message.body else {
                    return Err(EventDecodeError::PayloadNotObject {
                        message: MSG_RESULTS_READY,
                    });
                };
                let results = fields
                    .get("results")
                    .ok_or(EventDecodeError::MissingField {
                        message: MSG_RESULTS_READY,
                        field: "results",
                    })?;
                let Value::Array(results) = results else {
                    return Err(EventDecodeError::WrongFieldType {
                        message: MSG_RESULTS_READY,
                        field: "results",
                        expected: "array",
                    });
                };
                Ok(Some(ContentEvent::ResultsReady {
                    results: results.clone(),
                }))
            }
            _ => Ok(None),
        }
    }
}

/// A known message name arrived with a payload that does not match the
/// contract. Not fatal: callers log and drop the event.
#[derive(Debug, thiserror::Error)]
pub enum EventDecodeError {
    /// The payload was not a JSON object.
    #[error("{message} payload is not a JSON object")]
    PayloadNotObject {
        /// Message name the payload arrived under.
        message: &'static str,
    },

    /// A required field is absent.
    #[error("{message} payload is missing field {field:?}")]
    MissingField {
        /// Message name the payload arrived under.
        message: &'static str,
        /// The absent field.
        field: &'static str,
    },

    /// A required field has the wrong JSON type.
    #[error("{message} field {field:?} is not {expected}")]
    WrongFieldType {
        /// Message name the payload arrived under.
        message: &'static str,
        /// The offending field.
        field: &'static str,
        /// Expected JSON type.
        expected: &'static str,
    },
}

/// Errors from contract-level operations (serialization, script rendering).
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// JSON serialization failed.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Script rendering rejected the call.
    #[error("failed to render script call")]
    Script(#[from] SurfaceError),
}
