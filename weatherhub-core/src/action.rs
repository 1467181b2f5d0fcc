//! Actions
//!
//! Naming follows a prefix convention: the first word is the category
//! (`Weather*`, `Search*`, `Location*`, `Ui*`) and a `Did` after it marks
//! the result of async work. Result actions carry the [`RequestId`] they
//! answer so the reducer can drop stale ones.

use crate::error::{GeolocationError, LookupError};
use crate::query::{Coordinates, QueryDescriptor};
use crate::state::{RequestId, WeatherSnapshot};

/// Everything that can happen in the app
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Weather =====
    /// Intent: refresh the current city (mount, refresh key, auto-refresh)
    WeatherFetch,

    /// Result: fetch settled successfully
    WeatherDidLoad {
        request: RequestId,
        query: QueryDescriptor,
        snapshot: WeatherSnapshot,
    },

    /// Result: fetch failed
    WeatherDidError {
        request: RequestId,
        query: QueryDescriptor,
        error: LookupError,
    },

    // ===== Search =====
    /// Focus the search input
    SearchFocus,

    /// Leave the search input without submitting
    SearchCancel,

    /// Replace the search text
    SearchInput(String),

    /// Submit the search text (empty text refreshes the current city)
    SearchSubmit,

    // ===== History =====
    /// Look up the history entry at this index
    HistorySelect(usize),

    // ===== Location =====
    /// Intent: look up weather at the user's position
    LocationRequest,

    /// Answer to the consent prompt
    LocationConsent(bool),

    /// Result: locator produced a position
    LocationDidResolve {
        request: RequestId,
        coords: Coordinates,
    },

    /// Result: locator failed
    LocationDidError {
        request: RequestId,
        error: GeolocationError,
    },

    // ===== UI =====
    UiToggleUnits,

    UiToggleTheme,

    UiTerminalResize(u16, u16),

    // ===== Global =====
    /// Periodic tick for the loading spinner
    Tick,

    Quit,
}

impl Action {
    /// Variant name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::WeatherFetch => "WeatherFetch",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::SearchFocus => "SearchFocus",
            Action::SearchCancel => "SearchCancel",
            Action::SearchInput(_) => "SearchInput",
            Action::SearchSubmit => "SearchSubmit",
            Action::HistorySelect(_) => "HistorySelect",
            Action::LocationRequest => "LocationRequest",
            Action::LocationConsent(_) => "LocationConsent",
            Action::LocationDidResolve { .. } => "LocationDidResolve",
            Action::LocationDidError { .. } => "LocationDidError",
            Action::UiToggleUnits => "UiToggleUnits",
            Action::UiToggleTheme => "UiToggleTheme",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    /// Category from the name prefix, `None` for global actions
    pub fn category(&self) -> Option<&'static str> {
        match self {
            Action::WeatherFetch | Action::WeatherDidLoad { .. } | Action::WeatherDidError { .. } => {
                Some("weather")
            }
            Action::SearchFocus
            | Action::SearchCancel
            | Action::SearchInput(_)
            | Action::SearchSubmit => Some("search"),
            Action::HistorySelect(_) => Some("history"),
            Action::LocationRequest
            | Action::LocationConsent(_)
            | Action::LocationDidResolve { .. }
            | Action::LocationDidError { .. } => Some("location"),
            Action::UiToggleUnits | Action::UiToggleTheme | Action::UiTerminalResize(..) => {
                Some("ui")
            }
            Action::Tick | Action::Quit => None,
        }
    }

    /// Whether this action carries the result of async work
    pub fn is_async_result(&self) -> bool {
        matches!(
            self,
            Action::WeatherDidLoad { .. }
                | Action::WeatherDidError { .. }
                | Action::LocationDidResolve { .. }
                | Action::LocationDidError { .. }
        )
    }

    /// Concise one-line form for logs
    pub fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad {
                request,
                query,
                snapshot,
            } => format!(
                "WeatherDidLoad {{ request: {}, query: {query}, location: {:?}, temp: {:.1}°C }}",
                request.0, snapshot.location, snapshot.temperature
            ),
            Action::WeatherDidError {
                request,
                query,
                error,
            } => format!(
                "WeatherDidError {{ request: {}, query: {query}, error: {error} }}",
                request.0
            ),
            Action::LocationDidResolve { request, coords } => {
                format!(
                    "LocationDidResolve {{ request: {}, coords: {coords} }}",
                    request.0
                )
            }
            // Keystrokes would leak search text into the log
            Action::SearchInput(text) => format!("SearchInput({} chars)", text.chars().count()),
            _ => format!("{self:?}"),
        }
    }
}
