//! Reducer - (state, action) -> effects
//!
//! Every lookup intent goes through [`begin_lookup`] or [`begin_locate`],
//! which issue a fresh [`RequestId`]. Async results tagged with an older id
//! are dropped, so only the most recent intent can settle the UI.

use tracing::{info, warn};

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::error::{GeolocationError, LookupError};
use crate::query::{resolve_name, QueryDescriptor};
use crate::state::{AppState, InputMode, RequestId, UiState};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather =====
        Action::WeatherFetch => begin_lookup(state, ""),

        Action::WeatherDidLoad {
            request,
            query,
            snapshot,
        } => {
            if !accept(state, request) {
                return DispatchResult::unchanged();
            }
            state.city = snapshot.location.clone();
            match query {
                QueryDescriptor::Name(_) => {
                    state.history.record(&snapshot.location);
                }
                QueryDescriptor::Coords(_) => state.search_input.clear(),
            }
            state.ui = UiState::Loaded(snapshot);
            DispatchResult::changed()
        }

        Action::WeatherDidError {
            request,
            query,
            error,
        } => {
            if !accept(state, request) {
                return DispatchResult::unchanged();
            }
            warn!(%query, %error, "Weather lookup failed");
            let retained = state.ui.take_snapshot();
            // A failed name lookup drops what was shown; a failed position
            // lookup keeps it and reports one message whatever the cause.
            let (error, retained) = if query.is_name() {
                (error, None)
            } else {
                (LookupError::LocationWeather(Box::new(error)), retained)
            };
            state.ui = UiState::Failed { error, retained };
            DispatchResult::changed()
        }

        // ===== Search =====
        Action::SearchFocus => {
            if state.mode != InputMode::Browse {
                return DispatchResult::unchanged();
            }
            state.mode = InputMode::Search;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if state.mode != InputMode::Search {
                return DispatchResult::unchanged();
            }
            state.mode = InputMode::Browse;
            DispatchResult::changed()
        }

        Action::SearchInput(text) => {
            if state.search_input == text {
                return DispatchResult::unchanged();
            }
            state.search_input = text;
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.mode = InputMode::Browse;
            let input = std::mem::take(&mut state.search_input);
            begin_lookup(state, &input).mark_changed()
        }

        // ===== History =====
        Action::HistorySelect(index) => match state.history.get(index) {
            Some(name) => {
                let name = name.to_owned();
                begin_lookup(state, &name)
            }
            None => DispatchResult::unchanged(),
        },

        // ===== Location =====
        Action::LocationRequest => {
            if state.location_consent {
                begin_locate(state)
            } else {
                state.mode = InputMode::ConsentPrompt;
                DispatchResult::changed()
            }
        }

        Action::LocationConsent(granted) => {
            if state.mode != InputMode::ConsentPrompt {
                return DispatchResult::unchanged();
            }
            state.mode = InputMode::Browse;
            if granted {
                state.location_consent = true;
                begin_locate(state)
            } else {
                fail_in_place(state, GeolocationError::Denied.into())
            }
        }

        Action::LocationDidResolve { request, coords } => {
            if !accept(state, request) {
                return DispatchResult::unchanged();
            }
            // Same request id: locate + fetch is one lookup.
            DispatchResult::effect(Effect::FetchWeather {
                request,
                query: QueryDescriptor::Coords(coords),
            })
        }

        Action::LocationDidError { request, error } => {
            if !accept(state, request) {
                return DispatchResult::unchanged();
            }
            warn!(%error, "Geolocation failed");
            let retained = state.ui.take_snapshot();
            state.ui = UiState::Failed {
                error: error.into(),
                retained,
            };
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::UiToggleTheme => {
            state.theme = state.theme.toggle();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // only re-render while the spinner is visible
            DispatchResult::changed_if(state.ui.is_loading())
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Start a name lookup for `input` (empty input means the current city).
///
/// Validation and missing credentials fail immediately without entering
/// `Loading` and without a network effect.
fn begin_lookup(state: &mut AppState, input: &str) -> DispatchResult<Effect> {
    let query = match resolve_name(input, &state.city) {
        Ok(query) => query,
        Err(error) => return fail_in_place(state, error),
    };
    if !state.credentials_configured {
        return fail_in_place(state, LookupError::Credential);
    }

    let request = state.issue_request();
    info!(request = request.0, %query, "Issuing weather lookup");
    let retained = state.ui.take_snapshot();
    state.ui = UiState::Loading { retained };
    DispatchResult::changed_with(Effect::FetchWeather { request, query })
}

/// Start a position lookup; the weather fetch follows once it resolves.
fn begin_locate(state: &mut AppState) -> DispatchResult<Effect> {
    if !state.credentials_configured {
        return fail_in_place(state, LookupError::Credential);
    }

    let request = state.issue_request();
    info!(request = request.0, "Issuing location lookup");
    let retained = state.ui.take_snapshot();
    state.ui = UiState::Loading { retained };
    DispatchResult::changed_with(Effect::Locate { request })
}

/// Fail without a request, keeping whatever snapshot is around.
///
/// Also supersedes any in-flight request, so a late result cannot overwrite
/// the error the user just saw.
fn fail_in_place(state: &mut AppState, error: LookupError) -> DispatchResult<Effect> {
    state.issue_request();
    let retained = state.ui.take_snapshot();
    state.ui = UiState::Failed { error, retained };
    DispatchResult::changed()
}

fn accept(state: &AppState, request: RequestId) -> bool {
    if state.is_current(request) {
        return true;
    }
    warn!(
        request = request.0,
        latest = state.latest_request.0,
        "Discarding stale result"
    );
    false
}
