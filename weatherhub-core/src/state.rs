//! Application state - single source of truth
//!
//! Only the reducer mutates state. The lookup lifecycle is a sum type
//! ([`UiState`]) so that "loading with data" or "error with data shown as
//! fresh" cannot be represented.

use std::mem;

use crate::condition::ConditionCategory;
use crate::error::LookupError;
use crate::history::QueryHistory;

/// Sunrise and sunset as epoch seconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}

/// Normalized result of one successful fetch.
///
/// Temperatures are stored in Celsius whatever the display unit is.
/// A snapshot is never edited after construction; the next successful fetch
/// replaces it as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Canonical location name returned by the provider
    pub location: String,
    /// ISO country code, when the provider sends one
    pub country: Option<String>,
    /// Lower-cased condition code ("clear", "rain", ...)
    pub condition: String,
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// hPa
    pub pressure: u32,
    /// percent, 0-100
    pub humidity: u8,
    /// m/s
    pub wind_speed: f64,
    /// meters
    pub visibility: Option<u32>,
    /// percent, 0-100
    pub cloud_cover: u8,
    pub sun: Option<SunTimes>,
    /// Seconds east of UTC for the location
    pub utc_offset: Option<i32>,
}

impl WeatherSnapshot {
    pub fn category(&self) -> ConditionCategory {
        ConditionCategory::from_code(&self.condition)
    }

    /// Description with its first letter upper-cased.
    pub fn headline(&self) -> String {
        let mut chars = self.description.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    /// Convert a canonical Celsius value for display.
    pub fn convert(&self, celsius: f64) -> f64 {
        match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TempUnit::Celsius => "C",
            TempUnit::Fahrenheit => "F",
        }
    }

    /// Rounded whole degrees, e.g. `68°F`.
    pub fn format(&self, celsius: f64) -> String {
        format!("{}{}", self.format_degrees(celsius), self.symbol())
    }

    /// Rounded whole degrees without the unit letter, e.g. `68°`.
    pub fn format_degrees(&self, celsius: f64) -> String {
        // `as i64` keeps -0.4 from printing as "-0"
        format!("{}°", self.convert(celsius).round() as i64)
    }
}

/// Color theme preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Identifies one issued request. Issued in strictly increasing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        RequestId(self.0.wrapping_add(1))
    }
}

/// Lookup lifecycle.
///
/// `Loading` and `Failed` may retain the last snapshot. A retained snapshot is
/// kept for failures that must not discard what the user was looking at
/// (geolocation, coordinate lookups, input validation) and restored by nothing
/// but a new successful fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading {
        retained: Option<WeatherSnapshot>,
    },
    Loaded(WeatherSnapshot),
    Failed {
        error: LookupError,
        retained: Option<WeatherSnapshot>,
    },
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading { .. })
    }

    pub fn error(&self) -> Option<&LookupError> {
        match self {
            UiState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The snapshot to show right now, if any.
    ///
    /// A snapshot retained while loading is not shown; the loading indicator
    /// takes its place until the request settles.
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            UiState::Loaded(snapshot) => Some(snapshot),
            UiState::Failed { retained, .. } => retained.as_ref(),
            UiState::Idle | UiState::Loading { .. } => None,
        }
    }

    /// Move the current or retained snapshot out, leaving `Idle`.
    pub fn take_snapshot(&mut self) -> Option<WeatherSnapshot> {
        match mem::take(self) {
            UiState::Loaded(snapshot) => Some(snapshot),
            UiState::Loading { retained } | UiState::Failed { retained, .. } => retained,
            UiState::Idle => None,
        }
    }
}

/// Which widget receives keyboard input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Browse,
    Search,
    ConsentPrompt,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    pub ui: UiState,

    /// Last-known city; bare submits and refreshes look this up
    pub city: String,

    /// Text currently in the search input
    pub search_input: String,

    pub history: QueryHistory,

    pub unit: TempUnit,

    pub theme: Theme,

    pub mode: InputMode,

    /// Location consent granted for this session
    pub location_consent: bool,

    /// Whether a provider credential was configured at startup
    pub credentials_configured: bool,

    /// Latest issued request; results for older ones are dropped
    pub latest_request: RequestId,

    /// Animation frame counter (for loading spinner)
    pub tick_count: u32,

    /// Terminal dimensions
    pub terminal_size: (u16, u16),
}

impl AppState {
    /// Create state that will look up `city` first
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            ui: UiState::Idle,
            city: city.into(),
            search_input: String::new(),
            history: QueryHistory::new(),
            unit: TempUnit::default(),
            theme: Theme::default(),
            mode: InputMode::default(),
            location_consent: false,
            credentials_configured: true,
            latest_request: RequestId::default(),
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }

    pub fn with_unit(mut self, unit: TempUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_credentials(mut self, configured: bool) -> Self {
        self.credentials_configured = configured;
        self
    }

    pub fn with_location_consent(mut self, granted: bool) -> Self {
        self.location_consent = granted;
        self
    }

    /// Issue a new request id, superseding every earlier one.
    pub fn issue_request(&mut self) -> RequestId {
        self.latest_request = self.latest_request.next();
        self.latest_request
    }

    pub fn is_current(&self, request: RequestId) -> bool {
        self.latest_request == request
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("London")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(location: &str, temperature: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            location: location.into(),
            country: None,
            condition: "clear".into(),
            description: "clear sky".into(),
            temperature,
            feels_like: temperature,
            temp_min: temperature,
            temp_max: temperature,
            pressure: 1013,
            humidity: 50,
            wind_speed: 3.0,
            visibility: Some(10_000),
            cloud_cover: 0,
            sun: None,
            utc_offset: None,
        }
    }

    #[test]
    fn test_unit_conversion_round_trip() {
        let stored = 20.0;
        let unit = TempUnit::Celsius;
        assert_eq!(unit.format(stored), "20°C");

        let unit = unit.toggle();
        assert_eq!(unit.convert(stored), 68.0);
        assert_eq!(unit.format(stored), "68°F");

        let unit = unit.toggle();
        assert_eq!(unit.format(stored), "20°C");
        assert_eq!(stored, 20.0);
    }

    #[test]
    fn test_format_rounds() {
        assert_eq!(TempUnit::Celsius.format(21.6), "22°C");
        assert_eq!(TempUnit::Celsius.format(-0.4), "0°C");
        assert_eq!(TempUnit::Fahrenheit.format_degrees(0.0), "32°");
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn test_headline_capitalizes() {
        let mut s = snapshot("Oslo", 1.0);
        s.description = "light snow".into();
        assert_eq!(s.headline(), "Light snow");

        s.description = String::new();
        assert_eq!(s.headline(), "");
    }

    #[test]
    fn test_ui_state_snapshot_visibility() {
        let s = snapshot("Oslo", 1.0);

        assert!(UiState::Idle.snapshot().is_none());
        assert!(UiState::Loaded(s.clone()).snapshot().is_some());
        assert!(UiState::Loading {
            retained: Some(s.clone())
        }
        .snapshot()
        .is_none());
        assert!(UiState::Failed {
            error: LookupError::Validation,
            retained: Some(s)
        }
        .snapshot()
        .is_some());
    }

    #[test]
    fn test_take_snapshot_leaves_idle() {
        let s = snapshot("Oslo", 1.0);
        let mut ui = UiState::Loaded(s.clone());

        assert_eq!(ui.take_snapshot(), Some(s));
        assert_eq!(ui, UiState::Idle);
        assert_eq!(ui.take_snapshot(), None);
    }

    #[test]
    fn test_issue_request_supersedes() {
        let mut state = AppState::default();
        let first = state.issue_request();
        let second = state.issue_request();

        assert!(second > first);
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }
}
