//! UI components, from the root `WeatherDisplay` down

pub mod consent_prompt;
pub mod details;
pub mod help_bar;
pub mod history_bar;
pub mod location_header;
pub mod search_bar;
pub mod weather_body;
pub mod weather_display;

pub use crate::component::Component;

pub use consent_prompt::{centered_rect, ConsentPrompt, ConsentPromptProps};
pub use details::{Details, DetailsProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use history_bar::{HistoryBar, HistoryBarProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_body::{WeatherBody, WeatherBodyProps};
pub use weather_display::{
    WeatherDisplay, WeatherDisplayProps, ERROR_ICON, LOCATION_ICON, SPINNERS,
};
