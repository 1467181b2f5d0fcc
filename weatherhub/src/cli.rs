//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use weatherhub_core::{
    ClientConfig, Coordinates, IpLocator, Locator, TempUnit, Theme, WeatherClient,
    DEFAULT_API_URL,
};

/// WeatherHub - current weather for any city, in your terminal
#[derive(Parser, Debug)]
#[command(name = "weatherhub", version)]
#[command(about = "Current weather for any city, in your terminal")]
pub struct Args {
    /// City to look up on start
    #[arg(long, short, default_value = "London")]
    pub city: String,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the weather API
    #[arg(long, env = "OPENWEATHER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Initial temperature unit
    #[arg(long, value_enum, default_value_t = UnitArg::Celsius)]
    pub units: UnitArg,

    /// Initial color theme
    #[arg(long, value_enum, default_value_t = ThemeArg::Light)]
    pub theme: ThemeArg,

    /// How "my location" is resolved
    #[arg(long, value_enum, default_value_t = LocatorArg::Ip)]
    pub locator: LocatorArg,

    /// Latitude for `--locator fixed`
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude for `--locator fixed`
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Skip the consent prompt for location lookups
    #[arg(long)]
    pub allow_location: bool,

    /// Re-fetch the current city every N seconds (0 disables)
    #[arg(long, default_value_t = 300)]
    pub refresh_interval: u64,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitArg> for TempUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Celsius => TempUnit::Celsius,
            UnitArg::Fahrenheit => TempUnit::Fahrenheit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LocatorArg {
    /// Approximate position from the public IP address
    Ip,
    /// Position given by --lat/--lon
    Fixed,
    /// Location lookups are unavailable
    Off,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("--city must not be empty")]
    EmptyCity,

    #[error("--timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("--locator fixed requires both --lat and --lon")]
    MissingCoordinates,

    #[error("coordinates out of range: {0}")]
    InvalidCoordinates(Coordinates),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Where "my location" comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocatorChoice {
    Ip,
    Fixed(Coordinates),
    Off,
}

/// Validated startup settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub city: String,
    pub client: ClientConfig,
    pub unit: TempUnit,
    pub theme: Theme,
    pub locator: LocatorChoice,
    pub allow_location: bool,
    pub refresh_interval: Option<Duration>,
    pub log_file: Option<PathBuf>,
}

impl TryFrom<Args> for Settings {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let city = args.city.trim().to_string();
        if city.is_empty() {
            return Err(ConfigError::EmptyCity);
        }
        if args.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let locator = match args.locator {
            LocatorArg::Ip => LocatorChoice::Ip,
            LocatorArg::Off => LocatorChoice::Off,
            LocatorArg::Fixed => {
                let (Some(lat), Some(lon)) = (args.lat, args.lon) else {
                    return Err(ConfigError::MissingCoordinates);
                };
                let coords = Coordinates::new(lat, lon);
                if !coords.is_valid() {
                    return Err(ConfigError::InvalidCoordinates(coords));
                }
                LocatorChoice::Fixed(coords)
            }
        };

        Ok(Self {
            city,
            client: ClientConfig {
                api_key: args.api_key,
                base_url: args.api_url,
                timeout: Duration::from_secs(args.timeout),
            },
            unit: args.units.into(),
            theme: args.theme.into(),
            locator,
            allow_location: args.allow_location,
            refresh_interval: (args.refresh_interval > 0)
                .then(|| Duration::from_secs(args.refresh_interval)),
            log_file: args.log_file,
        })
    }
}

impl Settings {
    pub fn build_client(&self) -> Result<WeatherClient, ConfigError> {
        WeatherClient::new(self.client.clone()).map_err(|e| ConfigError::HttpClient(e.to_string()))
    }

    pub fn build_locator(&self) -> Result<Locator, ConfigError> {
        Ok(match self.locator {
            LocatorChoice::Ip => Locator::Ip(
                IpLocator::new(self.client.timeout)
                    .map_err(|e| ConfigError::HttpClient(e.to_string()))?,
            ),
            LocatorChoice::Fixed(coords) => Locator::Fixed(coords),
            LocatorChoice::Off => Locator::Disabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(args: &[&str]) -> Result<Settings, ConfigError> {
        let argv = std::iter::once("weatherhub").chain(args.iter().copied());
        Settings::try_from(Args::try_parse_from(argv).expect("args parse"))
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).expect("valid");
        assert_eq!(settings.city, "London");
        assert_eq!(settings.unit, TempUnit::Celsius);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.locator, LocatorChoice::Ip);
        assert!(!settings.allow_location);
        assert_eq!(settings.refresh_interval, Some(Duration::from_secs(300)));
        assert_eq!(settings.client.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_preferences() {
        let settings = settings(&[
            "--city",
            "  Oslo ",
            "--units",
            "fahrenheit",
            "--theme",
            "dark",
            "--allow-location",
            "--refresh-interval",
            "0",
        ])
        .expect("valid");
        assert_eq!(settings.city, "Oslo");
        assert_eq!(settings.unit, TempUnit::Fahrenheit);
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.allow_location);
        assert_eq!(settings.refresh_interval, None);
    }

    #[test]
    fn test_fixed_locator() {
        let settings =
            settings(&["--locator", "fixed", "--lat", "-33.87", "--lon", "151.21"]).expect("valid");
        assert_eq!(
            settings.locator,
            LocatorChoice::Fixed(Coordinates::new(-33.87, 151.21))
        );
    }

    #[test]
    fn test_fixed_locator_needs_both_coordinates() {
        assert_eq!(
            settings(&["--locator", "fixed", "--lat", "10"]).unwrap_err(),
            ConfigError::MissingCoordinates
        );
    }

    #[test]
    fn test_fixed_locator_range_checked() {
        assert!(matches!(
            settings(&["--locator", "fixed", "--lat", "91", "--lon", "0"]),
            Err(ConfigError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_rejects_blank_city_and_zero_timeout() {
        assert_eq!(settings(&["--city", "  "]).unwrap_err(), ConfigError::EmptyCity);
        assert_eq!(settings(&["--timeout", "0"]).unwrap_err(), ConfigError::ZeroTimeout);
    }

    #[test]
    fn test_unknown_unit_rejected_by_parser() {
        assert!(Args::try_parse_from(["weatherhub", "--units", "kelvin"]).is_err());
    }

    #[tokio::test]
    async fn test_build_locator() {
        let off = settings(&["--locator", "off"]).expect("valid");
        assert!(matches!(off.build_locator(), Ok(Locator::Disabled)));
    }
}
