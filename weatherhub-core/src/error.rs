//! Error taxonomy for weather lookups
//!
//! Every failure that can end a lookup is converted into a [`LookupError`]
//! before it reaches state. The enum is `Clone + PartialEq` so it can travel
//! inside actions and be stored in [`UiState`](crate::state::UiState).

use thiserror::Error;

/// Why a lookup did not produce a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Empty or whitespace-only city name.
    #[error("empty city name")]
    Validation,

    /// No provider credential was configured.
    #[error("API key not configured")]
    Credential,

    /// The provider does not know the requested location (HTTP 404).
    #[error("location not found")]
    NotFound,

    /// The provider rejected the credential (HTTP 401).
    #[error("API key rejected")]
    Auth,

    /// Transport, timeout, unexpected status or malformed body.
    #[error("request failed: {0}")]
    Network(String),

    #[error("geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),

    /// Any failure of a lookup by position. The inner error is kept for logs.
    #[error("location weather lookup failed: {0}")]
    LocationWeather(Box<LookupError>),
}

impl LookupError {
    /// User-facing message shown in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation => "Please enter a city name".to_string(),
            Self::Credential => {
                "API key not configured. Set OPENWEATHER_API_KEY or pass --api-key.".to_string()
            }
            Self::NotFound => {
                "City not found. Please check the spelling and try again.".to_string()
            }
            Self::Auth => "Invalid API key. Please check your configuration.".to_string(),
            Self::Network(_) => "Failed to fetch weather data. Please try again.".to_string(),
            Self::Geolocation(e) => e.user_message().to_string(),
            Self::LocationWeather(_) => {
                "Failed to fetch location weather. Please try again.".to_string()
            }
        }
    }

    /// Classify an HTTP transport error.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network("request timed out".to_string())
        } else if err.is_decode() {
            Self::Network(format!("malformed response: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Failures of the geolocation capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The user declined to share their location.
    #[error("permission denied")]
    Denied,

    /// No locator is configured for this session.
    #[error("geolocation unsupported")]
    Unsupported,

    /// The locator was asked but could not produce a position.
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

impl GeolocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Denied => "Location access denied",
            Self::Unsupported => "Geolocation is not supported in this session",
            Self::Unavailable(_) => "Unable to determine your location",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct_per_kind() {
        let messages = [
            LookupError::Validation.user_message(),
            LookupError::Credential.user_message(),
            LookupError::NotFound.user_message(),
            LookupError::Auth.user_message(),
            LookupError::Network("boom".into()).user_message(),
            LookupError::Geolocation(GeolocationError::Denied).user_message(),
            LookupError::Geolocation(GeolocationError::Unsupported).user_message(),
            LookupError::LocationWeather(Box::new(LookupError::NotFound)).user_message(),
        ];

        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_validation_message() {
        assert_eq!(
            LookupError::Validation.user_message(),
            "Please enter a city name"
        );
    }

    #[test]
    fn test_network_message_hides_details() {
        let err = LookupError::Network("connection reset by peer".into());
        assert!(!err.user_message().contains("reset"));
        assert!(err.user_message().contains("Failed to fetch"));
    }

    #[test]
    fn test_geolocation_converts() {
        let err: LookupError = GeolocationError::Unsupported.into();
        assert_eq!(err, LookupError::Geolocation(GeolocationError::Unsupported));
    }
}
