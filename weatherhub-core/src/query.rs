//! Query resolution: user intent → request descriptor

use std::fmt;

use crate::error::LookupError;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// A validated lookup ready to be sent to the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryDescriptor {
    /// Look up by city name (already trimmed, never empty).
    Name(String),
    /// Look up by position. Coordinates come from a locator and are not validated.
    Coords(Coordinates),
}

impl QueryDescriptor {
    pub fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "name:{name}"),
            Self::Coords(coords) => write!(f, "coords:{coords}"),
        }
    }
}

/// Resolve submitted search text into a name-mode descriptor.
///
/// Empty input falls back to `last_city` (a bare submit refreshes the current
/// city). Input that is present but blank is rejected, as is a blank fallback.
pub fn resolve_name(input: &str, last_city: &str) -> Result<QueryDescriptor, LookupError> {
    let candidate = if input.is_empty() { last_city } else { input };
    let name = candidate.trim();
    if name.is_empty() {
        return Err(LookupError::Validation);
    }
    Ok(QueryDescriptor::Name(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_trims() {
        assert_eq!(
            resolve_name("  Paris ", "London"),
            Ok(QueryDescriptor::Name("Paris".into()))
        );
    }

    #[test]
    fn test_empty_input_falls_back_to_last_city() {
        assert_eq!(
            resolve_name("", "London"),
            Ok(QueryDescriptor::Name("London".into()))
        );
    }

    #[test]
    fn test_whitespace_input_is_rejected() {
        assert_eq!(resolve_name("   ", "London"), Err(LookupError::Validation));
        assert_eq!(resolve_name("\t\n", "London"), Err(LookupError::Validation));
    }

    #[test]
    fn test_empty_fallback_is_rejected() {
        assert_eq!(resolve_name("", ""), Err(LookupError::Validation));
        assert_eq!(resolve_name("", "  "), Err(LookupError::Validation));
    }

    #[test]
    fn test_coordinates_range() {
        assert!(Coordinates::new(51.5, -0.12).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(
            QueryDescriptor::Name("Oslo".into()).to_string(),
            "name:Oslo"
        );
        assert_eq!(
            QueryDescriptor::Coords(Coordinates::new(1.0, 2.5)).to_string(),
            "coords:1.0000, 2.5000"
        );
    }
}
