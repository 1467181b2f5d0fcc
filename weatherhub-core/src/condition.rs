//! Condition code → presentation category

/// Presentation category for a provider condition code.
///
/// The mapping is total: codes the table does not know fall back to
/// [`ConditionCategory::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    /// Mist, smoke, haze, dust, fog, sand, ash, squall, tornado
    Atmosphere,
    Thunderstorm,
    #[default]
    Unknown,
}

impl ConditionCategory {
    /// Map a condition code (any case) to its category.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" => Self::Rain,
            "drizzle" => Self::Drizzle,
            "snow" => Self::Snow,
            "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" | "squall"
            | "tornado" => Self::Atmosphere,
            "thunderstorm" => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::Clouds => "☁",
            Self::Rain => "🌧",
            Self::Drizzle => "🌦",
            Self::Snow => "❄",
            Self::Atmosphere => "🌫",
            Self::Thunderstorm => "⛈",
            Self::Unknown => "☁",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Snow => "Snow",
            Self::Atmosphere => "Low visibility",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Weather",
        }
    }
}
