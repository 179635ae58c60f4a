//! Weather catalog mapping wttr.in glyph codes to scene artwork.

use anyhow::{anyhow, Result};

/// The weather conditions the scene artwork covers.
///
/// Each condition carries a wttr.in glyph code, a display name, the background
/// it is painted on, and an optional full-frame overlay (rain, snow, fog).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    PartlyCloudy,
    Thunderstorm,
    LightRain,
    Rainy,
    LightSnow,
    Snowy,
    Stormy,
    Foggy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 10] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::PartlyCloudy,
        WeatherCondition::Thunderstorm,
        WeatherCondition::LightRain,
        WeatherCondition::Rainy,
        WeatherCondition::LightSnow,
        WeatherCondition::Snowy,
        WeatherCondition::Stormy,
        WeatherCondition::Foggy,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::LightRain => "Light Rain",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::LightSnow => "Light Snow",
            WeatherCondition::Snowy => "Snowy",
            WeatherCondition::Stormy => "Stormy",
            WeatherCondition::Foggy => "Foggy",
        }
    }

    /// The single-glyph code wttr.in answers with for `?format=%c`.
    pub fn glyph(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "☀️",
            WeatherCondition::Cloudy => "☁️",
            WeatherCondition::PartlyCloudy => "⛅️",
            WeatherCondition::Thunderstorm => "⛈",
            WeatherCondition::LightRain => "🌦",
            WeatherCondition::Rainy => "🌧",
            WeatherCondition::LightSnow => "🌨",
            WeatherCondition::Snowy => "❄",
            WeatherCondition::Stormy => "🌩",
            WeatherCondition::Foggy => "🌫",
        }
    }

    /// Background artwork identifier (`wallpaper_{background}.png`).
    pub fn background(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::PartlyCloudy => "partlycloudy",
            WeatherCondition::Thunderstorm => "stormy",
            WeatherCondition::LightRain => "cloudy",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::LightSnow => "cloudy",
            WeatherCondition::Snowy => "snowy",
            WeatherCondition::Stormy => "stormy",
            WeatherCondition::Foggy => "cloudy",
        }
    }

    /// Overlay artwork identifier (`overlay_wallpaper_{overlay}.png`), if any.
    pub fn overlay(self) -> Option<&'static str> {
        match self {
            WeatherCondition::Thunderstorm | WeatherCondition::LightRain | WeatherCondition::Rainy => {
                Some("rainy")
            }
            WeatherCondition::LightSnow | WeatherCondition::Snowy => Some("snowy"),
            WeatherCondition::Foggy => Some("foggy"),
            _ => None,
        }
    }

    /// Look up a condition by its wttr.in glyph code.
    ///
    /// Whitespace and surrounding quotes are stripped first; wttr.in answers
    /// with a quoted, padded glyph.
    pub fn from_glyph(code: &str) -> Result<Self> {
        let code = code.trim().trim_matches('"').trim();
        Self::ALL
            .iter()
            .copied()
            .find(|condition| condition.glyph() == code)
            .ok_or_else(|| anyhow!("unknown weather code: {code:?}"))
    }

    /// Look up a condition by display name, case-insensitively.
    pub fn from_display_name(name: &str) -> Result<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|condition| condition.display_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("unknown weather name: {name:?}"))
    }
}

impl Default for WeatherCondition {
    fn default() -> Self {
        // The fallback when detection fails; a safe middle-of-the-road sky.
        WeatherCondition::PartlyCloudy
    }
}

/// How the caller wants the weather decided, resolved exactly once before the
/// scene is built.
#[derive(Clone, Debug)]
pub enum WeatherInput {
    /// Ask the online provider for the current weather.
    Auto,
    /// Use this condition as-is.
    Condition(WeatherCondition),
    /// Resolve a display name through the catalog.
    DisplayName(String),
}
