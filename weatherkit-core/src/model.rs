use serde::{Deserialize, Serialize};
use std::fmt;

pub mod api;
pub mod iso8601;
pub mod severity;

pub use api::{
    ApiWeather, CurrentWeather, DailyForecast, DayWeatherConditions, HourWeatherConditions,
    HourlyForecast, Metadata, MinuteWeatherConditions, NextHourForecast, WeatherAlertCollection,
    WeatherAlertSummary,
};
pub use severity::WeatherSeverity;

/// A resolved geographic position. Bounds are not validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Language tag for localized weather content, e.g. "en" or "de-DE".
///
/// Passed through to the service verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language(String);

impl Language {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
