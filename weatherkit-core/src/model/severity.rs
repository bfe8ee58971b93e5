use serde::{Deserialize, Serialize};
use std::fmt;

/// Threat level reported on a weather alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSeverity {
    /// "Minimal" or no threat to life or property.
    Minor,
    /// "Possible" threat to life or property.
    Moderate,
    /// "Significant" threat to life or property.
    Severe,
    /// "Extraordinary" threat to life or property.
    Extreme,
    #[serde(other)]
    Unknown,
}

impl WeatherSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSeverity::Minor => "minor",
            WeatherSeverity::Moderate => "moderate",
            WeatherSeverity::Severe => "severe",
            WeatherSeverity::Extreme => "extreme",
            WeatherSeverity::Unknown => "unknown",
        }
    }

    pub const fn all() -> &'static [WeatherSeverity] {
        &[
            WeatherSeverity::Minor,
            WeatherSeverity::Moderate,
            WeatherSeverity::Severe,
            WeatherSeverity::Extreme,
            WeatherSeverity::Unknown,
        ]
    }
}

impl fmt::Display for WeatherSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
