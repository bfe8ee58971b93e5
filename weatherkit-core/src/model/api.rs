//! Wire shapes returned by the WeatherKit REST API.
//!
//! Only the fields this client reads are modeled; unknown fields are ignored,
//! but every modeled field must be present (or explicitly optional) and every
//! date must be strict ISO-8601.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::severity::WeatherSeverity;

/// Body of `GET /weather/{language}/{latitude}/{longitude}`.
///
/// Each data set is present only if it was requested and the service had it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWeather {
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
    #[serde(default)]
    pub forecast_daily: Option<DailyForecast>,
    #[serde(default)]
    pub forecast_hourly: Option<HourlyForecast>,
    #[serde(default)]
    pub forecast_next_hour: Option<NextHourForecast>,
    #[serde(default)]
    pub weather_alerts: Option<WeatherAlertCollection>,
}

/// Descriptive information shared by every data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(rename = "attributionURL", default)]
    pub attribution_url: Option<String>,
    #[serde(with = "crate::model::iso8601")]
    pub expire_time: DateTime<Utc>,
    #[serde(with = "crate::model::iso8601")]
    pub read_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub metadata: Metadata,
    #[serde(with = "crate::model::iso8601")]
    pub as_of: DateTime<Utc>,
    pub cloud_cover: f64,
    pub condition_code: String,
    #[serde(default)]
    pub daylight: bool,
    pub humidity: f64,
    pub pressure: f64,
    pub temperature: f64,
    pub temperature_apparent: f64,
    pub uv_index: u8,
    pub visibility: f64,
    #[serde(default)]
    pub wind_direction: Option<u16>,
    #[serde(default)]
    pub wind_gust: Option<f64>,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub metadata: Metadata,
    pub days: Vec<DayWeatherConditions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWeatherConditions {
    #[serde(with = "crate::model::iso8601")]
    pub forecast_start: DateTime<Utc>,
    #[serde(with = "crate::model::iso8601")]
    pub forecast_end: DateTime<Utc>,
    pub condition_code: String,
    pub max_uv_index: u8,
    #[serde(default)]
    pub moon_phase: Option<String>,
    pub precipitation_amount: f64,
    pub precipitation_chance: f64,
    pub precipitation_type: String,
    #[serde(default, with = "crate::model::iso8601::option")]
    pub sunrise: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::model::iso8601::option")]
    pub sunset: Option<DateTime<Utc>>,
    pub temperature_max: f64,
    pub temperature_min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub metadata: Metadata,
    pub hours: Vec<HourWeatherConditions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourWeatherConditions {
    #[serde(with = "crate::model::iso8601")]
    pub forecast_start: DateTime<Utc>,
    pub cloud_cover: f64,
    pub condition_code: String,
    #[serde(default)]
    pub daylight: bool,
    pub humidity: f64,
    pub precipitation_amount: f64,
    pub precipitation_chance: f64,
    pub precipitation_type: String,
    pub pressure: f64,
    pub temperature: f64,
    pub temperature_apparent: f64,
    pub uv_index: u8,
    #[serde(default)]
    pub wind_direction: Option<u16>,
    #[serde(default)]
    pub wind_gust: Option<f64>,
    pub wind_speed: f64,
}

/// Minute-by-minute precipitation for the next hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextHourForecast {
    pub metadata: Metadata,
    #[serde(default, with = "crate::model::iso8601::option")]
    pub forecast_start: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::model::iso8601::option")]
    pub forecast_end: Option<DateTime<Utc>>,
    pub minutes: Vec<MinuteWeatherConditions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinuteWeatherConditions {
    #[serde(with = "crate::model::iso8601")]
    pub start_time: DateTime<Utc>,
    pub precipitation_chance: f64,
    pub precipitation_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlertCollection {
    pub alerts: Vec<WeatherAlertSummary>,
    #[serde(default)]
    pub details_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlertSummary {
    pub id: String,
    #[serde(default)]
    pub area_name: Option<String>,
    pub country_code: String,
    pub description: String,
    #[serde(with = "crate::model::iso8601")]
    pub effective_time: DateTime<Utc>,
    #[serde(with = "crate::model::iso8601")]
    pub expire_time: DateTime<Utc>,
    #[serde(with = "crate::model::iso8601")]
    pub issued_time: DateTime<Utc>,
    pub details_url: String,
    pub severity: WeatherSeverity,
    pub source: String,
}
