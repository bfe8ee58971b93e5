//! Partial weather results and how they merge.
//!
//! Every concurrent fetch produces a [`PartialWeather`] holding only the data
//! sets it was asked for. The orchestrator folds them together with
//! [`PartialWeather::combined`], starting from [`PartialWeather::empty`].
//!
//! The availability request and the combined weather request fill disjoint
//! fields, so the fold gives the same value whatever order the requests
//! finish in. Merging two results that both carry the same data set is
//! outside that contract; the left-hand value is kept.

use serde::{Deserialize, Serialize};

use crate::{
    model::{
        ApiWeather, CurrentWeather, DailyForecast, HourlyForecast, NextHourForecast,
        WeatherAlertCollection,
    },
    query::DataSet,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialWeather {
    pub current: Option<CurrentWeather>,
    pub minute: Option<NextHourForecast>,
    pub hourly: Option<HourlyForecast>,
    pub daily: Option<DailyForecast>,
    pub alerts: Option<WeatherAlertCollection>,
    pub availability: Option<Vec<DataSet>>,
}

impl PartialWeather {
    /// No data gathered yet. Identity for [`PartialWeather::combined`].
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Merge two partial results field by field, keeping `self`'s value when
    /// both sides carry the same field.
    pub fn combined(self, other: PartialWeather) -> PartialWeather {
        PartialWeather {
            current: self.current.or(other.current),
            minute: self.minute.or(other.minute),
            hourly: self.hourly.or(other.hourly),
            daily: self.daily.or(other.daily),
            alerts: self.alerts.or(other.alerts),
            availability: self.availability.or(other.availability),
        }
    }

    /// Wrap the data sets reported by the availability endpoint.
    pub fn from_availability(data_sets: Vec<DataSet>) -> Self {
        Self { availability: Some(data_sets), ..Self::empty() }
    }

    /// Data sets actually present in this result.
    pub fn data_sets(&self) -> Vec<DataSet> {
        let present = [
            (DataSet::CurrentWeather, self.current.is_some()),
            (DataSet::ForecastDaily, self.daily.is_some()),
            (DataSet::ForecastHourly, self.hourly.is_some()),
            (DataSet::ForecastNextHour, self.minute.is_some()),
            (DataSet::WeatherAlerts, self.alerts.is_some()),
            (DataSet::Availability, self.availability.is_some()),
        ];

        present.into_iter().filter(|(_, p)| *p).map(|(ds, _)| ds).collect()
    }
}

impl From<ApiWeather> for PartialWeather {
    fn from(weather: ApiWeather) -> Self {
        Self {
            current: weather.current_weather,
            minute: weather.forecast_next_hour,
            hourly: weather.forecast_hourly,
            daily: weather.forecast_daily,
            alerts: weather.weather_alerts,
            availability: None,
        }
    }
}
