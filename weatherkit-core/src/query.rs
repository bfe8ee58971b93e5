use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::warn;

use crate::model::iso8601;

/// Query parameter names understood by the service.
pub mod params {
    pub const DATA_SETS: &str = "dataSets";
    pub const COUNTRY: &str = "country";
    pub const DAILY_START: &str = "dailyStart";
    pub const DAILY_END: &str = "dailyEnd";
    pub const HOURLY_START: &str = "hourlyStart";
    pub const HOURLY_END: &str = "hourlyEnd";
}

/// A name/value pair appended to a request URL.
pub type QueryItem = (&'static str, String);

/// Identifier of one category of weather data, as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataSet {
    CurrentWeather,
    ForecastDaily,
    ForecastHourly,
    ForecastNextHour,
    WeatherAlerts,
    Availability,
}

impl DataSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSet::CurrentWeather => "currentWeather",
            DataSet::ForecastDaily => "forecastDaily",
            DataSet::ForecastHourly => "forecastHourly",
            DataSet::ForecastNextHour => "forecastNextHour",
            DataSet::WeatherAlerts => "weatherAlerts",
            DataSet::Availability => "availability",
        }
    }

    pub const fn all() -> &'static [DataSet] {
        &[
            DataSet::CurrentWeather,
            DataSet::ForecastDaily,
            DataSet::ForecastHourly,
            DataSet::ForecastNextHour,
            DataSet::WeatherAlerts,
            DataSet::Availability,
        ]
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSet {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DataSet::all()
            .iter()
            .copied()
            .find(|ds| ds.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown data set '{value}'. Supported data sets: currentWeather, \
                     forecastDaily, forecastHourly, forecastNextHour, weatherAlerts, availability."
                )
            })
    }
}

/// One requested category of weather data and the parameters it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Alerts { country_code: String },
    Current,
    Daily { start: DateTime<Utc>, end: DateTime<Utc> },
    Hourly { start: DateTime<Utc>, end: DateTime<Utc> },
    Minute,
    Availability { country_code: String },
}

impl Query {
    pub fn alerts(country_code: impl Into<String>) -> Self {
        Query::Alerts { country_code: country_code.into() }
    }

    pub fn daily(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Query::Daily { start, end }
    }

    pub fn hourly(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Query::Hourly { start, end }
    }

    pub fn availability(country_code: impl Into<String>) -> Self {
        Query::Availability { country_code: country_code.into() }
    }

    pub fn data_set(&self) -> DataSet {
        match self {
            Query::Alerts { .. } => DataSet::WeatherAlerts,
            Query::Current => DataSet::CurrentWeather,
            Query::Daily { .. } => DataSet::ForecastDaily,
            Query::Hourly { .. } => DataSet::ForecastHourly,
            Query::Minute => DataSet::ForecastNextHour,
            Query::Availability { .. } => DataSet::Availability,
        }
    }

    /// Parameters this query contributes on top of its data set name.
    pub fn query_items(&self) -> Vec<QueryItem> {
        match self {
            Query::Alerts { country_code } | Query::Availability { country_code } => {
                vec![(params::COUNTRY, country_code.clone())]
            }
            Query::Daily { start, end } => vec![
                (params::DAILY_START, iso8601::format(start)),
                (params::DAILY_END, iso8601::format(end)),
            ],
            Query::Hourly { start, end } => vec![
                (params::HOURLY_START, iso8601::format(start)),
                (params::HOURLY_END, iso8601::format(end)),
            ],
            Query::Current | Query::Minute => Vec::new(),
        }
    }
}

/// Combined parameters for a batch sharing one weather request.
///
/// All data set names go into a single comma-separated `dataSets` item,
/// followed by every query's own parameters in batch order. Each parameter
/// name appears once; when two queries disagree on a value the first wins.
pub fn combined_query_items(queries: &[Query]) -> Vec<QueryItem> {
    if queries.is_empty() {
        return Vec::new();
    }

    let mut data_sets: Vec<&'static str> = Vec::with_capacity(queries.len());
    for ds in queries.iter().map(|q| q.data_set().as_str()) {
        if !data_sets.contains(&ds) {
            data_sets.push(ds);
        }
    }

    let mut items = vec![(params::DATA_SETS, data_sets.join(","))];
    for (name, value) in queries.iter().flat_map(Query::query_items) {
        let kept = items.iter().find(|(existing, _)| *existing == name).map(|(_, v)| v.clone());
        match kept {
            None => items.push((name, value)),
            Some(kept) if kept != value => {
                warn!(param = name, %kept, ignored = %value, "ignoring conflicting query parameter");
            }
            Some(_) => {}
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn data_set_as_str_roundtrip() {
        for ds in DataSet::all() {
            let parsed: DataSet = ds.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*ds, parsed);
        }
    }

    #[test]
    fn unknown_data_set_error() {
        let err = "pollen".parse::<DataSet>().unwrap_err();
        assert!(err.to_string().contains("Unknown data set"));
    }

    #[test]
    fn every_query_maps_to_one_data_set() {
        assert_eq!(Query::alerts("US").data_set(), DataSet::WeatherAlerts);
        assert_eq!(Query::Current.data_set(), DataSet::CurrentWeather);
        assert_eq!(Query::daily(day(1), day(2)).data_set(), DataSet::ForecastDaily);
        assert_eq!(Query::hourly(day(1), day(2)).data_set(), DataSet::ForecastHourly);
        assert_eq!(Query::Minute.data_set(), DataSet::ForecastNextHour);
        assert_eq!(Query::availability("US").data_set(), DataSet::Availability);
    }

    #[test]
    fn date_ranges_are_iso_formatted() {
        let items = Query::daily(day(1), day(5)).query_items();
        assert_eq!(
            items,
            vec![
                ("dailyStart", "2024-03-01T00:00:00Z".to_string()),
                ("dailyEnd", "2024-03-05T00:00:00Z".to_string()),
            ]
        );
    }

    #[test]
    fn country_code_passes_through_verbatim() {
        assert_eq!(Query::alerts("us").query_items(), vec![("country", "us".to_string())]);
        assert_eq!(Query::availability("GB").query_items(), vec![("country", "GB".to_string())]);
        assert!(Query::Current.query_items().is_empty());
        assert!(Query::Minute.query_items().is_empty());
    }

    #[test]
    fn combined_items_union_every_query() {
        let items = combined_query_items(&[
            Query::daily(day(1), day(2)),
            Query::hourly(day(3), day(4)),
            Query::alerts("US"),
        ]);

        assert_eq!(
            items,
            vec![
                ("dataSets", "forecastDaily,forecastHourly,weatherAlerts".to_string()),
                ("dailyStart", "2024-03-01T00:00:00Z".to_string()),
                ("dailyEnd", "2024-03-02T00:00:00Z".to_string()),
                ("hourlyStart", "2024-03-03T00:00:00Z".to_string()),
                ("hourlyEnd", "2024-03-04T00:00:00Z".to_string()),
                ("country", "US".to_string()),
            ]
        );
    }

    #[test]
    fn combined_items_skip_repeats() {
        let items = combined_query_items(&[Query::Current, Query::Current, Query::Minute]);
        assert_eq!(items, vec![("dataSets", "currentWeather,forecastNextHour".to_string())]);
    }

    #[test]
    fn conflicting_parameters_keep_the_first_value() {
        let items = combined_query_items(&[
            Query::daily(day(1), day(2)),
            Query::daily(day(3), day(4)),
            Query::alerts("US"),
            Query::alerts("CA"),
        ]);

        assert_eq!(
            items,
            vec![
                ("dataSets", "forecastDaily,weatherAlerts".to_string()),
                ("dailyStart", "2024-03-01T00:00:00Z".to_string()),
                ("dailyEnd", "2024-03-02T00:00:00Z".to_string()),
                ("country", "US".to_string()),
            ]
        );
    }

    #[test]
    fn combined_items_of_empty_batch_is_empty() {
        assert!(combined_query_items(&[]).is_empty());
    }
}
