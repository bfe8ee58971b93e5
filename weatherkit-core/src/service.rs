use chrono::{DateTime, Duration, Utc};
use std::{fmt, sync::Arc};
use tracing::info;

use crate::{
    client::NetworkClient,
    error::Result,
    model::{Language, Location},
    query::{DataSet, Query},
    weather::PartialWeather,
};

/// Supplies the bearer token for each request. Called once per fetch.
pub type TokenProvider = Arc<dyn Fn() -> String + Send + Sync>;

/// Days of daily forecast requested by [`WeatherService::weather`].
pub const DAILY_FORECAST_DAYS: i64 = 10;

/// Hours of hourly forecast requested by [`WeatherService::weather`].
pub const HOURLY_FORECAST_HOURS: i64 = 24;

#[derive(Clone)]
pub struct ServiceConfiguration {
    pub token: TokenProvider,
    pub language: Language,
}

impl ServiceConfiguration {
    pub fn new(token: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self { token: Arc::new(token), language: Language::default() }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

impl fmt::Debug for ServiceConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfiguration")
            .field("token", &"<provider>")
            .field("language", &self.language)
            .finish()
    }
}

/// Entry point for fetching weather for a location.
#[derive(Debug, Clone)]
pub struct WeatherService {
    configuration: ServiceConfiguration,
    network: NetworkClient,
}

impl WeatherService {
    pub fn new(configuration: ServiceConfiguration, network: NetworkClient) -> Self {
        Self { configuration, network }
    }

    /// Every data set, including alerts for `country_code`, with daily and
    /// hourly forecasts starting now.
    pub async fn weather(&self, location: Location, country_code: &str) -> Result<PartialWeather> {
        let queries = full_queries(country_code, Utc::now());
        self.weather_including(location, &queries).await
    }

    /// Only the requested data sets.
    pub async fn weather_including(
        &self,
        location: Location,
        queries: &[Query],
    ) -> Result<PartialWeather> {
        let token = (self.configuration.token)();
        let weather = self
            .network
            .fetch_weather(location, &self.configuration.language, queries, &token)
            .await?;

        info!(%location, data_sets = weather.data_sets().len(), "fetched weather");
        Ok(weather)
    }

    /// Data sets the service offers at a location.
    pub async fn availability(&self, location: Location, country_code: &str) -> Result<Vec<DataSet>> {
        let token = (self.configuration.token)();
        self.network.fetch_availability(location, country_code, &token).await
    }
}

/// The batch behind [`WeatherService::weather`].
pub fn full_queries(country_code: &str, now: DateTime<Utc>) -> Vec<Query> {
    vec![
        Query::Current,
        Query::Minute,
        Query::hourly(now, now + Duration::hours(HOURLY_FORECAST_HOURS)),
        Query::daily(now, now + Duration::days(DAILY_FORECAST_DAYS)),
        Query::alerts(country_code),
        Query::availability(country_code),
    ]
}

/// Queries for the given data sets with default forecast windows.
pub fn queries_for(data_sets: &[DataSet], country_code: &str, now: DateTime<Utc>) -> Vec<Query> {
    data_sets
        .iter()
        .map(|ds| match ds {
            DataSet::CurrentWeather => Query::Current,
            DataSet::ForecastNextHour => Query::Minute,
            DataSet::ForecastHourly => Query::hourly(now, now + Duration::hours(HOURLY_FORECAST_HOURS)),
            DataSet::ForecastDaily => Query::daily(now, now + Duration::days(DAILY_FORECAST_DAYS)),
            DataSet::WeatherAlerts => Query::alerts(country_code),
            DataSet::Availability => Query::availability(country_code),
        })
        .collect()
}
