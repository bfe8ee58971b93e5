//! Authenticated access to the WeatherKit REST API.
//!
//! [`NetworkClient::fetch_weather`] splits a batch of queries into at most two
//! concurrent requests: the availability endpoint, and one combined weather
//! request carrying every other data set. Results are folded into a
//! [`PartialWeather`] as they arrive. The first failure ends the whole fetch
//! and drops whatever request is still in flight.

use futures::{FutureExt, TryStreamExt, future::BoxFuture, stream::FuturesUnordered};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result, truncate_body},
    model::{ApiWeather, Language, Location},
    query::{DataSet, Query, QueryItem},
    route::{self, Route},
    weather::PartialWeather,
};

pub mod transport;

#[cfg(test)]
mod mock;

pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

pub const DEFAULT_BASE_URL: &str = "https://weatherkit.apple.com/api/v1";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const BEARER: &str = "Bearer";

#[derive(Debug, Clone)]
pub struct NetworkClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    timeout: Duration,
}

impl NetworkClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport, base_url: DEFAULT_BASE_URL.to_string(), timeout: DEFAULT_TIMEOUT }
    }

    /// Client over the default `reqwest` transport.
    pub fn with_reqwest() -> Result<Self> {
        let transport = ReqwestTransport::new(DEFAULT_TIMEOUT)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Data sets the service offers for a location.
    ///
    /// Names this client does not model are skipped. An empty list is a valid
    /// answer.
    pub async fn fetch_availability(
        &self,
        location: Location,
        country_code: &str,
        token: &str,
    ) -> Result<Vec<DataSet>> {
        let target = route::availability_target(location, country_code);
        let names: Vec<String> = self.get(&target.route, &target.query_items, token).await?;

        let data_sets = names
            .iter()
            .filter_map(|name| match name.parse::<DataSet>() {
                Ok(ds) => Some(ds),
                Err(_) => {
                    debug!(data_set = %name, "skipping unsupported data set");
                    None
                }
            })
            .collect();

        Ok(data_sets)
    }

    /// Fetch every requested data set and merge the results.
    pub async fn fetch_weather(
        &self,
        location: Location,
        language: &Language,
        queries: &[Query],
        token: &str,
    ) -> Result<PartialWeather> {
        let (availability, rest) = split_availability(queries);

        let mut lanes: FuturesUnordered<BoxFuture<'_, Result<PartialWeather>>> =
            FuturesUnordered::new();

        if let Some(country_code) = availability {
            debug!(%location, country_code, "scheduling availability request");
            lanes.push(
                async move {
                    let data_sets = self.fetch_availability(location, country_code, token).await?;
                    Ok(PartialWeather::from_availability(data_sets))
                }
                .boxed(),
            );
        }

        if !rest.is_empty() {
            let target = route::weather_target(&rest, location, language);
            debug!(%location, queries = rest.len(), "scheduling weather request");
            lanes.push(
                async move {
                    let weather: ApiWeather =
                        self.get(&target.route, &target.query_items, token).await?;
                    Ok(PartialWeather::from(weather))
                }
                .boxed(),
            );
        }

        // Dropping `lanes` on the first error cancels the other request.
        let mut weather = PartialWeather::empty();
        while let Some(partial) = lanes.try_next().await? {
            weather = weather.combined(partial);
        }

        debug!(%location, data_sets = ?weather.data_sets(), "weather fetch complete");
        Ok(weather)
    }

    /// Issue one authenticated GET and decode the JSON body as `T`.
    pub async fn get<T>(&self, route: &Route, query_items: &[QueryItem], token: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(route, query_items)?;
        let authorization = format!("{BEARER} {token}");

        debug!(path = url.path(), query = url.query().unwrap_or(""), "GET");

        let response = tokio::time::timeout(self.timeout, self.transport.get(&url, &authorization))
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: truncate_body(&String::from_utf8_lossy(&response.body)),
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| Error::Decode {
            source,
            body: truncate_body(&String::from_utf8_lossy(&response.body)),
        })
    }

    /// Full URL for a route. With no query items the route URL is returned as is.
    ///
    /// Route segments are percent-encoded one by one, so a language tag can
    /// never add path segments, a query or a fragment.
    pub fn url_for(&self, route: &Route, query_items: &[QueryItem]) -> Result<Url> {
        let base = &self.base_url;
        let mut url = Url::parse(base).map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{base}: cannot be a base URL")))?
            .pop_if_empty()
            .extend(route.segments());

        if !query_items.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query_items.iter().map(|(name, value)| (*name, value.as_str())));
        }

        Ok(url)
    }
}

/// Take the first availability query out of the batch.
///
/// Later availability queries are dropped; only one availability request is
/// made per fetch.
fn split_availability(queries: &[Query]) -> (Option<&str>, Vec<Query>) {
    let mut country = None;
    let mut rest = Vec::with_capacity(queries.len());

    for query in queries {
        match query {
            Query::Availability { country_code } if country.is_none() => {
                country = Some(country_code.as_str());
            }
            Query::Availability { country_code } => {
                warn!(country_code = %country_code, "ignoring duplicate availability query");
            }
            other => rest.push(other.clone()),
        }
    }

    (country, rest)
}
