use crate::{
    model::{Language, Location},
    query::{self, Query, QueryItem},
};

/// Endpoint on the WeatherKit REST API.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Data sets the service offers at a location.
    Availability(Location),
    /// Combined weather data for one or more data sets.
    Weather(Language, Location),
}

impl Route {
    /// Path segments relative to the API base URL, unescaped.
    ///
    /// The language is one opaque segment; escaping happens when the segments
    /// are joined onto the base URL.
    pub fn segments(&self) -> Vec<String> {
        match self {
            Route::Availability(location) => vec![
                "availability".to_string(),
                location.latitude.to_string(),
                location.longitude.to_string(),
            ],
            Route::Weather(language, location) => vec![
                "weather".to_string(),
                language.as_str().to_string(),
                location.latitude.to_string(),
                location.longitude.to_string(),
            ],
        }
    }
}

/// A route plus the query parameters that go with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTarget {
    pub route: Route,
    pub query_items: Vec<QueryItem>,
}

/// Resolve a single query against a location.
///
/// Weather-lane queries get the `dataSets` item naming their data set plus
/// their own parameters; availability gets only its country.
pub fn resolve(query: &Query, location: Location, language: &Language) -> RequestTarget {
    match query {
        Query::Availability { country_code } => availability_target(location, country_code),
        _ => weather_target(std::slice::from_ref(query), location, language),
    }
}

pub fn availability_target(location: Location, country_code: &str) -> RequestTarget {
    RequestTarget {
        route: Route::Availability(location),
        query_items: vec![(query::params::COUNTRY, country_code.to_string())],
    }
}

/// One target for a batch of weather-lane queries sharing a single request.
pub fn weather_target(queries: &[Query], location: Location, language: &Language) -> RequestTarget {
    RequestTarget {
        route: Route::Weather(language.clone(), location),
        query_items: query::combined_query_items(queries),
    }
}
