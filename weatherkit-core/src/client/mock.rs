//! Recording transport that answers like the WeatherKit API.
//!
//! Weather requests get one JSON object per requested data set that is in the
//! `include` set; availability requests get the `include` set as a list.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Value, json};
use std::{
    collections::HashSet,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use super::transport::{HttpResponse, HttpTransport};
use crate::{error::Result, query::DataSet};

#[derive(Debug, Clone)]
pub enum Reply {
    /// Serve fixture data.
    Data,
    Status(u16, &'static str),
    /// Serve this body with status 200.
    Body(&'static str),
    /// Never answer.
    Hang,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: Url,
    pub authorization: String,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<String> {
        self.url.query_pairs().find(|(k, _)| k == name).map(|(_, v)| v.into_owned())
    }

    pub fn param_names(&self) -> Vec<String> {
        self.url.query_pairs().map(|(k, _)| k.into_owned()).collect()
    }
}

#[derive(Debug)]
pub struct MockTransport {
    include: HashSet<DataSet>,
    availability: (Reply, Duration),
    weather: (Reply, Duration),
    requests: Mutex<Vec<RecordedRequest>>,
    cancelled: AtomicUsize,
}

impl MockTransport {
    pub fn new(include: &[DataSet]) -> Self {
        Self {
            include: include.iter().copied().collect(),
            availability: (Reply::Data, Duration::ZERO),
            weather: (Reply::Data, Duration::ZERO),
            requests: Mutex::new(Vec::new()),
            cancelled: AtomicUsize::new(0),
        }
    }

    pub fn with_availability(mut self, reply: Reply, delay: Duration) -> Self {
        self.availability = (reply, delay);
        self
    }

    pub fn with_weather(mut self, reply: Reply, delay: Duration) -> Self {
        self.weather = (reply, delay);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, prefix: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.url.path().contains(prefix)).collect()
    }

    /// Requests dropped before they answered.
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn availability_body(&self) -> Value {
        let mut names: Vec<&str> = DataSet::all()
            .iter()
            .filter(|ds| self.include.contains(*ds) && **ds != DataSet::Availability)
            .map(DataSet::as_str)
            .collect();
        names.push("weatherChanges");
        json!(names)
    }

    fn weather_body(&self, request: &RecordedRequest) -> Value {
        let requested = request.param("dataSets").unwrap_or_default();
        let mut body = serde_json::Map::new();

        for name in requested.split(',').filter(|s| !s.is_empty()) {
            let Ok(ds) = name.parse::<DataSet>() else { continue };
            if self.include.contains(&ds) {
                body.insert(ds.as_str().to_string(), fixture(ds));
            }
        }

        Value::Object(body)
    }
}

struct CancelGuard<'a>(&'a AtomicUsize);

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &Url, authorization: &str) -> Result<HttpResponse> {
        let request = RecordedRequest { url: url.clone(), authorization: authorization.to_string() };
        self.requests.lock().unwrap().push(request.clone());

        let is_availability = url.path().contains("/availability/");
        let (reply, delay) = if is_availability { &self.availability } else { &self.weather };

        let guard = CancelGuard(&self.cancelled);
        if !delay.is_zero() {
            tokio::time::sleep(*delay).await;
        }

        let response = match reply {
            Reply::Data => {
                let body =
                    if is_availability { self.availability_body() } else { self.weather_body(&request) };
                HttpResponse { status: 200, body: body.to_string().into_bytes() }
            }
            Reply::Status(status, body) => {
                HttpResponse { status: *status, body: body.as_bytes().to_vec() }
            }
            Reply::Body(body) => HttpResponse { status: 200, body: body.as_bytes().to_vec() },
            Reply::Hang => std::future::pending::<HttpResponse>().await,
        };

        std::mem::forget(guard);
        Ok(response)
    }
}

fn metadata() -> Value {
    json!({
        "attributionURL": "https://developer.apple.com/weatherkit/data-source-attribution/",
        "expireTime": "2024-06-01T12:05:00Z",
        "readTime": "2024-06-01T12:00:00Z",
        "latitude": 0.0,
        "longitude": 0.0,
        "units": "m",
        "version": 1
    })
}

/// Payload for one data set as the weather endpoint returns it.
pub fn fixture(data_set: DataSet) -> Value {
    match data_set {
        DataSet::CurrentWeather => json!({
            "name": "CurrentWeather",
            "metadata": metadata(),
            "asOf": "2024-06-01T12:00:00Z",
            "cloudCover": 0.25,
            "conditionCode": "MostlyClear",
            "daylight": true,
            "humidity": 0.61,
            "pressure": 1013.2,
            "temperature": 26.4,
            "temperatureApparent": 28.1,
            "uvIndex": 8,
            "visibility": 24000.0,
            "windDirection": 210,
            "windGust": 7.9,
            "windSpeed": 4.2
        }),
        DataSet::ForecastDaily => json!({
            "name": "DailyForecast",
            "metadata": metadata(),
            "days": [{
                "forecastStart": "2024-06-01T00:00:00Z",
                "forecastEnd": "2024-06-02T00:00:00Z",
                "conditionCode": "PartlyCloudy",
                "maxUvIndex": 9,
                "moonPhase": "waningCrescent",
                "precipitationAmount": 0.0,
                "precipitationChance": 0.05,
                "precipitationType": "clear",
                "sunrise": "2024-06-01T05:54:00Z",
                "sunset": "2024-06-01T18:09:00Z",
                "temperatureMax": 29.8,
                "temperatureMin": 22.3
            }]
        }),
        DataSet::ForecastHourly => json!({
            "name": "HourlyForecast",
            "metadata": metadata(),
            "hours": [{
                "forecastStart": "2024-06-01T12:00:00Z",
                "cloudCover": 0.3,
                "conditionCode": "MostlyClear",
                "daylight": true,
                "humidity": 0.6,
                "precipitationAmount": 0.0,
                "precipitationChance": 0.0,
                "precipitationType": "clear",
                "pressure": 1013.0,
                "temperature": 26.0,
                "temperatureApparent": 27.5,
                "uvIndex": 8,
                "windDirection": 200,
                "windSpeed": 4.0
            }]
        }),
        DataSet::ForecastNextHour => json!({
            "name": "NextHourForecast",
            "metadata": metadata(),
            "forecastStart": "2024-06-01T12:00:00Z",
            "forecastEnd": "2024-06-01T13:00:00Z",
            "minutes": [
                { "startTime": "2024-06-01T12:00:00Z", "precipitationChance": 0.0, "precipitationIntensity": 0.0 },
                { "startTime": "2024-06-01T12:01:00Z", "precipitationChance": 0.1, "precipitationIntensity": 0.2 }
            ]
        }),
        DataSet::WeatherAlerts => json!({
            "detailsUrl": "https://weatherkit.apple.com/alertDetails/index.html",
            "alerts": [{
                "id": "f3a1c2d4",
                "areaName": "Coastal Plain",
                "countryCode": "US",
                "description": "Excessive Heat Warning",
                "effectiveTime": "2024-06-01T10:00:00Z",
                "expireTime": "2024-06-02T01:00:00Z",
                "issuedTime": "2024-06-01T09:00:00Z",
                "detailsUrl": "https://weatherkit.apple.com/alertDetails/f3a1c2d4",
                "severity": "severe",
                "source": "National Weather Service"
            }]
        }),
        DataSet::Availability => Value::Null,
    }
}
