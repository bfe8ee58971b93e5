use std::time::Duration;

use thiserror::Error;

/// Failures of a single request against the WeatherKit API.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The service answered with a non-success status.
    #[error("WeatherKit request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body did not match the expected shape.
    #[error("failed to decode WeatherKit response: {source} (body: {body})")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("bearer token contains characters not allowed in an HTTP header")]
    InvalidToken,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Shorten a response body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
