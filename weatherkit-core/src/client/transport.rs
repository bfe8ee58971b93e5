use async_trait::async_trait;
use reqwest::{
    Client, Url,
    header::{AUTHORIZATION, HeaderValue},
};
use std::{fmt::Debug, time::Duration};

use crate::error::{Error, Result};

/// Raw outcome of one GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a single authenticated GET and hands back the bytes.
///
/// Implementations send exactly one request per call and never retry.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &Url, authorization: &str) -> Result<HttpResponse>;
}

/// Transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, timeout })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url, authorization: &str) -> Result<HttpResponse> {
        let mut value = HeaderValue::from_str(authorization).map_err(|_| Error::InvalidToken)?;
        value.set_sensitive(true);

        let res = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, value)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = res.status().as_u16();
        let body = res.bytes().await.map_err(|e| self.classify(e))?;

        Ok(HttpResponse { status, body: body.to_vec() })
    }
}

impl ReqwestTransport {
    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() { Error::Timeout(self.timeout) } else { Error::Transport(err) }
    }
}
