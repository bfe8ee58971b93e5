//! Core library for the `weatherkit` CLI.
//!
//! This crate defines:
//! - The query model and the routes of the WeatherKit REST API
//! - An authenticated, decode-on-GET network client
//! - Concurrent fetching of several data sets merged into one result
//! - Configuration & credentials handling
//!
//! It is used by `weatherkit-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod route;
pub mod service;
pub mod weather;

pub use client::{HttpTransport, NetworkClient, ReqwestTransport};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Language, Location, WeatherSeverity};
pub use query::{DataSet, Query};
pub use route::{RequestTarget, Route};
pub use service::{ServiceConfiguration, TokenProvider, WeatherService};
pub use weather::PartialWeather;
