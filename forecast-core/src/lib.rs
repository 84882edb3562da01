//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Request validation and encoding for the OpenWeather endpoints
//! - Normalization of the current, daily and group response shapes
//! - A `ForecastFetcher` tying the pieces together over a pluggable HTTP transport
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod parser;
pub mod request;
pub mod transport;

pub use config::{Config, Credentials};
pub use error::FetchError;
pub use fetcher::ForecastFetcher;
pub use model::{
    CityObservation, CityRequest, DailyForecastEntry, DailyForecastSet, Forecast, ForecastKind,
    GroupForecastSet, UnitSystem, WeatherObservation,
};
pub use request::{WeatherQuery, build_request};
pub use transport::{ReqwestTransport, Transport};
