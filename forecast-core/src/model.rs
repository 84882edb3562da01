use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::FetchError;

/// Which upstream endpoint (and therefore which response shape) is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastKind {
    #[default]
    Current,
    Daily,
    Group,
}

impl ForecastKind {
    /// Endpoint path relative to the configured base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ForecastKind::Current => "weather",
            ForecastKind::Daily => "forecast/daily",
            ForecastKind::Group => "group",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastKind::Current => "current",
            ForecastKind::Daily => "daily",
            ForecastKind::Group => "group",
        }
    }
}

impl std::fmt::Display for ForecastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement convention requested from upstream. Not interpreted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Standard,
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Standard => "standard",
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = FetchError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "standard" => Ok(UnitSystem::Standard),
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(FetchError::InvalidRequest(format!(
                "Unknown unit system '{value}'. Supported: standard, metric, imperial."
            ))),
        }
    }
}

/// One city id, or an ordered list of them for group requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityRequest {
    Single(u64),
    Many(Vec<u64>),
}

impl From<u64> for CityRequest {
    fn from(id: u64) -> Self {
        CityRequest::Single(id)
    }
}

impl From<Vec<u64>> for CityRequest {
    fn from(ids: Vec<u64>) -> Self {
        CityRequest::Many(ids)
    }
}

impl From<&[u64]> for CityRequest {
    fn from(ids: &[u64]) -> Self {
        CityRequest::Many(ids.to_vec())
    }
}

/// Fields shared by the current-weather and group shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityObservation {
    /// Short condition group, e.g. "Rain".
    pub main: String,
    pub description: String,
    pub current_temp: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: u16,
    /// Cloud coverage in percent.
    pub clouds: u8,
    pub forecast_time: DateTime<Utc>,
    pub sunrise_time: DateTime<Utc>,
    pub sunset_time: DateTime<Utc>,
    pub city_name: String,
    pub country: String,
}

/// Output of the current-weather endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    #[serde(flatten)]
    pub observation: CityObservation,
    /// Last-hour rain volume, 0 when upstream reports none.
    pub rain: f64,
    /// Last-hour snow volume, 0 when upstream reports none.
    pub snow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub forecast_time: DateTime<Utc>,
    pub sunrise_time: DateTime<Utc>,
    pub sunset_time: DateTime<Utc>,
    pub day_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub night_temp: f64,
    pub eve_temp: f64,
    pub morning_temp: f64,
    pub day_feels_like: f64,
    pub night_feels_like: f64,
    pub eve_feels_like: f64,
    pub morning_feels_like: f64,
    pub pressure: f64,
    pub humidity: u8,
    pub main: String,
    pub description: String,
    pub wind_speed: f64,
    pub wind_direction: u16,
    /// Probability of precipitation, 0.0..=1.0.
    pub precipitation_probability: f64,
    pub rain: f64,
    pub snow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastSet {
    pub city_name: String,
    pub country: String,
    pub forecasts: Vec<DailyForecastEntry>,
}

/// City name -> observation. Group responses carry no precipitation.
pub type GroupForecastSet = BTreeMap<String, CityObservation>;

/// A normalized response, one variant per [`ForecastKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Forecast {
    Current(WeatherObservation),
    Daily(DailyForecastSet),
    Group(GroupForecastSet),
}

impl Forecast {
    pub fn kind(&self) -> ForecastKind {
        match self {
            Forecast::Current(_) => ForecastKind::Current,
            Forecast::Daily(_) => ForecastKind::Daily,
            Forecast::Group(_) => ForecastKind::Group,
        }
    }
}
