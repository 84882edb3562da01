use serde::Deserialize;
use serde_json::Value;

use super::{OwObservation, from_raw};
use crate::{error::FetchError, model::WeatherObservation};

/// Precipitation block on the `weather` endpoint. Only the last-hour volume is used.
#[derive(Debug, Deserialize)]
struct OwPrecipitation {
    #[serde(rename = "1h")]
    one_hour: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(flatten)]
    observation: OwObservation,
    rain: Option<OwPrecipitation>,
    snow: Option<OwPrecipitation>,
}

/// Normalize a `weather` document. Absent `rain`/`snow` blocks become a zero volume.
pub fn parse(raw: Value) -> Result<WeatherObservation, FetchError> {
    let parsed: OwCurrentResponse = from_raw(raw, "current weather")?;

    let rain = parsed.rain.map(|p| p.one_hour).unwrap_or(0.0);
    let snow = parsed.snow.map(|p| p.one_hour).unwrap_or(0.0);

    Ok(WeatherObservation {
        observation: parsed.observation.into_observation()?,
        rain,
        snow,
    })
}
