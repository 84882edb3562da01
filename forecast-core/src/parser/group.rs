use serde::Deserialize;
use serde_json::Value;

use super::{OwObservation, from_raw};
use crate::{error::FetchError, model::GroupForecastSet};

#[derive(Debug, Deserialize)]
struct OwGroupResponse {
    list: Vec<OwObservation>,
}

/// Normalize a `group` document into a map keyed by city name.
///
/// Cities sharing a name collapse to the one listed last.
pub fn parse(raw: Value) -> Result<GroupForecastSet, FetchError> {
    let parsed: OwGroupResponse = from_raw(raw, "group")?;

    let mut forecasts = GroupForecastSet::new();
    for city in parsed.list {
        let observation = city.into_observation()?;
        forecasts.insert(observation.city_name.clone(), observation);
    }

    Ok(forecasts)
}
