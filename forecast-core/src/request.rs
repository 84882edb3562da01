use crate::{
    error::FetchError,
    model::{CityRequest, ForecastKind, UnitSystem},
};

/// A validated upstream request: endpoint path plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub endpoint: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl WeatherQuery {
    /// Query parameter lookup, mostly useful in tests and logs.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }

    /// Join `base_url` and the endpoint with exactly one `/`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.endpoint)
    }
}

/// Validate the city/kind combination and encode it as an upstream query.
///
/// Group requests need a list of ids (even a single one); every other kind needs exactly
/// one id. No I/O happens here.
pub fn build_request(
    city: &CityRequest,
    kind: ForecastKind,
    units: UnitSystem,
    api_key: &str,
) -> Result<WeatherQuery, FetchError> {
    let id = match (kind, city) {
        (ForecastKind::Group, CityRequest::Many(ids)) => {
            ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",")
        }
        (ForecastKind::Group, CityRequest::Single(_)) => {
            return Err(FetchError::InvalidRequest(
                "Group forecast requires a list of city identifiers".to_string(),
            ));
        }
        (_, CityRequest::Many(_)) => {
            return Err(FetchError::InvalidRequest(
                "non-Group forecast requires a single city identifier".to_string(),
            ));
        }
        (_, CityRequest::Single(id)) => id.to_string(),
    };

    Ok(WeatherQuery {
        endpoint: kind.endpoint(),
        params: vec![
            ("id", id),
            ("appid", api_key.to_string()),
            ("units", units.as_str().to_string()),
        ],
    })
}
