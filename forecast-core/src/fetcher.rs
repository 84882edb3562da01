use tracing::debug;

use crate::{
    config::{Config, Credentials},
    error::FetchError,
    model::{CityRequest, Forecast, ForecastKind, UnitSystem},
    parser,
    request::build_request,
    transport::{QueryParams, ReqwestTransport, Transport},
};

/// Build request -> one GET -> parse. Holds no per-call state, so one instance can serve
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct ForecastFetcher<T = ReqwestTransport> {
    credentials: Credentials,
    transport: T,
}

impl ForecastFetcher<ReqwestTransport> {
    /// Fetcher backed by a default `reqwest` client. Fails before any I/O if the config is
    /// incomplete.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(config.credentials()?, ReqwestTransport::new()))
    }
}

impl<T: Transport> ForecastFetcher<T> {
    pub fn new(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Fetch and normalize one forecast.
    ///
    /// `city` must be a list for [`ForecastKind::Group`] and a single id otherwise.
    pub async fn fetch(
        &self,
        city: impl Into<CityRequest>,
        kind: ForecastKind,
        units: UnitSystem,
    ) -> Result<Forecast, FetchError> {
        let city = city.into();
        let query = build_request(&city, kind, units, &self.credentials.api_key)?;
        let url = query.url(&self.credentials.base_url);

        debug!(%kind, %units, ids = query.param("id"), %url, "Requesting forecast");

        let raw = self.transport.get_json(&url, &query.params).await?;
        let forecast = parser::parse(kind, raw)?;

        debug!(kind = %forecast.kind(), records = record_count(&forecast), "Parsed forecast");
        Ok(forecast)
    }
}

fn record_count(forecast: &Forecast) -> usize {
    match forecast {
        Forecast::Current(_) => 1,
        Forecast::Daily(set) => set.forecasts.len(),
        Forecast::Group(set) => set.len(),
    }
}
