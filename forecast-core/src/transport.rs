use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Debug;
use tracing::warn;

use crate::error::FetchError;

/// Query string pairs in the order they are sent.
pub type QueryParams = [(&'static str, String)];

/// The single HTTP GET the fetcher needs. Swappable so tests never touch the network.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get_json(&self, url: &str, query: &QueryParams) -> Result<Value, FetchError>;
}

/// `reqwest`-backed transport. Timeouts and TLS are whatever the wrapped client is built with.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get_json(&self, url: &str, query: &QueryParams) -> Result<Value, FetchError> {
        let res = self.http.get(url).query(query).send().await.map_err(|err| {
            warn!(url, error = %err, "OpenWeather request failed");
            FetchError::Transport(format!("Failed to send request to {url}: {err}"))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            warn!(url, %status, error = %err, "Failed to read OpenWeather response body");
            FetchError::Transport(format!("Failed to read response body: {err}"))
        })?;

        if !status.is_success() {
            warn!(url, %status, "OpenWeather returned an error status");
            return Err(FetchError::Transport(format!(
                "Request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|err| {
            warn!(url, error = %err, "OpenWeather response is not JSON");
            FetchError::Transport(format!("Response is not JSON ({err}): {}", truncate_body(&body)))
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
