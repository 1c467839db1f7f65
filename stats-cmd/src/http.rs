//! Chart data over HTTP with `reqwest`.

use log::debug;
use stats_core::{DataSource, FilterParams, Result, StatsError};

/// `DataSource` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn transport(err: reqwest::Error) -> StatsError {
    StatsError::Transport(err.to_string())
}

impl DataSource for HttpSource {
    async fn get_json(&self, url: &str, params: &FilterParams) -> Result<serde_json::Value> {
        let query: Vec<(&str, &str)> = params.iter().collect();
        debug!("GET {} {:?}", url, query);
        let body = self
            .client
            .get(url)
            .query(&query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .text()
            .await
            .map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| StatsError::InvalidPayload(e.to_string()))
    }
}
