use std::sync::Arc;

use tracing::{debug, warn};

use super::{Endpoints, FetchError, TextFetcher, TextRequest};
use crate::config::AppSettings;
use crate::http_client;
use crate::metrics::{self, CountryMetrics, MetricsError};

/// `TextFetcher` backed by a `ureq` agent.
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    max_response_bytes: usize,
}

impl HttpFetcher {
    pub fn new(settings: &crate::config::NetworkSettings) -> Self {
        Self {
            agent: http_client::build_agent(settings),
            max_response_bytes: settings.max_response_bytes,
        }
    }
}

impl TextFetcher for HttpFetcher {
    /// Non-2xx statuses still yield their body; interpretation is the caller's job.
    fn fetch_text(&self, request: &TextRequest) -> Result<String, FetchError> {
        let mut call = self.agent.get(&request.url);
        if request.json_content_type {
            call = call.set("Content-Type", "application/json");
        }
        let response = match call.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                warn!(status = code, url = %request.url, "Server returned an error status");
                response
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(FetchError::Transport(err.to_string()));
            }
        };
        let bytes = http_client::read_response_bytes(response, self.max_response_bytes)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Failure loading the country table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] MetricsError),
}

/// Backend facade shared by both screens and the CLI.
#[derive(Clone)]
pub struct ClimateApi {
    fetcher: Arc<dyn TextFetcher>,
    endpoints: Endpoints,
}

impl ClimateApi {
    pub fn new(fetcher: Arc<dyn TextFetcher>, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// HTTP-backed client for the configured server.
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(
            Arc::new(HttpFetcher::new(&settings.network)),
            Endpoints::new(settings.server.base_url.clone()),
        )
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetch and decode `?country=all`.
    pub fn fetch_metrics(&self) -> Result<CountryMetrics, LoadError> {
        let request = TextRequest::plain(self.endpoints.all_countries()?);
        let body = self.fetcher.fetch_text(&request)?;
        let decoded = metrics::parse_metrics(&body)?;
        debug!(countries = decoded.len(), "Loaded country metrics");
        Ok(decoded)
    }

    /// Build the insight GET for `prompt` without sending it.
    pub fn insight_request(
        &self,
        prompt: &str,
        json_content_type: bool,
    ) -> Result<TextRequest, FetchError> {
        let url = self.endpoints.insight(prompt)?;
        Ok(TextRequest {
            url,
            json_content_type,
        })
    }

    /// Ask the insight endpoint about `prompt` and return the raw body.
    pub fn fetch_insight(
        &self,
        prompt: &str,
        json_content_type: bool,
    ) -> Result<String, FetchError> {
        let request = self.insight_request(prompt, json_content_type)?;
        self.fetch(&request)
    }

    /// Send a prepared request and return the raw body.
    pub fn fetch(&self, request: &TextRequest) -> Result<String, FetchError> {
        self.fetcher.fetch_text(request)
    }
}
