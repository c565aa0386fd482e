//! Client for the CarbonFlo backend.
//!
//! Two GET endpoints: the per-country likelihood table and the text-insight
//! proxy. Requests are single attempts; callers decide how failures surface.

mod client;
mod endpoints;

pub use client::{ClimateApi, HttpFetcher, LoadError};
pub use endpoints::Endpoints;

/// One outgoing GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRequest {
    pub url: String,
    /// Send `Content-Type: application/json`. Inert on a GET, kept for parity
    /// between the chart and contribution flows.
    pub json_content_type: bool,
}

impl TextRequest {
    pub fn plain(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            json_content_type: false,
        }
    }

    pub fn json(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            json_content_type: true,
        }
    }
}

/// Failure to obtain a response body.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Failed to read response: {0}")]
    Read(#[from] std::io::Error),
}

/// Source of raw response bodies.
///
/// Implemented over HTTP for the app and by scripted fakes in tests.
pub trait TextFetcher: Send + Sync {
    fn fetch_text(&self, request: &TextRequest) -> Result<String, FetchError>;
}

impl<T: TextFetcher + ?Sized> TextFetcher for std::sync::Arc<T> {
    fn fetch_text(&self, request: &TextRequest) -> Result<String, FetchError> {
        (**self).fetch_text(request)
    }
}
