//! CarbonFlo: climate commitment tracker.
//!
//! Loads per-country likelihoods of meeting Paris Agreement goals from the
//! CarbonFlo backend and requests short AI-written insights about a country or
//! about a user's own actions.

/// Application directories under the OS config root.
pub mod app_dirs;
/// Backend endpoints and the HTTP fetcher.
pub mod climate_api;
/// Persisted settings.
pub mod config;
/// egui front-end.
pub mod egui_app;
pub(crate) mod http_client;
/// Tolerant decoding of insight responses.
pub mod insight;
pub mod logging;
/// Country likelihood table.
pub mod metrics;
pub mod prompts;
/// Screen state and interaction flows.
pub mod session;
