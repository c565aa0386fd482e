//! Per-screen state and the two interaction flows.
//!
//! Sessions never perform I/O. They hand out jobs tagged with a
//! [`RequestToken`]; whoever owns the fetcher runs the job and feeds the
//! result back. Results whose token is no longer current are dropped, so the
//! latest interaction wins regardless of completion order.

mod contribution;
mod generation;
mod metrics_load;
mod trends;

pub use contribution::{ContributionSession, MISSING_INPUT_TITLE, ValidationError};
pub use generation::{RequestGeneration, RequestToken};
pub use metrics_load::{COUNTRY_LOAD_ALERT, MetricsJob, MetricsLoad};
pub use trends::{Tooltip, TrendsSession};

use crate::climate_api::TextRequest;

/// Insight request produced by an interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsightJob {
    pub token: RequestToken,
    pub request: TextRequest,
}
