use tracing::error;

use super::{RequestGeneration, RequestToken};
use crate::climate_api::LoadError;
use crate::metrics::CountryMetrics;

/// Alert text shown when the contribution screen cannot list countries.
pub const COUNTRY_LOAD_ALERT: &str = "Could not load countries. Check your backend.";

/// Country table lifecycle for one screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MetricsLoad {
    /// Screen not shown yet.
    #[default]
    Idle,
    Loading(RequestToken),
    Ready(CountryMetrics),
    Failed(String),
}

impl MetricsLoad {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn metrics(&self) -> Option<&CountryMetrics> {
        match self {
            Self::Ready(metrics) => Some(metrics),
            _ => None,
        }
    }
}

/// Request to fetch the country table for one screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricsJob {
    pub token: RequestToken,
}

/// Load bookkeeping shared by both sessions.
#[derive(Debug, Default)]
pub(super) struct MetricsSlot {
    pub(super) state: MetricsLoad,
}

impl MetricsSlot {
    /// Start a load on first display; later calls are no-ops.
    pub(super) fn mount(&mut self, generation: &mut RequestGeneration) -> Option<MetricsJob> {
        if self.state != MetricsLoad::Idle {
            return None;
        }
        Some(self.reload(generation))
    }

    /// Start a load unconditionally, superseding any in flight.
    pub(super) fn reload(&mut self, generation: &mut RequestGeneration) -> MetricsJob {
        let token = generation.next();
        self.state = MetricsLoad::Loading(token);
        MetricsJob { token }
    }

    /// Returns false when `token` is not the load in flight.
    pub(super) fn finish(
        &mut self,
        screen: &str,
        token: RequestToken,
        result: Result<CountryMetrics, LoadError>,
    ) -> bool {
        if self.state != MetricsLoad::Loading(token) {
            tracing::debug!(screen, token = token.get(), "Dropping stale country load");
            return false;
        }
        self.state = match result {
            Ok(metrics) => MetricsLoad::Ready(metrics),
            Err(err) => {
                error!(screen, "Error fetching country data: {err}");
                MetricsLoad::Failed(err.to_string())
            }
        };
        true
    }
}
