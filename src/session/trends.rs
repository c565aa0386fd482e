use tracing::{debug, error};

use super::metrics_load::MetricsSlot;
use super::{InsightJob, MetricsJob, MetricsLoad, RequestGeneration, RequestToken};
use crate::climate_api::{Endpoints, FetchError, LoadError, TextRequest};
use crate::insight::{self, INSIGHT_ERROR, INSIGHT_LOADING};
use crate::metrics::{CountryMetrics, TargetYear};
use crate::prompts;

/// Card shown after a chart point is clicked. Replaced wholesale on every change.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Interaction that produced this card.
    pub token: RequestToken,
    pub country: String,
    pub likelihood: f64,
    pub year: TargetYear,
    pub insight: String,
    /// Screen position of the clicked point.
    pub x: f32,
    pub y: f32,
    /// True until the insight request resolves.
    pub pending: bool,
}

/// State of the trend chart screen.
#[derive(Debug)]
pub struct TrendsSession {
    endpoints: Endpoints,
    point_limit: usize,
    generation: RequestGeneration,
    metrics: MetricsSlot,
    tooltip: Option<Tooltip>,
}

impl TrendsSession {
    pub fn new(endpoints: Endpoints, point_limit: usize) -> Self {
        Self {
            endpoints,
            point_limit,
            generation: RequestGeneration::default(),
            metrics: MetricsSlot::default(),
            tooltip: None,
        }
    }

    pub fn mount(&mut self) -> Option<MetricsJob> {
        self.metrics.mount(&mut self.generation)
    }

    pub fn reload(&mut self) -> MetricsJob {
        self.tooltip = None;
        self.metrics.reload(&mut self.generation)
    }

    pub fn finish_metrics_load(
        &mut self,
        token: RequestToken,
        result: Result<CountryMetrics, LoadError>,
    ) -> bool {
        self.metrics.finish("trends", token, result)
    }

    pub fn metrics(&self) -> &MetricsLoad {
        &self.metrics.state
    }

    /// Likelihoods plotted on the chart, in table order.
    pub fn chart_values(&self) -> &[f64] {
        self.metrics
            .state
            .metrics()
            .map(|metrics| metrics.chart_values(self.point_limit))
            .unwrap_or(&[])
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Show a loading card for chart point `index` and return its insight request.
    ///
    /// Returns `None` when the index is not plotted or the request URL cannot be
    /// built; in the latter case the card already shows the error text.
    pub fn begin_point_click(&mut self, index: usize, x: f32, y: f32) -> Option<InsightJob> {
        if index >= self.chart_values().len() {
            return None;
        }
        let metric = self.metrics.state.metrics()?.get(index)?;
        let token = self.generation.next();
        let prompt = prompts::point_insight_prompt(&metric);
        let request = self.endpoints.insight(&prompt).map(TextRequest::json);
        let (insight, pending) = match &request {
            Ok(_) => (INSIGHT_LOADING.to_string(), true),
            Err(err) => {
                error!("Error building insight request: {err}");
                (INSIGHT_ERROR.to_string(), false)
            }
        };
        self.tooltip = Some(Tooltip {
            token,
            country: metric.name,
            likelihood: metric.likelihood,
            year: metric.target_year,
            insight,
            x,
            y,
            pending,
        });
        let request = request.ok()?;
        Some(InsightJob { token, request })
    }

    /// Apply a resolved point insight. Returns false when a newer click superseded it.
    pub fn finish_point_insight(
        &mut self,
        token: RequestToken,
        result: Result<String, FetchError>,
    ) -> bool {
        let Some(current) = self.tooltip.as_ref() else {
            return false;
        };
        if current.token != token {
            debug!(
                token = token.get(),
                current = current.token.get(),
                "Dropping stale point insight"
            );
            return false;
        }
        let insight = match result {
            Ok(body) => {
                debug!(%body, "Raw point insight response");
                insight::interpret_insight(&body)
            }
            Err(err) => {
                error!("Error fetching AI insight: {err}");
                INSIGHT_ERROR.to_string()
            }
        };
        let mut resolved = current.clone();
        resolved.insight = insight;
        resolved.pending = false;
        self.tooltip = Some(resolved);
        true
    }

    pub fn dismiss_tooltip(&mut self) {
        self.tooltip = None;
    }
}
