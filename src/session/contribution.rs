use tracing::{debug, error};

use super::metrics_load::MetricsSlot;
use super::{InsightJob, MetricsJob, MetricsLoad, RequestGeneration, RequestToken};
use crate::climate_api::{Endpoints, FetchError, LoadError, TextRequest};
use crate::insight::{self, INSIGHT_ERROR};
use crate::metrics::CountryMetrics;
use crate::prompts;

/// Title of the alert raised by [`ValidationError`].
pub const MISSING_INPUT_TITLE: &str = "Missing input";

/// Submission rejected before any request is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a country and describe your actions.")]
    NoCountry,
    #[error("Please select a country and describe your actions.")]
    NoActions,
}

/// State of the "your contribution" screen.
#[derive(Debug)]
pub struct ContributionSession {
    endpoints: Endpoints,
    generation: RequestGeneration,
    metrics: MetricsSlot,
    selected_country: Option<String>,
    actions: String,
    pending: Option<RequestToken>,
    response: Option<String>,
}

impl ContributionSession {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            generation: RequestGeneration::default(),
            metrics: MetricsSlot::default(),
            selected_country: None,
            actions: String::new(),
            pending: None,
            response: None,
        }
    }

    pub fn mount(&mut self) -> Option<MetricsJob> {
        self.metrics.mount(&mut self.generation)
    }

    pub fn reload(&mut self) -> MetricsJob {
        self.metrics.reload(&mut self.generation)
    }

    pub fn finish_metrics_load(
        &mut self,
        token: RequestToken,
        result: Result<CountryMetrics, LoadError>,
    ) -> bool {
        self.metrics.finish("contribution", token, result)
    }

    pub fn metrics(&self) -> &MetricsLoad {
        &self.metrics.state
    }

    /// Country names offered by the picker, in table order.
    pub fn countries(&self) -> &[String] {
        self.metrics
            .state
            .metrics()
            .map(CountryMetrics::names)
            .unwrap_or(&[])
    }

    pub fn selected_country(&self) -> Option<&str> {
        self.selected_country.as_deref()
    }

    /// `None` restores the "choose a country" placeholder.
    pub fn select_country(&mut self, country: Option<String>) {
        self.selected_country = country;
    }

    pub fn actions_mut(&mut self) -> &mut String {
        &mut self.actions
    }

    pub fn set_actions(&mut self, actions: impl Into<String>) {
        self.actions = actions.into();
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Validate the form and start a request.
    ///
    /// `Ok(None)` means nothing needs sending: a request is already in flight,
    /// or the URL could not be built and the error text is already shown.
    pub fn submit(&mut self) -> Result<Option<InsightJob>, ValidationError> {
        if self.is_loading() {
            return Ok(None);
        }
        let country = match self.selected_country.as_deref() {
            Some(country) if !country.trim().is_empty() => country,
            _ => return Err(ValidationError::NoCountry),
        };
        if self.actions.trim().is_empty() {
            return Err(ValidationError::NoActions);
        }

        let prompt = prompts::contribution_prompt(country, &self.actions);
        self.response = None;
        match self.endpoints.insight(&prompt) {
            Ok(url) => {
                let token = self.generation.next();
                self.pending = Some(token);
                Ok(Some(InsightJob {
                    token,
                    request: TextRequest::plain(url),
                }))
            }
            Err(err) => {
                error!("Error building insight request: {err}");
                self.response = Some(INSIGHT_ERROR.to_string());
                Ok(None)
            }
        }
    }

    /// Apply a resolved submission. Returns false for results no longer awaited.
    pub fn finish_submission(
        &mut self,
        token: RequestToken,
        result: Result<String, FetchError>,
    ) -> bool {
        if self.pending != Some(token) {
            debug!(token = token.get(), "Dropping stale contribution response");
            return false;
        }
        self.pending = None;
        self.response = Some(match result {
            Ok(body) => {
                debug!(%body, "Raw contribution response");
                insight::interpret_insight(&body)
            }
            Err(err) => {
                error!("Error getting AI response: {err}");
                INSIGHT_ERROR.to_string()
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::parse_metrics;

    fn session() -> ContributionSession {
        let mut session = ContributionSession::new(Endpoints::new("http://localhost:8000"));
        let job = session.mount().unwrap();
        let metrics = parse_metrics(
            r#"{"Peru": {"likelihood":40,"year":2060}, "Chad": {"likelihood":20,"year":2080}}"#,
        )
        .unwrap();
        session.finish_metrics_load(job.token, Ok(metrics));
        session
    }

    #[test]
    fn lists_countries_in_table_order() {
        assert_eq!(session().countries(), ["Peru", "Chad"]);
    }

    #[test]
    fn requires_a_country() {
        let mut session = session();
        session.set_actions("recycled");
        assert_eq!(session.submit(), Err(ValidationError::NoCountry));
        assert!(!session.is_loading());
    }

    #[test]
    fn requires_non_blank_actions() {
        let mut session = session();
        session.select_country(Some("Peru".into()));
        session.set_actions(" \n\t ");
        assert_eq!(session.submit(), Err(ValidationError::NoActions));
        assert!(!session.is_loading());
    }

    #[test]
    fn validation_message_matches_alert_text() {
        assert_eq!(
            ValidationError::NoActions.to_string(),
            "Please select a country and describe your actions."
        );
    }

    #[test]
    fn submit_builds_request_and_marks_loading() {
        let mut session = session();
        session.select_country(Some("Peru".into()));
        session.set_actions("took the bus");
        let job = session.submit().unwrap().unwrap();
        assert!(session.is_loading());
        assert!(session.response().is_none());
        assert!(!job.request.json_content_type);
        assert!(job.request.url.contains("from+Peru+and"));
        assert!(job.request.url.contains("took+the+bus"));
    }

    #[test]
    fn second_submit_while_loading_is_ignored() {
        let mut session = session();
        session.select_country(Some("Peru".into()));
        session.set_actions("composted");
        let first = session.submit().unwrap();
        assert!(first.is_some());
        assert_eq!(session.submit(), Ok(None));
    }

    #[test]
    fn resolution_shows_interpreted_text() {
        let mut session = session();
        session.select_country(Some("Chad".into()));
        session.set_actions("solar panels");
        let job = session.submit().unwrap().unwrap();
        assert!(session.finish_submission(job.token, Ok("You helped a bit!".into())));
        assert_eq!(session.response(), Some("You helped a bit!"));
        assert!(!session.is_loading());
    }

    #[test]
    fn failure_shows_error_string() {
        let mut session = session();
        session.select_country(Some("Chad".into()));
        session.set_actions("solar panels");
        let job = session.submit().unwrap().unwrap();
        session.finish_submission(job.token, Err(FetchError::Transport("timeout".into())));
        assert_eq!(session.response(), Some(INSIGHT_ERROR));
    }

    #[test]
    fn unknown_token_is_ignored() {
        let mut session = session();
        session.select_country(Some("Chad".into()));
        session.set_actions("solar panels");
        let job = session.submit().unwrap().unwrap();
        session.finish_submission(job.token, Ok("first".into()));
        assert!(!session.finish_submission(job.token, Ok("again".into())));
        assert_eq!(session.response(), Some("first"));
    }

    #[test]
    fn new_submission_clears_previous_response() {
        let mut session = session();
        session.select_country(Some("Chad".into()));
        session.set_actions("solar panels");
        let job = session.submit().unwrap().unwrap();
        session.finish_submission(job.token, Ok("first".into()));
        session.submit().unwrap();
        assert!(session.response().is_none());
        assert!(session.is_loading());
    }
}
