//! Bridges the screen sessions to the egui UI and background requests.

mod background_jobs;
mod jobs;

use crate::climate_api::ClimateApi;
use crate::config::AppSettings;
use crate::egui_app::state::{AlertState, Screen, StatusTone, UiState};
use crate::session::{
    ContributionSession, MISSING_INPUT_TITLE, MetricsLoad, Tooltip, TrendsSession,
};

use jobs::JobQueue;

/// Maintains app state and bridges core logic to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    trends: TrendsSession,
    contribution: ContributionSession,
    jobs: JobQueue,
}

impl EguiController {
    /// HTTP-backed controller for the configured server.
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(ClimateApi::from_settings(settings), settings.chart.point_limit)
    }

    pub fn new(api: ClimateApi, chart_point_limit: usize) -> Self {
        let endpoints = api.endpoints().clone();
        Self {
            ui: UiState::default(),
            trends: TrendsSession::new(endpoints.clone(), chart_point_limit),
            contribution: ContributionSession::new(endpoints),
            jobs: JobQueue::new(api),
        }
    }

    pub fn trends(&self) -> &TrendsSession {
        &self.trends
    }

    pub fn contribution(&self) -> &ContributionSession {
        &self.contribution
    }

    pub fn contribution_mut(&mut self) -> &mut ContributionSession {
        &mut self.contribution
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.trends.tooltip()
    }

    /// True while any request is outstanding.
    pub fn has_pending_jobs(&self) -> bool {
        self.jobs.in_flight() > 0
    }

    /// Switch screens, loading the new screen's data on first display.
    pub fn show_screen(&mut self, screen: Screen) {
        self.ui.screen = screen;
        self.mount_active_screen();
    }

    /// Start the active screen's initial load if it has not run yet.
    pub fn mount_active_screen(&mut self) {
        let job = match self.ui.screen {
            Screen::Trends => self.trends.mount(),
            Screen::Contribution => self.contribution.mount(),
        };
        if let Some(job) = job {
            self.set_status("Loading Climate Data...", StatusTone::Busy);
            self.jobs.begin_metrics_load(self.ui.screen, job);
        }
    }

    /// Re-fetch the active screen's country table.
    pub fn reload_active_screen(&mut self) {
        let job = match self.ui.screen {
            Screen::Trends => self.trends.reload(),
            Screen::Contribution => self.contribution.reload(),
        };
        self.set_status("Loading Climate Data...", StatusTone::Busy);
        self.jobs.begin_metrics_load(self.ui.screen, job);
    }

    /// Chart point `index` was clicked at screen position (`x`, `y`).
    pub fn click_chart_point(&mut self, index: usize, x: f32, y: f32) {
        if let Some(job) = self.trends.begin_point_click(index, x, y) {
            self.jobs.begin_point_insight(job);
        }
    }

    pub fn dismiss_tooltip(&mut self) {
        self.trends.dismiss_tooltip();
    }

    /// Validate the contribution form and send it, or raise the missing-input alert.
    pub fn submit_contribution(&mut self) {
        match self.contribution.submit() {
            Ok(Some(job)) => {
                self.set_status("Analyzing...", StatusTone::Busy);
                self.jobs.begin_contribution(job);
            }
            Ok(None) => {}
            Err(err) => {
                self.ui.alert = Some(AlertState::new(MISSING_INPUT_TITLE, err.to_string()));
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.ui.alert = None;
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.tone = tone;
    }

    fn refresh_idle_status(&mut self) {
        if self.has_pending_jobs() {
            return;
        }
        let load = match self.ui.screen {
            Screen::Trends => self.trends.metrics(),
            Screen::Contribution => self.contribution.metrics(),
        };
        let (text, tone) = match load {
            MetricsLoad::Ready(metrics) => {
                (format!("{} countries loaded", metrics.len()), StatusTone::Info)
            }
            MetricsLoad::Failed(err) => (err.clone(), StatusTone::Error),
            MetricsLoad::Idle | MetricsLoad::Loading(_) => return,
        };
        self.set_status(text, tone);
    }
}
