use super::jobs::JobMessage;
use super::*;
use crate::session::COUNTRY_LOAD_ALERT;
use std::sync::mpsc::TryRecvError;

impl EguiController {
    /// Drain finished requests into the sessions. Call once per frame.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };

            match message {
                JobMessage::MetricsLoaded(message) => {
                    let failed = message.result.is_err();
                    let applied = match message.screen {
                        Screen::Trends => {
                            self.trends.finish_metrics_load(message.token, message.result)
                        }
                        Screen::Contribution => self
                            .contribution
                            .finish_metrics_load(message.token, message.result),
                    };
                    if applied && failed && message.screen == Screen::Contribution {
                        self.ui.alert = Some(AlertState::new("Error", COUNTRY_LOAD_ALERT));
                    }
                }
                JobMessage::PointInsight(message) => {
                    self.trends.finish_point_insight(message.token, message.result);
                }
                JobMessage::Contribution(message) => {
                    self.contribution
                        .finish_submission(message.token, message.result);
                }
            }
        }
        self.refresh_idle_status();
    }
}
