use crate::climate_api::{ClimateApi, FetchError, LoadError};
use crate::egui_app::state::Screen;
use crate::metrics::CountryMetrics;
use crate::session::{InsightJob, MetricsJob, RequestToken};
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    MetricsLoaded(MetricsLoadResult),
    PointInsight(InsightResult),
    Contribution(InsightResult),
}

#[derive(Debug)]
pub(crate) struct MetricsLoadResult {
    pub(crate) screen: Screen,
    pub(crate) token: RequestToken,
    pub(crate) result: Result<CountryMetrics, LoadError>,
}

#[derive(Debug)]
pub(crate) struct InsightResult {
    pub(crate) token: RequestToken,
    pub(crate) result: Result<String, FetchError>,
}

/// Runs each request on its own thread and funnels results back to the UI thread.
pub(crate) struct JobQueue {
    api: ClimateApi,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    in_flight: usize,
}

impl JobQueue {
    pub(crate) fn new(api: ClimateApi) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            api,
            message_tx,
            message_rx,
            in_flight: 0,
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub(super) fn try_recv_message(&mut self) -> Result<JobMessage, TryRecvError> {
        let message = self.message_rx.try_recv()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Ok(message)
    }

    pub(super) fn begin_metrics_load(&mut self, screen: Screen, job: MetricsJob) {
        let abandoned = JobMessage::MetricsLoaded(MetricsLoadResult {
            screen,
            token: job.token,
            result: Err(LoadError::Fetch(worker_stopped())),
        });
        self.spawn(abandoned, move |api| {
            JobMessage::MetricsLoaded(MetricsLoadResult {
                screen,
                token: job.token,
                result: api.fetch_metrics(),
            })
        });
    }

    pub(super) fn begin_point_insight(&mut self, job: InsightJob) {
        let abandoned = JobMessage::PointInsight(InsightResult::stopped(job.token));
        self.spawn(abandoned, move |api| {
            JobMessage::PointInsight(InsightResult {
                token: job.token,
                result: api.fetch(&job.request),
            })
        });
    }

    pub(super) fn begin_contribution(&mut self, job: InsightJob) {
        let abandoned = JobMessage::Contribution(InsightResult::stopped(job.token));
        self.spawn(abandoned, move |api| {
            JobMessage::Contribution(InsightResult {
                token: job.token,
                result: api.fetch(&job.request),
            })
        });
    }

    /// Run `run` on a new thread. `abandoned` is delivered instead if it panics,
    /// so every spawned job produces exactly one message.
    fn spawn<F>(&mut self, abandoned: JobMessage, run: F)
    where
        F: FnOnce(&ClimateApi) -> JobMessage + Send + 'static,
    {
        let api = self.api.clone();
        let guard = CompletionGuard {
            tx: self.message_tx.clone(),
            abandoned: Some(abandoned),
        };
        self.in_flight += 1;
        thread::spawn(move || {
            let mut guard = guard;
            let message = run(&api);
            guard.abandoned = None;
            let _ = guard.tx.send(message);
        });
    }
}

impl InsightResult {
    fn stopped(token: RequestToken) -> Self {
        Self {
            token,
            result: Err(worker_stopped()),
        }
    }
}

fn worker_stopped() -> FetchError {
    FetchError::Transport("request worker stopped unexpectedly".to_string())
}

/// Sends the fallback message when a job thread unwinds before replying.
struct CompletionGuard {
    tx: Sender<JobMessage>,
    abandoned: Option<JobMessage>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(message) = self.abandoned.take() {
            tracing::error!("Background request panicked");
            let _ = self.tx.send(message);
        }
    }
}
