//! Cooperative driver that runs controller dispatches against a [`Backend`].
//!
//! Controllers are only touched by the task owning the [`Session`]. Network
//! calls run as spawned tasks and report back over a channel, so completions
//! are applied one at a time, in the order they finish.

use crate::config::ClientConfig;
use crate::controller::{
    ChartDispatch, PredictionController, PredictionDispatch, RequestToken, VisualizationController,
};
use crate::domain::{FeatureField, PredictionOutcome, VisualizationOutcome};
use crate::prelude::{ClientError, ClientResult};
use crate::telemetry::{MetricsSnapshot, SessionMetrics};
use crate::transport::{Backend, HttpReply};
use log::{debug, warn};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Something the view asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    EditField(FeatureField, String),
    Submit,
    SelectChart(i64),
}

/// A completion that reached a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    PredictionSettled { token: RequestToken, applied: bool },
    ChartSettled { token: RequestToken, applied: bool },
}

#[derive(Debug)]
enum Completion {
    Prediction {
        token: RequestToken,
        reply: ClientResult<HttpReply>,
    },
    Chart {
        token: RequestToken,
        reply: ClientResult<HttpReply>,
    },
}

pub struct Session {
    backend: Arc<dyn Backend>,
    prediction: PredictionController,
    visualization: VisualizationController,
    sender: mpsc::UnboundedSender<Completion>,
    receiver: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
    metrics: SessionMetrics,
}

impl Session {
    /// Builds both controllers and spawns the load of the default chart.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(backend: Arc<dyn Backend>, config: &ClientConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (visualization, initial) = VisualizationController::new(config.completion);
        let mut session = Self {
            backend,
            prediction: PredictionController::from_config(config),
            visualization,
            sender,
            receiver,
            in_flight: 0,
            metrics: SessionMetrics::new(),
        };
        session.spawn_chart(initial);
        session
    }

    /// Applies an intent and spawns whatever request it produces.
    pub fn handle(&mut self, intent: Intent) -> ClientResult<()> {
        match intent {
            Intent::EditField(field, raw) => self.prediction.edit_field(field, raw),
            Intent::Submit => {
                if let Some(dispatch) = self.prediction.submit() {
                    self.spawn_prediction(dispatch);
                }
            }
            Intent::SelectChart(index) => {
                let dispatch = self.visualization.select_by_index(index)?;
                self.spawn_chart(dispatch);
            }
        }
        Ok(())
    }

    /// Waits for the next completion and applies it. `None` once nothing is in flight.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.receiver.recv().await?;
        self.in_flight -= 1;

        let event = match completion {
            Completion::Prediction { token, reply } => {
                let applied = self.prediction.complete(token, reply);
                let failed = matches!(
                    self.prediction.current_outcome(),
                    PredictionOutcome::Failed(_)
                );
                self.metrics.record_completion(applied, failed);
                SessionEvent::PredictionSettled { token, applied }
            }
            Completion::Chart { token, reply } => {
                let applied = self.visualization.complete(token, reply);
                let failed = matches!(
                    self.visualization.current_outcome(),
                    VisualizationOutcome::Failed
                );
                self.metrics.record_completion(applied, failed);
                SessionEvent::ChartSettled { token, applied }
            }
        };
        Some(event)
    }

    /// Drains every outstanding completion.
    pub async fn settle(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn prediction(&self) -> &PredictionController {
        &self.prediction
    }

    pub fn visualization(&self) -> &VisualizationController {
        &self.visualization
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn spawn_prediction(&mut self, dispatch: PredictionDispatch) {
        let backend = self.backend.clone();
        let token = dispatch.token;
        self.spawn_request(
            async move { backend.predict(&dispatch.request).await },
            move |reply| Completion::Prediction { token, reply },
        );
    }

    fn spawn_chart(&mut self, dispatch: ChartDispatch) {
        let backend = self.backend.clone();
        let token = dispatch.token;
        self.spawn_request(
            async move { backend.chart(dispatch.chart).await },
            move |reply| Completion::Chart { token, reply },
        );
    }

    /// Runs `call` on its own task. A panic inside it still reports a
    /// completion, so `in_flight` always drains.
    fn spawn_request<F, C>(&mut self, call: F, completion: C)
    where
        F: Future<Output = ClientResult<HttpReply>> + Send + 'static,
        C: FnOnce(ClientResult<HttpReply>) -> Completion + Send + 'static,
    {
        let sender = self.sender.clone();
        self.track_dispatch();
        tokio::spawn(async move {
            let reply = match tokio::spawn(call).await {
                Ok(reply) => reply,
                Err(err) => {
                    warn!("request task did not finish: {err}");
                    Err(ClientError::Interrupted(err.to_string()))
                }
            };
            if sender.send(completion(reply)).is_err() {
                debug!("request finished after its session closed");
            }
        });
    }

    fn track_dispatch(&mut self) {
        self.in_flight += 1;
        self.metrics.record_dispatched();
    }
}
