use crate::application::request_controller::SubmissionToken;
use crate::domain::prediction::{PredictionPayload, PredictionRequest, PredictionService};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::debug;

/// A finished call, tagged with the submission it belongs to.
pub struct Completion {
    pub token: SubmissionToken,
    pub outcome: anyhow::Result<PredictionPayload>,
}

/// Events the viewer drains once per frame.
pub enum ClientEvent {
    Completion(Completion),
    Log(String),
}

/// Runs prediction calls on a background runtime and hands results back to the UI thread.
///
/// Calls are never cancelled; every completion is delivered in arrival order.
pub struct PredictionClient {
    runtime: Handle,
    service: Arc<dyn PredictionService>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    log_rx: Option<Receiver<String>>,
}

impl PredictionClient {
    pub fn new(runtime: Handle, service: Arc<dyn PredictionService>) -> Self {
        let (completion_tx, completion_rx) = crossbeam_channel::unbounded();
        Self {
            runtime,
            service,
            completion_tx,
            completion_rx,
            log_rx: None,
        }
    }

    /// Forwards formatted log lines to the viewer's log panel.
    pub fn with_log_receiver(mut self, log_rx: Receiver<String>) -> Self {
        self.log_rx = Some(log_rx);
        self
    }

    pub fn dispatch(&self, token: SubmissionToken, request: PredictionRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        self.runtime.spawn(async move {
            let outcome = service.predict(&request).await;
            debug!("Call {} returned (ok = {})", token, outcome.is_ok());
            // Receiver gone means the window closed
            let _ = tx.send(Completion { token, outcome });
        });
    }

    /// Non-blocking; completions take priority over log lines.
    pub fn poll_next(&mut self) -> Option<ClientEvent> {
        if let Ok(completion) = self.completion_rx.try_recv() {
            return Some(ClientEvent::Completion(completion));
        }

        if let Some(log_rx) = &self.log_rx
            && let Ok(line) = log_rx.try_recv()
        {
            return Some(ClientEvent::Log(line));
        }

        None
    }
}
