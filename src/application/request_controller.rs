use crate::domain::errors::{RequestError, ViewError};
use crate::domain::prediction::{PredictionPayload, PredictionRequest, PredictionService};
use crate::domain::view_state::{PredictionView, ViewState};
use std::fmt;
use tracing::{debug, info, warn};

/// Identifies one submission. Tokens only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionToken(u64);

impl SubmissionToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubmissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What to do with a response that arrives after a newer submission was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FencingPolicy {
    /// Apply every completion in delivery order; the last one to arrive wins.
    #[default]
    LastResponseWins,
    /// Drop completions whose token is not the most recent submission.
    DiscardStale,
}

/// Outcome of handing a completion to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    DiscardedStale,
}

/// Owns the single [`ViewState`] slot and drives it through
/// `Idle -> Loading -> Success | Error`.
pub struct RequestController {
    state: ViewState,
    policy: FencingPolicy,
    last_token: u64,
}

impl Default for RequestController {
    fn default() -> Self {
        Self::new(FencingPolicy::default())
    }
}

impl RequestController {
    pub fn new(policy: FencingPolicy) -> Self {
        Self {
            state: ViewState::Idle,
            policy,
            last_token: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn policy(&self) -> FencingPolicy {
        self.policy
    }

    /// Enters `Loading` from any state, clearing the previous error or results.
    pub fn submit(&mut self, request: &PredictionRequest) -> SubmissionToken {
        self.last_token += 1;
        let token = SubmissionToken(self.last_token);
        if self.state.is_loading() {
            debug!("Submission {} supersedes one still in flight", token);
        }
        info!(
            "Submitting prediction {} for {} ({} → {})",
            token, request.stock, request.start_date, request.end_date
        );
        self.state = ViewState::Loading;
        token
    }

    /// Shows an input problem without issuing a call.
    ///
    /// Counts as a submission, so calls still in flight become stale.
    pub fn reject(&mut self, err: &RequestError) {
        self.last_token += 1;
        warn!("Submission #{} rejected: {}", self.last_token, err);
        self.state = ViewState::Error(err.to_string());
    }

    /// Applies the result of the call issued for `token`.
    pub fn complete(
        &mut self,
        token: SubmissionToken,
        outcome: anyhow::Result<PredictionPayload>,
    ) -> Applied {
        if self.policy == FencingPolicy::DiscardStale && token.0 != self.last_token {
            warn!(
                "Discarding stale response {} (latest is #{})",
                token, self.last_token
            );
            return Applied::DiscardedStale;
        }

        self.state = match resolve(outcome) {
            Ok(view) => {
                info!(
                    "Prediction {} ready: {} → {} ({})",
                    token, view.fields.current_price, view.fields.predicted_price, view.fields.decision
                );
                ViewState::Success(Box::new(view))
            }
            Err(err) => {
                warn!("Prediction {} failed [{}]: {}", token, err.kind(), err);
                ViewState::from_error(&err)
            }
        };
        Applied::Applied
    }

    /// Submits, awaits the service once, and applies the outcome.
    pub async fn run(
        &mut self,
        service: &dyn PredictionService,
        request: &PredictionRequest,
    ) -> &ViewState {
        let token = self.submit(request);
        let outcome = service.predict(request).await;
        self.complete(token, outcome);
        &self.state
    }
}

/// Maps a raw call outcome to the view it should produce.
///
/// Transport failures keep their full cause chain in the message.
pub fn resolve(outcome: anyhow::Result<PredictionPayload>) -> Result<PredictionView, ViewError> {
    let payload = outcome.map_err(|e| ViewError::Transport(format!("{:#}", e)))?;
    let response = payload.validate()?;
    PredictionView::from_response(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn request() -> PredictionRequest {
        PredictionRequest::new("RELIANCE", "2024-01-01", "2024-01-02").unwrap()
    }

    fn ok_payload(predicted: f64) -> PredictionPayload {
        PredictionPayload {
            success: true,
            stock_name: "RELIANCE".to_string(),
            current_price: Some(100.004),
            predicted_price: Some(predicted),
            price_change: Some(5.2),
            confidence: Some(80.0),
            decision: "BUY".to_string(),
            dates: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            historical_prices: vec![100.0, 100.004],
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_enters_loading() {
        let mut controller = RequestController::default();
        assert_eq!(controller.state(), &ViewState::Idle);
        let token = controller.submit(&request());
        assert!(controller.state().is_loading());
        assert_eq!(token.value(), 1);
    }

    #[test]
    fn test_reject_shows_input_error() {
        let mut controller = RequestController::default();
        controller.reject(&RequestError::MissingStock);
        assert_eq!(
            controller.state().error_message(),
            Some("Stock symbol is required")
        );
    }

    #[test]
    fn test_success_transition() {
        let mut controller = RequestController::default();
        let token = controller.submit(&request());
        assert_eq!(controller.complete(token, Ok(ok_payload(105.2))), Applied::Applied);

        let view = controller.state().view().expect("success state");
        assert_eq!(view.fields.current_price, "₹100.00");
        assert_eq!(view.chart.forecast_series, vec![None, None, Some(105.2)]);
    }

    #[test]
    fn test_service_error_transition() {
        let mut controller = RequestController::default();
        let token = controller.submit(&request());
        let payload = PredictionPayload {
            success: false,
            error: Some("Invalid stock symbol".to_string()),
            ..Default::default()
        };
        controller.complete(token, Ok(payload));
        assert_eq!(
            controller.state(),
            &ViewState::Error("Invalid stock symbol".to_string())
        );
        assert!(controller.state().view().is_none());
    }

    #[test]
    fn test_transport_error_transition() {
        let mut controller = RequestController::default();
        let token = controller.submit(&request());
        controller.complete(token, Err(anyhow!("Failed to fetch")));
        assert_eq!(
            controller.state().error_message(),
            Some("Network error: Failed to fetch")
        );
    }

    #[test]
    fn test_resubmit_clears_previous_result() {
        let mut controller = RequestController::default();
        let token = controller.submit(&request());
        controller.complete(token, Ok(ok_payload(105.2)));
        assert!(controller.state().view().is_some());

        controller.submit(&request());
        assert_eq!(controller.state(), &ViewState::Loading);

        let token = controller.submit(&request());
        controller.complete(token, Err(anyhow!("boom")));
        controller.submit(&request());
        assert_eq!(controller.state(), &ViewState::Loading);
    }

    #[test]
    fn test_last_response_wins_by_default() {
        let mut controller = RequestController::default();
        let first = controller.submit(&request());
        let second = controller.submit(&request());

        controller.complete(second, Ok(ok_payload(110.0)));
        // The older call lands last and overwrites the newer result
        assert_eq!(
            controller.complete(first, Err(anyhow!("timed out"))),
            Applied::Applied
        );
        assert_eq!(
            controller.state().error_message(),
            Some("Network error: timed out")
        );
    }

    #[test]
    fn test_discard_stale_keeps_latest() {
        let mut controller = RequestController::new(FencingPolicy::DiscardStale);
        let first = controller.submit(&request());
        let second = controller.submit(&request());

        controller.complete(second, Ok(ok_payload(110.0)));
        assert_eq!(
            controller.complete(first, Err(anyhow!("timed out"))),
            Applied::DiscardedStale
        );
        let view = controller.state().view().expect("latest result kept");
        assert_eq!(view.chart.forecast_value(), Some(110.0));
    }

    #[test]
    fn test_discard_stale_after_rejected_submission() {
        let mut controller = RequestController::new(FencingPolicy::DiscardStale);
        let in_flight = controller.submit(&request());
        controller.reject(&RequestError::MissingStock);

        let late = PredictionPayload {
            success: false,
            error: Some("stale answer".to_string()),
            ..Default::default()
        };
        assert_eq!(
            controller.complete(in_flight, Ok(late)),
            Applied::DiscardedStale
        );
        assert_eq!(
            controller.state(),
            &ViewState::Error("Stock symbol is required".to_string())
        );
    }

    #[test]
    fn test_integrity_failure_yields_no_view() {
        let mut controller = RequestController::default();
        let token = controller.submit(&request());
        let mut payload = ok_payload(105.2);
        payload.historical_prices.pop();
        controller.complete(token, Ok(payload));
        assert!(controller.state().view().is_none());
        assert!(
            controller
                .state()
                .error_message()
                .is_some_and(|m| m.contains("2 dates"))
        );
    }

    struct CountingService {
        calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl PredictionService for CountingService {
        async fn predict(&self, _request: &PredictionRequest) -> anyhow::Result<PredictionPayload> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(ok_payload(105.2))
        }
    }

    #[test]
    fn test_run_awaits_service_once() {
        let service = CountingService {
            calls: std::sync::atomic::AtomicUsize::new(0),
        };
        let mut controller = RequestController::default();

        let state = tokio_test::block_on(controller.run(&service, &request()));
        assert_eq!(state.name(), "success");
        assert_eq!(service.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transport_message_keeps_cause_chain() {
        let err = anyhow!("connection refused").context("POST /predict");
        assert_eq!(
            resolve(Err(err)),
            Err(ViewError::Transport(
                "POST /predict: connection refused".to_string()
            ))
        );
    }
}
