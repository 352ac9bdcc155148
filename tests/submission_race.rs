use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use stockcast::application::client::{ClientEvent, PredictionClient};
use stockcast::application::request_controller::{Applied, FencingPolicy, RequestController};
use stockcast::domain::prediction::{PredictionPayload, PredictionRequest, PredictionService};
use tokio::runtime::Handle;

/// Answers after a per-symbol delay so two submissions can finish out of order.
struct DelayedService;

#[async_trait]
impl PredictionService for DelayedService {
    async fn predict(&self, request: &PredictionRequest) -> anyhow::Result<PredictionPayload> {
        let (delay, predicted) = match request.stock.as_str() {
            "SLOW" => (Duration::from_millis(200), 1.0),
            _ => (Duration::from_millis(10), 2.0),
        };
        tokio::time::sleep(delay).await;
        Ok(PredictionPayload {
            success: true,
            stock_name: request.stock.clone(),
            current_price: Some(1.0),
            predicted_price: Some(predicted),
            price_change: Some(0.0),
            confidence: Some(70.0),
            decision: "HOLD".to_string(),
            dates: vec!["2024-01-01".to_string()],
            historical_prices: vec![1.0],
            ..Default::default()
        })
    }
}

fn request(stock: &str) -> PredictionRequest {
    PredictionRequest::new(stock, "2024-01-01", "2024-01-02").unwrap()
}

/// Fires SLOW then FAST, feeds both completions to the controller in arrival order.
async fn race(policy: FencingPolicy) -> (RequestController, Vec<Applied>) {
    let mut client = PredictionClient::new(Handle::current(), Arc::new(DelayedService));
    let mut controller = RequestController::new(policy);

    let slow = controller.submit(&request("SLOW"));
    client.dispatch(slow, request("SLOW"));
    let fast = controller.submit(&request("FAST"));
    client.dispatch(fast, request("FAST"));

    let mut applied = Vec::new();
    for _ in 0..200 {
        while let Some(event) = client.poll_next() {
            if let ClientEvent::Completion(c) = event {
                applied.push(controller.complete(c.token, c.outcome));
            }
        }
        if applied.len() == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(applied.len(), 2, "both calls complete");
    (controller, applied)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_last_arriving_response_wins() {
    let (controller, applied) = race(FencingPolicy::LastResponseWins).await;
    assert_eq!(applied, vec![Applied::Applied, Applied::Applied]);

    // SLOW was submitted first but lands last, so it owns the screen
    let view = controller.state().view().expect("success");
    assert_eq!(view.fields.stock_name, "SLOW");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_discard_stale_keeps_latest_submission() {
    let (controller, applied) = race(FencingPolicy::DiscardStale).await;
    assert_eq!(applied, vec![Applied::Applied, Applied::DiscardedStale]);

    let view = controller.state().view().expect("success");
    assert_eq!(view.fields.stock_name, "FAST");
    assert_eq!(view.chart.forecast_value(), Some(2.0));
}
