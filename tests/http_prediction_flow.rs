use axum::Router;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use stockcast::application::request_controller::RequestController;
use stockcast::domain::formatting::Trend;
use stockcast::domain::prediction::PredictionRequest;
use stockcast::domain::view_state::ViewState;
use stockcast::infrastructure::prediction_api::HttpPredictionService;
use url::Url;

#[derive(Clone)]
enum Reply {
    Json(Value),
    Status(StatusCode),
    Garbage,
}

#[derive(Clone)]
struct Stub {
    reply: Reply,
    seen: Arc<Mutex<Vec<Value>>>,
}

async fn predict(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.seen.lock().unwrap().push(body);
    match stub.reply {
        Reply::Json(v) => Json(v).into_response(),
        Reply::Status(code) => (code, "upstream exploded").into_response(),
        Reply::Garbage => "<html>not json</html>".into_response(),
    }
}

/// Starts a stub `/predict` server and returns its base URL plus the captured bodies.
async fn spawn_stub(reply: Reply) -> (Url, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        reply,
        seen: seen.clone(),
    };
    let app = Router::new().route("/predict", post(predict)).with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (Url::parse(&format!("http://{}", addr)).unwrap(), seen)
}

fn request() -> PredictionRequest {
    PredictionRequest::new("RELIANCE", "2024-01-01", "2024-01-02").unwrap()
}

#[tokio::test]
async fn test_success_payload_renders_fields_and_chart() {
    let (base, seen) = spawn_stub(Reply::Json(json!({
        "success": true,
        "stock_name": "RELIANCE",
        "current_price": 100.004,
        "predicted_price": 105.2,
        "price_change": 5.2,
        "confidence": 80,
        "decision": "BUY",
        "dates": ["2024-01-01", "2024-01-02"],
        "historical_prices": [100.00, 100.004]
    })))
    .await;

    let service = HttpPredictionService::new(&base, None).unwrap();
    let mut controller = RequestController::default();
    let state = controller.run(&service, &request()).await;

    let view = state.view().expect("success state");
    assert_eq!(view.fields.current_price, "₹100.00");
    assert_eq!(view.fields.predicted_price, "₹105.20");
    assert_eq!(view.fields.price_change, "+5.20%");
    assert_eq!(view.fields.trend, Trend::Positive);
    assert_eq!(view.fields.confidence, "80%");
    assert_eq!(view.fields.decision_class, "decision BUY");
    assert_eq!(
        view.chart.labels,
        vec!["2024-01-01", "2024-01-02", "2024-01-03"]
    );
    assert_eq!(view.chart.forecast_series, vec![None, None, Some(105.2)]);

    let bodies = seen.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({"stock": "RELIANCE", "start_date": "2024-01-01", "end_date": "2024-01-02"})
    );
}

#[tokio::test]
async fn test_service_failure_shows_message_verbatim() {
    let (base, _) = spawn_stub(Reply::Json(json!({
        "success": false,
        "error": "Invalid stock symbol"
    })))
    .await;

    let service = HttpPredictionService::new(&base, None).unwrap();
    let mut controller = RequestController::default();
    let state = controller.run(&service, &request()).await;

    assert_eq!(state, &ViewState::Error("Invalid stock symbol".to_string()));
    assert!(state.view().is_none());
}

#[tokio::test]
async fn test_non_2xx_is_network_error() {
    let (base, _) = spawn_stub(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR)).await;

    let service = HttpPredictionService::new(&base, None).unwrap();
    let mut controller = RequestController::default();
    let message = controller
        .run(&service, &request())
        .await
        .error_message()
        .unwrap()
        .to_string();

    assert!(message.starts_with("Network error: "));
    assert!(message.contains("500"));
}

#[tokio::test]
async fn test_invalid_json_is_network_error() {
    let (base, _) = spawn_stub(Reply::Garbage).await;

    let service = HttpPredictionService::new(&base, None).unwrap();
    let mut controller = RequestController::default();
    let message = controller
        .run(&service, &request())
        .await
        .error_message()
        .unwrap()
        .to_string();

    assert!(message.starts_with("Network error: Failed to parse prediction response"));
}

#[tokio::test]
async fn test_length_mismatch_is_integrity_error() {
    let (base, _) = spawn_stub(Reply::Json(json!({
        "success": true,
        "stock_name": "TCS",
        "current_price": 10.0,
        "predicted_price": 11.0,
        "price_change": 10.0,
        "confidence": 95,
        "decision": "BUY",
        "dates": ["2024-01-01", "2024-01-02", "2024-01-03"],
        "historical_prices": [9.0, 10.0]
    })))
    .await;

    let service = HttpPredictionService::new(&base, None).unwrap();
    let mut controller = RequestController::default();
    let state = controller.run(&service, &request()).await;

    assert!(state.view().is_none());
    assert!(state.error_message().unwrap().contains("3 dates but 2"));
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = Url::parse(&format!("http://{}", addr)).unwrap();
    let service = HttpPredictionService::new(&base, None).unwrap();
    let mut controller = RequestController::default();
    let state = controller.run(&service, &request()).await;

    assert!(state.error_message().unwrap().starts_with("Network error: "));
}

#[tokio::test]
async fn test_success_without_figures_is_error() {
    let (base, _) = spawn_stub(Reply::Json(json!({
        "success": true,
        "stock_name": "TCS",
        "dates": ["2024-01-01"],
        "historical_prices": [1.0]
    })))
    .await;

    let service = HttpPredictionService::new(&base, None).unwrap();
    let mut controller = RequestController::default();
    let state = controller.run(&service, &request()).await;

    assert!(state.view().is_none());
    assert_eq!(
        state.error_message(),
        Some("Malformed response: missing current_price")
    );
}
