use crate::domain::prediction::{Decision, PredictionPayload, PredictionRequest, PredictionService};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use std::time::Duration;
use tracing::info;

/// Fewer trading days than this and the mock refuses, like the real service.
pub const MIN_ROWS: usize = 70;

/// Offline stand-in for the prediction service.
///
/// Prices are a deterministic function of the symbol and the trading-day index,
/// so the same request always gets the same answer.
#[derive(Clone)]
pub struct MockPredictionService {
    symbols: Vec<String>,
    latency: Option<Duration>,
}

impl MockPredictionService {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            latency: None,
        }
    }

    /// Delays every answer, which keeps the loading state on screen long enough to see.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn failure(message: impl Into<String>) -> PredictionPayload {
        PredictionPayload {
            success: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }

    fn build_payload(&self, request: &PredictionRequest) -> PredictionPayload {
        if !self.symbols.iter().any(|s| s == &request.stock) {
            return Self::failure("Invalid stock selected.");
        }

        let (start, end) = match (parse_date(&request.start_date), parse_date(&request.end_date)) {
            (Ok(s), Ok(e)) => (s, e),
            (Err(e), _) | (_, Err(e)) => return Self::failure(e),
        };

        let dates = trading_days(start, end);
        if dates.len() < MIN_ROWS {
            return Self::failure(
                "Not enough data. Please choose a wider date range (minimum ~3 months).",
            );
        }

        let seed = symbol_seed(&request.stock);
        let prices: Vec<f64> = (0..dates.len()).map(|i| synthetic_price(seed, i)).collect();

        let current_price = prices[prices.len() - 1];
        let window = prices.len().min(10);
        let anchor = prices[prices.len() - window];
        let drift = (current_price - anchor) / (window.max(2) - 1) as f64;
        let predicted_price = round2(current_price + drift * 3.0);
        let change_pct = (predicted_price - current_price) / current_price * 100.0;
        let decision = Decision::from_change_pct(change_pct);

        PredictionPayload {
            success: true,
            error: None,
            stock_name: request.stock.clone(),
            current_price: Some(round2(current_price)),
            predicted_price: Some(predicted_price),
            price_change: Some(round2(change_pct)),
            confidence: Some(f64::from(decision.confidence(change_pct))),
            decision: decision.to_string(),
            dates: dates
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
            historical_prices: prices,
        }
    }
}

#[async_trait]
impl PredictionService for MockPredictionService {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionPayload> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let payload = self.build_payload(request);
        info!(
            "MockPredictionService: {} -> success={}",
            request.stock, payload.success
        );
        Ok(payload)
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", value, e))
}

/// Weekdays in `[start, end]`.
fn trading_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

fn symbol_seed(symbol: &str) -> f64 {
    symbol
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
        as f64
}

fn synthetic_price(seed: f64, index: usize) -> f64 {
    let base = 500.0 + (seed % 3000.0);
    let phase = seed % 7.0;
    let t = index as f64;
    let value = base * (1.0 + 0.12 * (t / 23.0 + phase).sin() + 0.03 * (t / 5.0).cos() + 0.0004 * t);
    round2(value)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
