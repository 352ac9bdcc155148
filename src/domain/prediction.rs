use crate::domain::errors::{RequestError, ViewError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user asks the service to predict.
///
/// Dates are passed through as entered; the service decides whether they make sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub stock: String,
    pub start_date: String,
    pub end_date: String,
}

impl PredictionRequest {
    pub fn new(
        stock: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let stock = stock.into().trim().to_string();
        if stock.is_empty() {
            return Err(RequestError::MissingStock);
        }
        Ok(Self {
            stock,
            start_date: start_date.into(),
            end_date: end_date.into(),
        })
    }
}

/// Raw `/predict` body as it comes off the wire.
///
/// Failure bodies only carry `success` and `error`, so every other field defaults.
/// The figures stay optional so a success body that lost one is caught in `validate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionPayload {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub stock_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub decision: String,
    pub dates: Vec<String>,
    pub historical_prices: Vec<f64>,
}

impl PredictionPayload {
    /// Turns a decoded body into a view-ready response or the error the view should show.
    pub fn validate(self) -> Result<PredictionResponse, ViewError> {
        if !self.success {
            let message = self
                .error
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Prediction failed".to_string());
            return Err(ViewError::Service(message));
        }

        if self.dates.len() != self.historical_prices.len() || self.dates.is_empty() {
            return Err(ViewError::DataIntegrity {
                dates: self.dates.len(),
                prices: self.historical_prices.len(),
            });
        }

        let current_price = required(self.current_price, "current_price")?;
        let predicted_price = required(self.predicted_price, "predicted_price")?;
        let price_change_percent = required(self.price_change, "price_change")?;
        let confidence_percent = required(self.confidence, "confidence")?;

        Ok(PredictionResponse {
            stock_name: self.stock_name,
            current_price,
            predicted_price,
            price_change_percent,
            confidence_percent,
            decision: self.decision,
            dates: self.dates,
            historical_prices: self.historical_prices,
        })
    }
}

fn required(value: Option<f64>, field: &'static str) -> Result<f64, ViewError> {
    value.ok_or(ViewError::MissingField(field))
}

/// A successful prediction whose `dates` and `historical_prices` are index-aligned and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResponse {
    pub stock_name: String,
    pub current_price: f64,
    pub predicted_price: f64,
    pub price_change_percent: f64,
    pub confidence_percent: f64,
    pub decision: String,
    pub dates: Vec<String>,
    pub historical_prices: Vec<f64>,
}

/// Trading call attached to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl Decision {
    /// Percent move beyond which a prediction turns into a BUY or SELL.
    pub const THRESHOLD_PCT: f64 = 1.5;

    pub fn from_change_pct(change_pct: f64) -> Self {
        if change_pct > Self::THRESHOLD_PCT {
            Decision::Buy
        } else if change_pct < -Self::THRESHOLD_PCT {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }

    /// Confidence in percent for a call made on `change_pct`.
    pub fn confidence(&self, change_pct: f64) -> u8 {
        let magnitude = change_pct.abs();
        let raw = match self {
            Decision::Buy | Decision::Sell => (75.0 + magnitude * 2.0).min(95.0),
            Decision::Hold => (70.0 - magnitude * 3.0).max(50.0),
        };
        raw as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Buy => "BUY",
            Decision::Sell => "SELL",
            Decision::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Performs one request/response cycle. Any `Err` is a transport failure.
    async fn predict(&self, request: &PredictionRequest) -> anyhow::Result<PredictionPayload>;
}
