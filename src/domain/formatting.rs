use crate::domain::prediction::PredictionResponse;
use serde::Serialize;

pub const CURRENCY_SYMBOL: &str = "₹";

/// Direction of the predicted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    pub fn from_change(change_pct: f64) -> Self {
        if change_pct >= 0.0 {
            Trend::Positive
        } else {
            Trend::Negative
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            Trend::Positive => "#10b981",
            Trend::Negative => "#ef4444",
        }
    }
}

/// Display strings for the results panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultFields {
    pub stock_name: String,
    pub current_price: String,
    pub predicted_price: String,
    pub price_change: String,
    pub trend: Trend,
    pub confidence: String,
    pub decision: String,
    pub decision_class: String,
}

impl ResultFields {
    pub fn from_response(response: &PredictionResponse) -> Self {
        Self {
            stock_name: response.stock_name.clone(),
            current_price: format_currency(response.current_price),
            predicted_price: format_currency(response.predicted_price),
            price_change: format_change(response.price_change_percent),
            trend: Trend::from_change(response.price_change_percent),
            confidence: format_confidence(response.confidence_percent),
            decision: response.decision.clone(),
            decision_class: format!("decision {}", response.decision)
                .trim_end()
                .to_string(),
        }
    }
}

pub fn format_currency(value: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, value)
}

/// `+5.20%` for gains, `-3.10%` for losses.
pub fn format_change(change_pct: f64) -> String {
    let sign = if change_pct >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, change_pct)
}

pub fn format_confidence(confidence_pct: f64) -> String {
    format!("{}%", confidence_pct.trunc() as i64)
}

/// Axis tick text for a price.
pub fn format_axis_price(value: f64) -> String {
    format!("{}{:.0}", CURRENCY_SYMBOL, value)
}

/// Hover text for one series at one x position; absent values show `₹—`.
pub fn format_tooltip(series: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}: {}", series, format_currency(v)),
        None => format!("{}: {}—", series, CURRENCY_SYMBOL),
    }
}
