use crate::domain::errors::ViewError;
use crate::domain::prediction::PredictionResponse;
use chrono::NaiveDate;
use serde::Serialize;

const LABEL_FORMAT: &str = "%Y-%m-%d";

/// Series data for the price chart.
///
/// `labels` has one more entry than the history: the last label is a synthetic
/// next-day position that only hosts the forecast marker. It is not a trading day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartModel {
    pub title: String,
    pub labels: Vec<String>,
    pub historical_series: Vec<(String, f64)>,
    pub forecast_series: Vec<Option<f64>>,
}

impl ChartModel {
    /// Builds the chart from a validated response without touching it.
    ///
    /// Every check runs before any series is assembled, so a failure never
    /// leaves a half-built model behind.
    pub fn build(response: &PredictionResponse) -> Result<Self, ViewError> {
        let dates = &response.dates;
        let prices = &response.historical_prices;

        if dates.len() != prices.len() || dates.is_empty() {
            return Err(ViewError::DataIntegrity {
                dates: dates.len(),
                prices: prices.len(),
            });
        }

        // Checked non-empty above
        let last = &dates[dates.len() - 1];
        let forecast_label = next_day_label(last)?;

        let mut labels = Vec::with_capacity(dates.len() + 1);
        labels.extend(dates.iter().cloned());
        labels.push(forecast_label);

        let historical_series = dates.iter().cloned().zip(prices.iter().copied()).collect();

        let mut forecast_series = vec![None; prices.len()];
        forecast_series.push(Some(response.predicted_price));

        Ok(Self {
            title: response.stock_name.clone(),
            labels,
            historical_series,
            forecast_series,
        })
    }

    /// Index of the synthetic forecast label.
    pub fn forecast_index(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    pub fn forecast_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    pub fn forecast_value(&self) -> Option<f64> {
        self.forecast_series.last().copied().flatten()
    }

    /// Label at a plot x position, if it lands on one.
    pub fn label_at(&self, position: f64) -> Option<&str> {
        if position < 0.0 || position.fract().abs() > f64::EPSILON {
            return None;
        }
        self.labels.get(position as usize).map(String::as_str)
    }
}

/// Calendar day after `date`, formatted `YYYY-MM-DD`.
///
/// Accepts a bare date or an ISO timestamp whose date part comes first.
pub fn next_day_label(date: &str) -> Result<String, ViewError> {
    let date_part = date.split('T').next().unwrap_or(date).trim();
    let parsed = NaiveDate::parse_from_str(date_part, LABEL_FORMAT).map_err(|e| {
        ViewError::Format {
            value: date.to_string(),
            reason: e.to_string(),
        }
    })?;
    let next = parsed.succ_opt().ok_or_else(|| ViewError::Format {
        value: date.to_string(),
        reason: "no following calendar day".to_string(),
    })?;
    Ok(next.format(LABEL_FORMAT).to_string())
}
