//! Viewer defaults: the symbol catalogue and the initial date range.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;

pub const DEFAULT_SYMBOLS: [&str; 5] = ["RELIANCE", "TCS", "INFY", "HDFCBANK", "ICICIBANK"];
pub const DEFAULT_START_DATE: &str = "2022-01-01";
pub const DEFAULT_END_DATE: &str = "2025-01-01";

#[derive(Debug, Clone)]
pub struct ViewerEnvConfig {
    pub symbols: Vec<String>,
    pub default_start: String,
    pub default_end: String,
}

impl Default for ViewerEnvConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            default_start: DEFAULT_START_DATE.to_string(),
            default_end: DEFAULT_END_DATE.to_string(),
        }
    }
}

impl ViewerEnvConfig {
    pub fn from_env() -> Result<Self> {
        let symbols: Vec<String> = env::var("PREDICT_SYMBOLS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_uppercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let symbols = if symbols.is_empty() {
            Self::default().symbols
        } else {
            symbols
        };

        let default_start = date_var("PREDICT_DEFAULT_START", DEFAULT_START_DATE)?;
        let default_end = date_var("PREDICT_DEFAULT_END", DEFAULT_END_DATE)?;

        Ok(Self {
            symbols,
            default_start,
            default_end,
        })
    }
}

fn date_var(key: &str, default: &str) -> Result<String> {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid {}: {} (expected YYYY-MM-DD)", key, value))?;
    Ok(value.trim().to_string())
}
