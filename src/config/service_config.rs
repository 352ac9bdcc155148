//! Prediction service configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Prediction service environment configuration
#[derive(Debug, Clone)]
pub struct ServiceEnvConfig {
    pub api_url: Url,
    pub request_timeout: Option<Duration>,
    pub discard_stale: bool,
}

impl Default for ServiceEnvConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default URL is valid"),
            request_timeout: None,
            discard_stale: false,
        }
    }
}

impl ServiceEnvConfig {
    pub fn from_env() -> Result<Self> {
        let raw_url = env::var("PREDICT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .with_context(|| format!("Invalid PREDICT_API_URL: {}", raw_url))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            anyhow::bail!(
                "Invalid PREDICT_API_URL: {}. Scheme must be http or https",
                raw_url
            );
        }

        // Unset or 0 means wait forever
        let request_timeout = match env::var("PREDICT_REQUEST_TIMEOUT_SECS") {
            Ok(v) => {
                let secs = v
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid PREDICT_REQUEST_TIMEOUT_SECS: {}", v))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let discard_stale = env::var("PREDICT_DISCARD_STALE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        Ok(Self {
            api_url,
            request_timeout,
            discard_stale,
        })
    }
}
