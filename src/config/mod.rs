//! Configuration module for Stockcast.
//!
//! Loads everything from environment variables (a `.env` file is honoured by the
//! binaries), split by concern: the prediction service and the viewer defaults.

mod service_config;
mod viewer_config;

pub use service_config::{DEFAULT_API_URL, ServiceEnvConfig};
pub use viewer_config::{DEFAULT_END_DATE, DEFAULT_START_DATE, DEFAULT_SYMBOLS, ViewerEnvConfig};

use crate::application::request_controller::FencingPolicy;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Where predictions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Http,
    Mock,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Mode::Http),
            "mock" => Ok(Mode::Mock),
            _ => anyhow::bail!("Invalid PREDICT_MODE: {}. Must be 'http' or 'mock'", s),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    // Service (from ServiceEnvConfig)
    pub api_url: Url,
    pub request_timeout: Option<Duration>,
    pub fencing: FencingPolicy,

    // Viewer (from ViewerEnvConfig)
    pub symbols: Vec<String>,
    pub default_start: String,
    pub default_end: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::compose(Mode::Http, ServiceEnvConfig::default(), ViewerEnvConfig::default())
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mode_str = env::var("PREDICT_MODE").unwrap_or_else(|_| "http".to_string());
        let mode = Mode::from_str(&mode_str)?;

        let service = ServiceEnvConfig::from_env().context("Failed to load service config")?;
        let viewer = ViewerEnvConfig::from_env().context("Failed to load viewer config")?;

        Ok(Self::compose(mode, service, viewer))
    }

    fn compose(mode: Mode, service: ServiceEnvConfig, viewer: ViewerEnvConfig) -> Self {
        Self {
            mode,
            api_url: service.api_url,
            request_timeout: service.request_timeout,
            fencing: if service.discard_stale {
                FencingPolicy::DiscardStale
            } else {
                FencingPolicy::LastResponseWins
            },
            symbols: viewer.symbols,
            default_start: viewer.default_start,
            default_end: viewer.default_end,
        }
    }
}
