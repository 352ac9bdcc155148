use crate::config::{Config, Mode};
use crate::domain::prediction::PredictionService;
use crate::infrastructure::mock::MockPredictionService;
use crate::infrastructure::prediction_api::HttpPredictionService;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct ServiceFactory;

impl ServiceFactory {
    pub fn create_service(config: &Config) -> Result<Arc<dyn PredictionService>> {
        match config.mode {
            Mode::Mock => {
                info!("Using offline mock prediction service");
                Ok(Arc::new(
                    MockPredictionService::new(config.symbols.clone())
                        .with_latency(Duration::from_millis(600)),
                ))
            }
            Mode::Http => {
                let service = HttpPredictionService::new(&config.api_url, config.request_timeout)?;
                info!("Using prediction service at {}", service.predict_url());
                Ok(Arc::new(service))
            }
        }
    }
}
