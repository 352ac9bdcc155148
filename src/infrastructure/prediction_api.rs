use crate::domain::prediction::{PredictionPayload, PredictionRequest, PredictionService};
use crate::infrastructure::http_client_factory::HttpClientFactory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Talks to the prediction service over `POST {base}/predict`.
pub struct HttpPredictionService {
    client: Client,
    predict_url: Url,
}

impl HttpPredictionService {
    pub fn new(base_url: &Url, request_timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: HttpClientFactory::create_client(request_timeout)?,
            predict_url: predict_url(base_url)?,
        })
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

/// Resolves `predict` under `base`, keeping any path prefix the base carries.
pub fn predict_url(base: &Url) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("predict")
        .with_context(|| format!("Cannot build predict URL from {}", base))
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionPayload> {
        info!("POST {} for {}", self.predict_url, request.stock);

        let response = self
            .client
            .post(self.predict_url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Prediction service returned status: {}", status);
        }

        let payload: PredictionPayload = response
            .json()
            .await
            .context("Failed to parse prediction response")?;

        debug!(
            "Decoded payload: success={}, {} dates, {} prices",
            payload.success,
            payload.dates.len(),
            payload.historical_prices.len()
        );
        Ok(payload)
    }
}
