//! Remote Model Classifier
//!
//! HTTP client for an external prediction service (the Python model
//! backend). Contract: `POST {base}/api/predict` with `{"url": ...}`,
//! response carries `isPhishing` and a float `confidence`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::classifier::Classifier;
use super::types::{ClassifierError, Verdict};

#[derive(Debug, Clone)]
pub struct RemoteModelConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RemoteModelConfig {
    fn default() -> Self {
        use crate::constants;

        Self {
            base_url: constants::get_model_url(),
            timeout: Duration::from_secs(constants::DEFAULT_MODEL_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictResponse {
    is_phishing: bool,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct PredictErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub struct RemoteModelClassifier {
    config: RemoteModelConfig,
    http_client: reqwest::Client,
}

impl RemoteModelClassifier {
    pub fn new(config: RemoteModelConfig) -> Result<Self, ClassifierError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http_client })
    }

    fn predict_url(&self) -> String {
        format!("{}/api/predict", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Classifier for RemoteModelClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn classify(&self, url: &str) -> Result<Verdict, ClassifierError> {
        let response = self.http_client
            .post(self.predict_url())
            .json(&PredictRequest { url })
            .send()
            .await
            .map_err(|e| ClassifierError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body: PredictResponse = response.json().await
                .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;
            return Ok(Verdict::from_percentage(body.is_phishing, body.confidence));
        }

        let detail = response.json::<PredictErrorBody>().await
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| status.to_string());

        if status == reqwest::StatusCode::BAD_REQUEST {
            Err(ClassifierError::MalformedUrl(detail))
        } else {
            log::error!("Prediction service failed ({}): {}", status.as_u16(), detail);
            Err(ClassifierError::Unavailable(format!("{}: {}", status.as_u16(), detail)))
        }
    }
}
