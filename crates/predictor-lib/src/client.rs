//! HTTP client for the online prediction endpoint

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::auth::TokenProvider;
use crate::error::PredictError;
use crate::models::Baby;
use crate::retry::RetryPolicy;
use crate::wire::{PredictionRequest, PredictionResponse};

/// Configuration for the prediction client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Cloud project hosting the model
    pub project: String,
    /// Deployed model name
    pub model: String,
    /// Deployed model version
    pub version: String,
    /// Service base URL, scheme included
    pub service_base: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Retry strategy for transport failures
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            project: "asl-ml-immersion".to_string(),
            model: "babyweight".to_string(),
            version: "v1".to_string(),
            service_base: "https://ml.googleapis.com".to_string(),
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Endpoint URL in the service's
    /// `/v1/projects/<project>/models/<model>/versions/<version>:predict` shape
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/models/{}/versions/{}:predict",
            self.service_base.trim_end_matches('/'),
            self.project,
            self.model,
            self.version
        )
    }
}

/// Client for the remote scoring endpoint.
///
/// Each call performs one awaited round trip; credentials are explicit and
/// attached as a bearer token by the send path.
pub struct PredictionClient {
    config: ClientConfig,
    http: Client,
    credentials: Arc<dyn TokenProvider>,
}

impl PredictionClient {
    /// Create a client from a config and an explicit credential object
    pub fn new(
        config: ClientConfig,
        credentials: Arc<dyn TokenProvider>,
    ) -> Result<Self, PredictError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            config,
            http,
            credentials,
        })
    }

    pub fn builder() -> PredictionClientBuilder {
        PredictionClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Predict the weight for a single record.
    ///
    /// Returns `default_value` when the service yields zero predictions;
    /// transport and credential failures propagate.
    pub async fn predict(&self, record: &Baby, default_value: f64) -> Result<f64, PredictError> {
        let request = PredictionRequest::single(record);
        let response = self.send_request(&request).await?;
        Ok(response
            .predicted_weights()
            .first()
            .copied()
            .unwrap_or(default_value))
    }

    /// Predict weights for a collection of records, order-aligned with the
    /// input. Errors if the response carries a different number of
    /// predictions than records were submitted.
    pub async fn batch_predict(&self, records: &[Baby]) -> Result<Vec<f64>, PredictError> {
        let request = PredictionRequest::batch(records);
        let response = self.send_request(&request).await?;
        let weights = response.predicted_weights();
        if weights.len() != records.len() {
            return Err(PredictError::Misaligned {
                expected: records.len(),
                got: weights.len(),
            });
        }
        Ok(weights)
    }

    /// Send a prediction request and parse the response.
    ///
    /// Elapsed wall-clock time is logged on success and failure alike.
    pub async fn send_request(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictError> {
        let start = Instant::now();
        let result = self.dispatch(request).await;
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            instances = request.instances.len(),
            ok = result.is_ok(),
            "prediction round trip"
        );
        result
    }

    async fn dispatch(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictError> {
        let url = Url::parse(&self.config.endpoint_url())?;
        let token = self.credentials.token().await?;

        let mut attempt = 1;
        loop {
            match self.post_once(url.clone(), request, &token).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt < self.config.retry.max_attempts => {
                    let backoff = self.config.retry.jittered_backoff(attempt);
                    warn!(
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "prediction request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn post_once(
        &self,
        url: Url,
        request: &PredictionRequest,
        token: &str,
    ) -> Result<PredictionResponse, PredictError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(PredictError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(PredictError::from)
    }
}

/// Builder for the prediction client
pub struct PredictionClientBuilder {
    config: ClientConfig,
    credentials: Option<Arc<dyn TokenProvider>>,
}

impl PredictionClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            credentials: None,
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.config.project = project.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    pub fn service_base(mut self, base: impl Into<String>) -> Self {
        self.config.service_base = base.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    pub fn credentials(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.credentials = Some(Arc::new(provider));
        self
    }

    pub fn build(self) -> Result<PredictionClient, PredictError> {
        let credentials = self.credentials.ok_or_else(|| {
            PredictError::Credentials("a token provider is required".to_string())
        })?;
        PredictionClient::new(self.config, credentials)
    }
}

impl Default for PredictionClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
