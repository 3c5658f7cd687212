//! Async HTTP client for the Jobs API.

use std::time::Duration;

use async_trait::async_trait;
use runhook_core::{AsyncRunOutputFetcher, Content, CoreError, RunId, RunInfo, RunOutput};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{SubmitRunResponse, RUNS_GET, RUNS_GET_OUTPUT, RUNS_SUBMIT};
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Async client for the Jobs REST API.
pub struct JobsClient {
    inner: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl JobsClient {
    /// Create a new client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            inner,
            base_url: config.base_url()?,
            token: config.token.clone(),
        })
    }

    /// Fetch details of a run, including its sub-tasks.
    pub async fn get_run(&self, run_id: RunId) -> Result<RunInfo, ClientError> {
        self.get_json(RUNS_GET, run_id).await
    }

    /// Fetch the output of a single task run.
    pub async fn get_run_output(&self, run_id: RunId) -> Result<RunOutput, ClientError> {
        self.get_json(RUNS_GET_OUTPUT, run_id).await
    }

    /// Normalize `payload` and submit it as a one-time run.
    ///
    /// Nothing is sent when the payload cannot be normalized.
    pub async fn submit_run(&self, payload: &Content) -> Result<RunId, ClientError> {
        let body = payload.normalize()?;
        let url = format!("{}{}", self.base_url, RUNS_SUBMIT);
        debug!(url = %url, "POST request");

        let response = self.authorize(self.inner.post(&url)).json(&body).send().await?;
        let submitted: SubmitRunResponse = Self::parse(response).await?;
        Ok(submitted.run_id)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, run_id: RunId) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, run_id = %run_id, "GET request");

        let response = self
            .authorize(self.inner.get(&url))
            .query(&[("run_id", run_id.get())])
            .send()
            .await?;
        Self::parse(response).await
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl AsyncRunOutputFetcher for JobsClient {
    async fn get_run_output(&self, run_id: RunId) -> Result<RunOutput, CoreError> {
        JobsClient::get_run_output(self, run_id)
            .await
            .map_err(|e| CoreError::run_output_unavailable(run_id.get(), e))
    }
}
