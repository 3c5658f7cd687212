//! Blocking HTTP client for the Jobs API.
//!
//! Must not be created or used from inside an async runtime; run it on a
//! dedicated thread (e.g. `tokio::task::spawn_blocking`).

use std::time::Duration;

use runhook_core::{Content, CoreError, RunId, RunInfo, RunOutput, RunOutputFetcher};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{SubmitRunResponse, RUNS_GET, RUNS_GET_OUTPUT, RUNS_SUBMIT};
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Blocking client for the Jobs REST API.
pub struct BlockingJobsClient {
    inner: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl BlockingJobsClient {
    /// Create a new client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url()?;
        let inner = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            inner,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Fetch details of a run, including its sub-tasks.
    pub fn get_run(&self, run_id: RunId) -> Result<RunInfo, ClientError> {
        self.get_json(RUNS_GET, run_id)
    }

    /// Fetch the output of a single task run.
    pub fn get_run_output(&self, run_id: RunId) -> Result<RunOutput, ClientError> {
        self.get_json(RUNS_GET_OUTPUT, run_id)
    }

    /// Normalize `payload` and submit it as a one-time run.
    pub fn submit_run(&self, payload: &Content) -> Result<RunId, ClientError> {
        let body = payload.normalize()?;
        let url = format!("{}{}", self.base_url, RUNS_SUBMIT);
        debug!(url = %url, "POST request");

        let response = self.authorize(self.inner.post(&url)).json(&body).send()?;
        let submitted: SubmitRunResponse = Self::parse(response)?;
        Ok(submitted.run_id)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, run_id: RunId) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, run_id = %run_id, "GET request");

        let response = self
            .authorize(self.inner.get(&url))
            .query(&[("run_id", run_id.get())])
            .send()?;
        Self::parse(response)
    }

    fn authorize(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn parse<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

impl RunOutputFetcher for BlockingJobsClient {
    fn get_run_output(&self, run_id: RunId) -> Result<RunOutput, CoreError> {
        BlockingJobsClient::get_run_output(self, run_id)
            .map_err(|e| CoreError::run_output_unavailable(run_id.get(), e))
    }
}
