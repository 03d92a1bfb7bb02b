//! Clients for the pretrained summarization model.
//!
//! The model is treated as an opaque collaborator with one operation,
//! [`SummarizationModel::summarize`]. Two HTTP adapters are provided: a Hugging Face inference
//! client (the default, which runs the seq2seq pipeline with explicit length bounds) and an Ollama
//! client that phrases the bounds as a prompt. The client is built once at startup with
//! [`build_summarization_model`] and handed to the processing service.

use crate::config::{Config, SummarizationProvider};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced while invoking the summarization model.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider could not be reached or the model endpoint does not exist.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// A single model invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationRequest {
    /// Text to summarize.
    pub text: String,
    /// Upper bound on the summary length.
    pub max_length: usize,
    /// Lower bound on the summary length.
    pub min_length: usize,
    /// Whether sampling is enabled; `false` requests greedy decoding.
    pub do_sample: bool,
}

/// Interface implemented by summarization backends.
#[async_trait]
pub trait SummarizationModel: Send + Sync {
    /// Produce an abstractive summary of `request.text` within the requested bounds.
    async fn summarize(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError>;
}

/// Build the summarization model client selected by configuration.
pub fn build_summarization_model(config: &Config) -> Arc<dyn SummarizationModel> {
    match config.summarization_provider {
        SummarizationProvider::HuggingFace => Arc::new(HuggingFaceSummarizationClient::new(
            config.hf_inference_url.clone(),
            config.summarization_model.clone(),
            config.summarization_model_revision.clone(),
            config.hf_api_token.clone(),
        )),
        SummarizationProvider::Ollama => Arc::new(OllamaSummarizationClient::new(
            config.ollama_url.clone(),
            config.summarization_model.clone(),
        )),
    }
}

fn http_client(user_agent: &str) -> Client {
    Client::builder()
        .user_agent(user_agent)
        .build()
        .unwrap_or_else(|error| {
            tracing::warn!(%error, "Falling back to default reqwest client");
            Client::new()
        })
}

/// Client for the Hugging Face inference protocol (`POST /models/{model}`).
pub struct HuggingFaceSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
    revision: Option<String>,
    api_token: Option<String>,
}

impl HuggingFaceSummarizationClient {
    /// Create a client for `model` (optionally pinned to `revision`) served at `base_url`.
    pub fn new(
        base_url: String,
        model: String,
        revision: Option<String>,
        api_token: Option<String>,
    ) -> Self {
        Self {
            http: http_client("rusty-summary/hf"),
            base_url,
            model,
            revision,
            api_token,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Deserialize)]
struct HuggingFaceSummary {
    summary_text: String,
}

#[async_trait]
impl SummarizationModel for HuggingFaceSummarizationClient {
    async fn summarize(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "inputs": request.text,
            "parameters": {
                "max_length": request.max_length,
                "min_length": request.min_length,
                "do_sample": request.do_sample,
            },
            "options": {
                "wait_for_model": true,
            }
        });

        let mut builder = self.http.post(self.endpoint()).json(&payload);
        if let Some(revision) = self.revision.as_deref() {
            builder = builder.query(&[("revision", revision)]);
        }
        if let Some(token) = self.api_token.as_deref() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|error| {
            SummarizationClientError::ProviderUnavailable(format!(
                "failed to reach inference endpoint at {}: {error}",
                self.base_url
            ))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "model endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "inference endpoint returned {status}: {body}"
            )));
        }

        let summaries: Vec<HuggingFaceSummary> = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode inference response: {error}"
            ))
        })?;

        summaries
            .into_iter()
            .next()
            .map(|summary| summary.summary_text)
            .ok_or_else(|| {
                SummarizationClientError::InvalidResponse("inference response was empty".into())
            })
    }
}

/// Client for a local Ollama runtime (`POST /api/generate`).
pub struct OllamaSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizationClient {
    /// Create a client for `model` served by the Ollama runtime at `base_url`.
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            http: http_client("rusty-summary/ollama"),
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

fn build_prompt(request: &SummarizationRequest) -> String {
    format!(
        "Summarize the following text in one paragraph of {} to {} words. \
         Return only the summary.\n\n{}",
        request.min_length, request.max_length, request.text
    )
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl SummarizationModel for OllamaSummarizationClient {
    async fn summarize(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError> {
        let temperature = if request.do_sample { 0.7 } else { 0.0 };
        let payload = json!({
            "model": self.model,
            "prompt": build_prompt(&request),
            "stream": false,
            "options": {
                "temperature": temperature,
                "num_predict": request.max_length * 2,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Ollama response: {error}"
            ))
        })?;

        if !body.done {
            return Err(SummarizationClientError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.response.trim().to_string())
    }
}
