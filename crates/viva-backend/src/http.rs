//! HTTP generation backend.
//!
//! Posts a completion request to a text-generation server and reads back a
//! list-of-one `{generated_text}` response. The base model identifier and
//! adapter path are carried opaquely in the request payload; Viva never
//! interprets them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use viva_core::GenerationParams;

use crate::error::BackendError;
use crate::GenerationBackend;

/// Wire format of a generation request.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    adapter: Option<&'a str>,
    prompt: &'a str,
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
}

/// One element of the response list.
#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

/// Backend talking to a text-generation HTTP endpoint.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    base_model: String,
    adapter_path: Option<String>,
}

impl HttpBackend {
    /// Create a backend for the given endpoint and base model.
    pub fn new(endpoint: impl Into<String>, base_model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            base_model: base_model.into(),
            adapter_path: None,
        }
    }

    /// Attach an adapter path, forwarded to the server unchanged.
    pub fn with_adapter(mut self, adapter_path: impl Into<String>) -> Self {
        self.adapter_path = Some(adapter_path.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn base_model(&self) -> &str {
        &self.base_model
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, BackendError> {
        let request = GenerateRequest {
            model: &self.base_model,
            adapter: self.adapter_path.as_deref(),
            prompt,
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            do_sample: params.do_sample,
        };

        debug!(
            endpoint = %self.endpoint,
            prompt_len = prompt.len(),
            max_new_tokens = params.max_new_tokens,
            "Sending generation request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let generations: Vec<Generation> = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        let first = generations.into_iter().next().ok_or(BackendError::EmptyResponse)?;
        if first.generated_text.is_empty() {
            return Err(BackendError::EmptyOutput);
        }
        Ok(first.generated_text)
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        // Smallest possible generation; a reachable, loaded backend answers it.
        let params = GenerationParams {
            max_new_tokens: 1,
            ..GenerationParams::default()
        };
        self.generate("ping", &params).await.map(|_| ())
    }
}
