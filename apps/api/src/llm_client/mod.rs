//! LLM Client: the single outbound path to the hosted text-generation API.
//!
//! No other module talks to the inference endpoint directly.
//! One request per call: no retry, no backoff, and no timeout beyond the
//! HTTP client's own defaults.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

/// One element of the `[{"generated_text": "..."}]` response array.
#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Outcome of a successful (2xx) call.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Continuation text from the first result element.
    Text(String),
    /// 2xx response whose body did not match the expected schema.
    Malformed { body: String },
}

impl Completion {
    /// Parses a 2xx body. Only the first array element is used.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Vec<GeneratedText>>(body) {
            Ok(results) => match results.into_iter().next() {
                Some(first) => Completion::Text(first.generated_text),
                None => Completion::Malformed {
                    body: body.to_string(),
                },
            },
            Err(_) => Completion::Malformed {
                body: body.to_string(),
            },
        }
    }
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    max_new_tokens: u32,
}

impl LlmClient {
    pub fn new(api_url: String, api_key: String, max_new_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            max_new_tokens,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Sends `prompt` and returns only the generated continuation.
    ///
    /// Non-2xx responses become [`LlmError::Api`] carrying the raw body.
    pub async fn generate(&self, prompt: &str) -> Result<Completion, LlmError> {
        let request_body = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: self.max_new_tokens,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("LLM API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion = Completion::from_body(&body);
        match &completion {
            Completion::Text(text) => debug!(chars = text.len(), "LLM call succeeded"),
            Completion::Malformed { body } => warn!("unexpected LLM response shape: {body}"),
        }
        Ok(completion)
    }
}
