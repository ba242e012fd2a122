use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

/// Only the answer is shown; matched records are ignored by this client.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Thin client for the HR API's `/chat` endpoint.
pub struct ChatApi {
    client: Client,
    chat_url: String,
}

impl ChatApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            chat_url: format!("{}/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    /// POST the query and wait for the answer. Failures are returned as-is.
    pub async fn ask(&self, query: &str) -> Result<String> {
        let response: ChatResponse = self
            .client
            .post(&self.chat_url)
            .json(&ChatRequest { query })
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.chat_url))?
            .error_for_status()?
            .json()
            .await
            .context("invalid response from HR API")?;
        Ok(response.answer)
    }
}
