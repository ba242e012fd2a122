use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::embedding::EmbeddingProvider;
use crate::llm_client::LlmClient;
use crate::roster::Roster;
use crate::search::{EmbeddingIndex, Matcher};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<Roster>,
    pub matcher: Matcher,
    pub llm: LlmClient,
    /// Provider name, reported by `/health`.
    pub embedding_provider: &'static str,
}

impl AppState {
    /// Embeds the roster and wires the matcher. Fails if embedding fails.
    pub fn build(
        config: &Config,
        roster: Roster,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let roster = Arc::new(roster);
        let embedding_provider = provider.name();
        let index = Arc::new(EmbeddingIndex::build(roster.clone(), provider)?);

        Ok(AppState {
            roster,
            matcher: Matcher::new(index, config.matching),
            llm: LlmClient::new(
                config.llm_api_url.clone(),
                config.huggingface_api_key.clone(),
                config.llm_max_new_tokens,
            ),
            embedding_provider,
        })
    }
}
