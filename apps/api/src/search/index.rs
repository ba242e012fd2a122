use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::embedding::EmbeddingProvider;
use crate::roster::Roster;

/// One embedding per roster entry, built once at startup.
///
/// Invariant: `vectors.len() == roster.len()` and `vectors[i]` was computed
/// from `roster.employees()[i]`.
pub struct EmbeddingIndex {
    roster: Arc<Roster>,
    vectors: Vec<Vec<f32>>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl EmbeddingIndex {
    /// Embeds every employee's profile text in a single batch.
    ///
    /// Any provider failure or a malformed output is returned as an error;
    /// there is no partially-built index.
    pub fn build(roster: Arc<Roster>, provider: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let texts: Vec<String> = roster
            .employees()
            .iter()
            .map(|e| e.profile_text())
            .collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

        let vectors = provider
            .embed_batch(&refs)
            .context("failed to embed roster profiles")?;

        anyhow::ensure!(
            vectors.len() == roster.len(),
            "provider returned {} embeddings for {} employees",
            vectors.len(),
            roster.len()
        );
        let dim = provider.dimensions();
        if let Some((i, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dim) {
            anyhow::bail!(
                "embedding for employee {i} has {} dimensions, expected {dim}",
                v.len()
            );
        }

        info!(
            provider = provider.name(),
            dimensions = dim,
            employees = vectors.len(),
            "embedding index built"
        );

        Ok(Self {
            roster,
            vectors,
            provider,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    pub fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
