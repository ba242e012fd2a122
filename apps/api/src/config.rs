use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Default hosted text-generation endpoint.
pub const DEFAULT_LLM_API_URL: &str =
    "https://api-inference.huggingface.co/models/HuggingFaceH4/zephyr-7b-beta";

/// Application configuration loaded from environment variables.
/// Startup fails if the LLM credential is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub huggingface_api_key: String,
    pub llm_api_url: String,
    pub llm_max_new_tokens: u32,
    pub roster_path: PathBuf,
    pub embedding: EmbeddingConfig,
    pub matching: MatchConfig,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// `local` (ONNX all-MiniLM-L6-v2) or `hash`.
    pub provider: String,
    /// Directory holding `model.onnx` and `tokenizer.json`.
    pub model_dir: PathBuf,
    pub hash_dim: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    pub top_k: usize,
    /// Matches must score strictly above this.
    pub threshold: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            threshold: 0.5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let huggingface_api_key = lookup("HUGGINGFACE_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'HUGGINGFACE_API_KEY' is not set")?;

        let top_k: usize = parse_or(&lookup, "MATCH_TOP_K", 3)?;
        anyhow::ensure!(top_k >= 1, "MATCH_TOP_K must be at least 1");

        let threshold: f32 = parse_or(&lookup, "MATCH_THRESHOLD", 0.5)?;
        anyhow::ensure!(
            (-1.0..=1.0).contains(&threshold),
            "MATCH_THRESHOLD must be between -1 and 1, got {threshold}"
        );

        Ok(Config {
            huggingface_api_key,
            llm_api_url: lookup("LLM_API_URL").unwrap_or_else(|| DEFAULT_LLM_API_URL.to_string()),
            llm_max_new_tokens: parse_or(&lookup, "LLM_MAX_NEW_TOKENS", 180)?,
            roster_path: lookup("ROSTER_PATH")
                .unwrap_or_else(|| "data/employees.json".to_string())
                .into(),
            embedding: EmbeddingConfig {
                provider: lookup("EMBEDDING_PROVIDER").unwrap_or_else(|| "local".to_string()),
                model_dir: lookup("EMBEDDING_MODEL_DIR")
                    .unwrap_or_else(|| "models/all-MiniLM-L6-v2".to_string())
                    .into(),
                hash_dim: parse_or(&lookup, "EMBEDDING_HASH_DIM", 256)?,
            },
            matching: MatchConfig { top_k, threshold },
            port: parse_or(&lookup, "PORT", 8000)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
