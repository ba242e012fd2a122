//! Text-to-vector embedding.
//!
//! [`EmbeddingProvider`] is the seam between the search code and whatever
//! produces vectors. The roster index and every query must go through the
//! same provider instance so both live in one embedding space.

pub mod hash;
pub mod local;

use anyhow::Result;

use crate::config::EmbeddingConfig;

/// Trait for embedding text into vectors.
///
/// Methods are synchronous; callers on the async runtime should go through
/// `tokio::task::spawn_blocking`.
pub trait EmbeddingProvider: Send + Sync {
    /// Short provider name for logs and `/health`.
    fn name(&self) -> &'static str;

    /// Number of dimensions every output vector has.
    fn dimensions(&self) -> usize;

    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, preserving input order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Create the provider named by `config.provider`.
///
/// `"local"` needs the ONNX model and tokenizer on disk; `"hash"` needs nothing.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "local" => Ok(Box::new(local::LocalEmbeddingProvider::new(&config.model_dir)?)),
        "hash" => Ok(Box::new(hash::HashEmbeddingProvider::new(config.hash_dim))),
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: local, hash"),
    }
}

/// L2-normalize in place. A zero vector is left untouched.
pub(crate) fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: &str) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: provider.to_string(),
            model_dir: "/nonexistent/model".into(),
            hash_dim: 64,
        }
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector() {
        let mut v = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_create_hash_provider() {
        let provider = create_provider(&config("hash")).unwrap();
        assert_eq!(provider.name(), "hash");
        assert_eq!(provider.dimensions(), 64);
    }

    #[test]
    fn test_create_local_provider_without_model_fails() {
        assert!(create_provider(&config("local")).is_err());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let err = create_provider(&config("openai")).err().unwrap();
        assert!(err.to_string().contains("unknown embedding provider"));
    }
}
