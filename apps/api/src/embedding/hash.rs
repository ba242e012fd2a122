//! Deterministic feature-hashing embedder.
//!
//! No model files, no training: each lowercase alphanumeric token is hashed
//! into one of `dimension` buckets with a hashed sign, then the vector is
//! L2-normalized. Texts sharing vocabulary land close together, which is
//! enough for offline development and tests. Vectors are stable across runs
//! and Rust versions because the hasher keys are fixed.

use anyhow::Result;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

use super::{l2_normalize, EmbeddingProvider};

// Changing either key changes every vector.
const HASH_KEY_0: u64 = 0x0123_4567_89ab_cdef;
const HASH_KEY_1: u64 = 0xfedc_ba98_7654_3210;

pub struct HashEmbeddingProvider {
    dimension: usize,
}

impl HashEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash(token: &str, salt: u8) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_KEY_0, HASH_KEY_1);
        salt.hash(&mut hasher);
        token.hash(&mut hasher);
        hasher.finish()
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

impl EmbeddingProvider for HashEmbeddingProvider {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn dimensions(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in tokenize(text) {
            let idx = (Self::hash(&token, 0) % self.dimension as u64) as usize;
            let sign = if Self::hash(&token, 1) % 2 == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
        }
        l2_normalize(&mut vector);
        Ok(vector)
    }
}
