//! Semantic search over the roster: the embedding index built at startup and
//! the matcher that ranks it against a query.

pub mod index;
pub mod matcher;

pub use index::EmbeddingIndex;
pub use matcher::{Matcher, RankedMatch};

/// Guards the denominator against zero-norm vectors.
pub const SIMILARITY_EPSILON: f32 = 1e-7;

/// `dot(a, b) / (|a| * |b| + ε)`, in `[-1, 1]`.
///
/// Vectors of different lengths come from different embedding spaces and
/// score `0.0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    dot / (norm_a * norm_b + SIMILARITY_EPSILON)
}
