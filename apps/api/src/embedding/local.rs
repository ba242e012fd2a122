//! all-MiniLM-L6-v2 on ONNX Runtime.
//!
//! Tokenize, run the encoder, mean-pool token embeddings under the attention
//! mask, L2-normalize. Output is 384-dimensional.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::info;

use super::{l2_normalize, EmbeddingProvider};

/// Hidden size of all-MiniLM-L6-v2.
pub const MINILM_DIM: usize = 384;

/// The model was trained on sequences of at most 256 tokens.
const MAX_SEQ_LEN: usize = 256;

/// Names tried, in order, for the per-token encoder output.
const HIDDEN_STATE_OUTPUTS: [&str; 2] = ["last_hidden_state", "token_embeddings"];

pub struct LocalEmbeddingProvider {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

// Safety: Tokenizer is Send+Sync and the Session is only reached through the Mutex.
unsafe impl Send for LocalEmbeddingProvider {}
unsafe impl Sync for LocalEmbeddingProvider {}

impl LocalEmbeddingProvider {
    /// Loads `model.onnx` and `tokenizer.json` from `model_dir`.
    pub fn new(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        anyhow::ensure!(
            model_path.exists(),
            "ONNX model not found at {}",
            model_path.display()
        );
        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer not found at {}",
            tokenizer_path.display()
        );

        let session = Session::builder()?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .commit_from_file(&model_path)
            .context("failed to load ONNX model")?;

        info!(model = %model_path.display(), "ONNX model loaded");

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("failed to load tokenizer: {e}"))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("failed to set truncation: {e}"))?;

        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            strategy: tokenizers::PaddingStrategy::BatchLongest,
            ..Default::default()
        }));

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }
}

impl EmbeddingProvider for LocalEmbeddingProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    fn dimensions(&self) -> usize {
        MINILM_DIM
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .context("encoder returned no embedding")
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("tokenization failed: {e}"))?;

        // Padding is BatchLongest, so every row has the same width.
        let rows = encodings.len();
        let cols = encodings[0].get_ids().len();
        let ids: Vec<i64> = encodings
            .iter()
            .flat_map(|e| e.get_ids().iter().map(|&id| id as i64))
            .collect();
        let mask: Vec<i64> = encodings
            .iter()
            .flat_map(|e| e.get_attention_mask().iter().map(|&m| m as i64))
            .collect();

        let shape = [rows as i64, cols as i64];
        let to_tensor =
            |values: Vec<i64>| Tensor::from_array((shape.to_vec(), values.into_boxed_slice()));
        let ids_tensor = to_tensor(ids)?;
        let mask_tensor = to_tensor(mask.clone())?;
        let segment_tensor = to_tensor(vec![0; rows * cols])?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("session lock poisoned: {e}"))?;
        let outputs = session.run(ort::inputs! {
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
            "token_type_ids" => segment_tensor,
        })?;

        let hidden_states = HIDDEN_STATE_OUTPUTS
            .iter()
            .find_map(|name| outputs.get(*name))
            .unwrap_or_else(|| &outputs[0]);
        let (state_shape, states) = hidden_states
            .try_extract_tensor::<f32>()
            .context("failed to read encoder hidden states")?;

        let dims: &[i64] = &state_shape;
        anyhow::ensure!(
            dims.len() == 3 && dims[0] as usize == rows && dims[2] == MINILM_DIM as i64,
            "encoder returned shape {dims:?} for {rows} inputs, expected [{rows}, seq, {MINILM_DIM}]"
        );

        Ok(mean_pool(states, &mask, cols, dims[1] as usize, MINILM_DIM))
    }
}

/// Averages each row's token vectors where the attention mask is set, then
/// L2-normalizes. `states` is `[rows, seq_len, hidden]` flattened and `mask`
/// is `[rows, mask_cols]` flattened.
fn mean_pool(
    states: &[f32],
    mask: &[i64],
    mask_cols: usize,
    seq_len: usize,
    hidden: usize,
) -> Vec<Vec<f32>> {
    states
        .chunks_exact(seq_len * hidden)
        .zip(mask.chunks_exact(mask_cols))
        .map(|(tokens, row_mask)| {
            let mut pooled = vec![0.0f32; hidden];
            let mut kept = 0usize;
            for (token, _) in tokens
                .chunks_exact(hidden)
                .zip(row_mask)
                .filter(|(_, m)| **m != 0)
            {
                for (acc, x) in pooled.iter_mut().zip(token) {
                    *acc += x;
                }
                kept += 1;
            }
            if kept > 0 {
                let n = kept as f32;
                pooled.iter_mut().for_each(|x| *x /= n);
            }
            l2_normalize(&mut pooled);
            pooled
        })
        .collect()
}
