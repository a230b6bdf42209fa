//! Deterministic feature-hashing embedder.
//!
//! Maps each token into one of `dim` signed buckets via SHA-256 and
//! L2-normalizes the result. No model files, stable across platforms and
//! runs, which makes analysis output reproducible for a fixed snapshot.
//! Token overlap is the only semantic signal, so this backend is a baseline:
//! a model-backed `EmbedderBackend` can replace it without touching callers.

use ndarray::Array1;
use sha2::{Digest, Sha256};

use crate::embedder::EmbedderBackend;

/// Default number of hash buckets.
pub const DEFAULT_DIM: usize = 256;

pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// Lowercase alphanumeric tokens, single characters dropped.
    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 1)
            .map(String::from)
            .collect()
    }

    /// Stable (bucket, sign) for a token.
    fn hash_token(&self, token: &str) -> (usize, f32) {
        let digest = Sha256::digest(token.as_bytes());
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&digest[..8]);
        let h = u64::from_be_bytes(raw);
        let bucket = (h % self.dim as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        (bucket, sign)
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}

impl EmbedderBackend for HashEmbedder {
    fn embed(&self, text: &str) -> Option<Array1<f32>> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return None;
        }

        let mut vector = Array1::<f32>::zeros(self.dim);
        for token in &tokens {
            let (bucket, sign) = self.hash_token(token);
            vector[bucket] += sign;
        }

        let norm = vector.dot(&vector).sqrt();
        if norm == 0.0 {
            // Possible when signed counts cancel exactly.
            return None;
        }
        Some(vector / norm)
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn is_available(&self) -> bool {
        true
    }
}
