//! Embedding engine trait and trivial implementations.
//!
//! The `EmbedderBackend` trait abstracts over embedding generation.
//! Implementations:
//! - `HashEmbedder`: deterministic feature hashing, no model files
//! - `StaticEmbedder`: fixed text→vector table (tests, precomputed stores)
//! - `NoopEmbedder`: always `None`, for graphs analyzed without semantics

use std::collections::HashMap;

use ndarray::Array1;

/// Trait for embedding backends.
///
/// `embed` must be deterministic for the same input text and must return
/// `None` for empty or whitespace-only text: callers treat that as
/// "similarity undefined", never as zero similarity.
pub trait EmbedderBackend: Send + Sync {
    /// Generate an embedding for a text string.
    fn embed(&self, text: &str) -> Option<Array1<f32>>;

    /// Generate embeddings for a batch of texts.
    fn embed_batch(&self, texts: &[&str]) -> Vec<Option<Array1<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Check if the embedder can produce embeddings at all.
    fn is_available(&self) -> bool;
}

/// Placeholder embedder that always returns None.
pub struct NoopEmbedder {
    dim: usize,
}

impl NoopEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl EmbedderBackend for NoopEmbedder {
    fn embed(&self, _text: &str) -> Option<Array1<f32>> {
        None
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Embedder backed by a fixed text→vector table.
///
/// Texts missing from the table embed to `None`. Useful for tests and for
/// deployments where embeddings were computed offline.
pub struct StaticEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dim: usize,
}

impl StaticEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dim,
        }
    }

    pub fn insert(&mut self, text: impl Into<String>, vector: Vec<f32>) {
        self.vectors.insert(text.into(), vector);
    }

    pub fn with(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.insert(text, vector);
        self
    }
}

impl EmbedderBackend for StaticEmbedder {
    fn embed(&self, text: &str) -> Option<Array1<f32>> {
        if text.trim().is_empty() {
            return None;
        }
        self.vectors.get(text).map(|v| Array1::from_vec(v.clone()))
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn is_available(&self) -> bool {
        true
    }
}
