//! Per-node embedding memoization shared by all gap detectors.
//!
//! One index is built per analysis run. Embeddings are computed at most once
//! per node id; the engine warms the whole index before detectors start, and
//! the interior mutex keeps lazy fills safe if detectors ever run on worker
//! threads.

use std::collections::HashMap;
use std::sync::Arc;

use ndarray::Array1;
use parking_lot::Mutex;
use tracing::debug;

use lacuna_core::Node;

use crate::embedder::EmbedderBackend;
use crate::similarity::cosine_similarity;

pub struct EmbeddingIndex {
    embedder: Arc<dyn EmbedderBackend>,
    /// Node id → embedder input text (`name` + `description`).
    texts: HashMap<String, String>,
    /// Node id → memoized result. `Some(None)` records "undefined" so a
    /// blank description is not re-embedded on every lookup.
    cache: Mutex<HashMap<String, Option<Array1<f32>>>>,
}

impl EmbeddingIndex {
    /// Create an index over the given nodes. Precomputed embeddings carried
    /// on a node seed the cache without calling the backend.
    pub fn new(nodes: &[Node], embedder: Arc<dyn EmbedderBackend>) -> Self {
        let mut texts = HashMap::with_capacity(nodes.len());
        let mut cache = HashMap::new();
        for node in nodes {
            texts.insert(node.id.clone(), node.embed_text());
            if let Some(vector) = &node.embedding {
                cache.insert(node.id.clone(), Some(Array1::from_vec(vector.clone())));
            }
        }
        Self {
            embedder,
            texts,
            cache: Mutex::new(cache),
        }
    }

    /// Eagerly compute every missing embedding.
    pub fn warm(&self) {
        let ids: Vec<String> = self.texts.keys().cloned().collect();
        let mut computed = 0usize;
        for id in ids {
            if !self.cache.lock().contains_key(&id) {
                computed += 1;
            }
            self.embedding(&id);
        }
        debug!("Embedding index warmed: {} computed", computed);
    }

    /// Embedding for a node id, `None` when undefined (unknown id, blank
    /// text, or backend unavailable).
    pub fn embedding(&self, id: &str) -> Option<Array1<f32>> {
        if let Some(entry) = self.cache.lock().get(id) {
            return entry.clone();
        }
        let text = self.texts.get(id)?;
        let embedding = if text.trim().is_empty() {
            None
        } else {
            self.embedder.embed(text)
        };
        self.cache
            .lock()
            .insert(id.to_string(), embedding.clone());
        embedding
    }

    /// Cosine similarity between two nodes' embeddings. Symmetric; `None`
    /// when either side is undefined.
    pub fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let va = self.embedding(a)?;
        let vb = self.embedding(b)?;
        cosine_similarity(&va, &vb)
    }
}
