//! Lacuna Embed — similarity service: embedding backends and cosine math.

pub mod embedder;
pub mod hash_embedder;
pub mod index;
pub mod similarity;

pub use embedder::{EmbedderBackend, NoopEmbedder, StaticEmbedder};
pub use hash_embedder::HashEmbedder;
pub use index::EmbeddingIndex;
pub use similarity::cosine_similarity;
