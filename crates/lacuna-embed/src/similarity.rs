//! Pairwise cosine similarity over dense embeddings.

use ndarray::Array1;

/// Cosine similarity in [-1, 1].
///
/// Returns `None` when either vector is empty or has zero norm: similarity
/// is undefined there and callers must skip the pair, never score it as 0.
pub fn cosine_similarity(a: &Array1<f32>, b: &Array1<f32>) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some(a.dot(b) / (norm_a * norm_b))
}
