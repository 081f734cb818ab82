//! Dense vector arithmetic for sentence embeddings
//!
//! Embeddings are stored as `f32` (the precision of pretrained vector
//! files); similarity math is done in `f64`.

/// Dot product of two equally sized vectors
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum()
}

/// L2 norm
pub fn norm(v: &[f32]) -> f64 {
    dot(v, v).sqrt()
}

/// Check whether every component is zero
pub fn is_zero(v: &[f32]) -> bool {
    v.iter().all(|&x| x == 0.0)
}

/// Cosine similarity, defined as 0 when either vector has zero magnitude
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    cosine_with_norms(a, norm(a), b, norm(b))
}

/// Cosine similarity with precomputed norms
///
/// The result is clamped to `[-1, 1]` to absorb rounding error.
pub fn cosine_with_norms(a: &[f32], norm_a: f64, b: &[f32], norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot(a, b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
