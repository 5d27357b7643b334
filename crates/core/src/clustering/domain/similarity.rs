//! Vector similarity for L2-normalized face embeddings.
//!
//! For unit-length vectors the dot product equals cosine similarity, so
//! nothing here divides by magnitudes.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityError {
    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Cosine similarity of two L2-normalized vectors.
///
/// Fails with [`SimilarityError::DimensionMismatch`] when the lengths differ.
/// Accumulates in `f64`; the result may exceed `[-1, 1]` by rounding error.
pub fn similarity(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    check_dimensions(a, b)?;
    Ok(dot(a, b))
}

/// Like [`similarity`], but a length mismatch scores `0.0` instead of failing.
///
/// Used on the clustering hot path so one malformed record cannot abort a batch.
pub fn similarity_or_zero(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    dot(a, b)
}

/// Euclidean distance between two embeddings (0 means identical).
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    check_dimensions(a, b)?;
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = (*x as f64) - (*y as f64);
            d * d
        })
        .sum();
    Ok(sum.sqrt() as f32)
}

/// Scales `v` to unit length in place. An all-zero vector is left as is.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt() as f32;
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Copying form of [`l2_normalize`].
pub fn l2_normalized(v: &[f32]) -> Vec<f32> {
    let mut out = v.to_vec();
    l2_normalize(&mut out);
    out
}

fn check_dimensions(a: &[f32], b: &[f32]) -> Result<(), SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum::<f64>() as f32
}
