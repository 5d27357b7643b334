use crate::shared::frame::Frame;

/// Domain interface for face embedding inference.
///
/// Produces an `EMBEDDING_SIZE`-long, L2-normalized vector for a face crop.
/// `Ok(None)` means inference ran but yielded nothing usable for this crop.
pub trait FaceEmbedder: Send {
    fn embed(&mut self, crop: &Frame) -> Result<Option<Vec<f32>>, Box<dyn std::error::Error>>;
}
