use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Domain interface for cutting a detected face out of its source image.
///
/// Implementations typically square the box, add margin and resize to the
/// embedder's input size. `Ok(None)` means the box could not be cropped
/// (e.g. it lies outside the image) and the face should be skipped.
pub trait FaceCropper: Send {
    fn crop(
        &self,
        frame: &Frame,
        bounding_box: &BoundingBox,
    ) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}
