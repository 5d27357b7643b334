use std::sync::Arc;

use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// One detected and embedded face, tagged with where it came from.
///
/// `C` is the crop handle. The clusterer never looks inside it; it only
/// clones the handle of each cluster's first member into the summary. With
/// the default `Arc<Frame>`, dropping the records afterwards frees every crop
/// that is not a representative.
#[derive(Clone, Debug)]
pub struct FaceRecord<C = Arc<Frame>> {
    /// Face embedding, expected to be `EMBEDDING_SIZE` long and L2-normalized.
    pub embedding: Vec<f32>,
    pub crop: C,
    pub bounding_box: BoundingBox,
    /// 1-based index of the source image.
    pub image_index: usize,
    /// 0-based position among the detections of the source image.
    pub face_index: usize,
}

impl<C> FaceRecord<C> {
    pub fn new(
        embedding: Vec<f32>,
        crop: C,
        bounding_box: BoundingBox,
        image_index: usize,
        face_index: usize,
    ) -> Self {
        Self {
            embedding,
            crop,
            bounding_box,
            image_index,
            face_index,
        }
    }
}
