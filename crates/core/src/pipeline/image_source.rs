use crate::shared::frame::Frame;

/// Domain interface for the batch of images to cluster faces across.
///
/// Images are addressed by 0-based position; the pipeline reports them to
/// users 1-based.
pub trait ImageSource: Send {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes the image at `index`. `Ok(None)` means it could not be loaded.
    fn load(&mut self, index: usize) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}
