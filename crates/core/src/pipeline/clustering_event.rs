use crate::clustering::domain::clustering_summary::ClusteringSummary;

/// Progress and outcome notifications emitted while clustering a batch.
#[derive(Clone, Debug)]
pub enum ClusteringEvent {
    /// About to process image `current` of `total` (1-based).
    Progress {
        current: usize,
        total: usize,
        message: String,
    },
    /// Detection finished for one image.
    ImageProcessed { image_index: usize, face_count: usize },
    /// The whole batch finished. Always the last event of a run.
    Success {
        summary: ClusteringSummary,
        /// One human-readable line per image, in image order.
        detection_results: Vec<String>,
    },
    /// One image failed; processing continues with the next one.
    Error {
        image_index: Option<usize>,
        message: String,
    },
}
