use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;

use crate::clustering::domain::clustering_summary::ClusteringSummary;
use crate::pipeline::cluster_faces_use_case::ClusterFacesUseCase;
use crate::pipeline::clustering_event::ClusteringEvent;

/// Runs a clustering batch on its own thread, streaming events back.
///
/// The receiver yields every event in order and disconnects once the run is
/// over, so `rx.iter()` ends right after [`ClusteringEvent::Success`].
pub fn spawn(use_case: ClusterFacesUseCase) -> Receiver<ClusteringEvent> {
    let (rx, _worker) = spawn_joinable(use_case);
    rx
}

/// Like [`spawn`], also returning the worker handle. Joining it yields the
/// run's summary.
pub fn spawn_joinable(
    mut use_case: ClusterFacesUseCase,
) -> (Receiver<ClusteringEvent>, JoinHandle<ClusteringSummary>) {
    let (tx, rx) = crossbeam_channel::unbounded::<ClusteringEvent>();

    let worker = thread::spawn(move || {
        use_case.execute(&mut |event| {
            // The receiver may have been dropped; the run still finishes.
            let _ = tx.send(event);
        })
    });

    (rx, worker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::domain::face_clusterer::FaceClusterer;
    use crate::detection::domain::face_cropper::FaceCropper;
    use crate::detection::domain::face_detector::FaceDetector;
    use crate::embedding::domain::face_embedder::FaceEmbedder;
    use crate::pipeline::image_source::ImageSource;
    use crate::shared::bounding_box::BoundingBox;
    use crate::shared::constants::EMBEDDING_SIZE;
    use crate::shared::frame::Frame;

    struct BlankImages(usize);

    impl ImageSource for BlankImages {
        fn len(&self) -> usize {
            self.0
        }

        fn load(&mut self, _index: usize) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            Ok(Some(Frame::new(vec![0; 3], 1, 1, 3)))
        }
    }

    struct OneFacePerImage;

    impl FaceDetector for OneFacePerImage {
        fn detect(
            &mut self,
            _frame: &Frame,
        ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
            Ok(vec![BoundingBox::new(0, 0, 1, 1)])
        }
    }

    struct WholeFrameCropper;

    impl FaceCropper for WholeFrameCropper {
        fn crop(
            &self,
            frame: &Frame,
            _bounding_box: &BoundingBox,
        ) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            Ok(Some(frame.clone()))
        }
    }

    struct ConstantEmbedder;

    impl FaceEmbedder for ConstantEmbedder {
        fn embed(&mut self, _crop: &Frame) -> Result<Option<Vec<f32>>, Box<dyn std::error::Error>> {
            let mut v = vec![0.0; EMBEDDING_SIZE];
            v[0] = 1.0;
            Ok(Some(v))
        }
    }

    fn use_case(images: usize) -> ClusterFacesUseCase {
        ClusterFacesUseCase::new(
            Box::new(BlankImages(images)),
            Box::new(OneFacePerImage),
            Box::new(WholeFrameCropper),
            Some(Box::new(ConstantEmbedder)),
            FaceClusterer::default(),
        )
    }

    #[test]
    fn test_streams_events_and_disconnects_after_success() {
        let rx = spawn(use_case(3));
        let events: Vec<ClusteringEvent> = rx.iter().collect();

        // Progress + ImageProcessed per image, then Success.
        assert_eq!(events.len(), 7);
        let Some(ClusteringEvent::Success { summary, .. }) = events.last() else {
            panic!("last event must be Success");
        };
        assert_eq!(summary.total_faces, 3);
        assert_eq!(summary.total_people, 1);
        assert_eq!(summary.clusters[0].image_indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_progress_arrives_in_image_order() {
        let rx = spawn(use_case(4));
        let currents: Vec<usize> = rx
            .iter()
            .filter_map(|e| match e {
                ClusteringEvent::Progress { current, .. } => Some(current),
                _ => None,
            })
            .collect();
        assert_eq!(currents, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_worker_finishes_after_receiver_is_dropped() {
        let (rx, worker) = spawn_joinable(use_case(2));
        drop(rx);

        let summary = worker.join().expect("worker panicked");
        assert_eq!(summary.total_faces, 2);
        assert_eq!(summary.total_people, 1);
    }

    #[test]
    fn test_joined_summary_matches_streamed_success() {
        let (rx, worker) = spawn_joinable(use_case(3));
        let streamed = rx.iter().find_map(|e| match e {
            ClusteringEvent::Success { summary, .. } => Some(summary),
            _ => None,
        });

        let joined = worker.join().expect("worker panicked");
        assert_eq!(streamed, Some(joined));
    }
}
