use std::sync::Arc;

use crate::clustering::domain::clustering_summary::{summarize, ClusteringSummary};
use crate::clustering::domain::face_clusterer::FaceClusterer;
use crate::clustering::domain::face_record::FaceRecord;
use crate::detection::domain::face_cropper::FaceCropper;
use crate::detection::domain::face_detector::FaceDetector;
use crate::embedding::domain::face_embedder::FaceEmbedder;
use crate::pipeline::clustering_event::ClusteringEvent;
use crate::pipeline::image_source::ImageSource;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Batch face clustering pipeline: load → detect → crop → embed → cluster → summarize.
///
/// A failure on one image is reported as [`ClusteringEvent::Error`] and the
/// batch carries on. Without an embedder the pipeline only counts faces and
/// the summary comes back empty.
pub struct ClusterFacesUseCase {
    source: Box<dyn ImageSource>,
    detector: Box<dyn FaceDetector>,
    cropper: Box<dyn FaceCropper>,
    embedder: Option<Box<dyn FaceEmbedder>>,
    clusterer: FaceClusterer,
}

impl ClusterFacesUseCase {
    pub fn new(
        source: Box<dyn ImageSource>,
        detector: Box<dyn FaceDetector>,
        cropper: Box<dyn FaceCropper>,
        embedder: Option<Box<dyn FaceEmbedder>>,
        clusterer: FaceClusterer,
    ) -> Self {
        Self {
            source,
            detector,
            cropper,
            embedder,
            clusterer,
        }
    }

    /// Runs the whole batch, reporting through `on_event`.
    ///
    /// The final event is always [`ClusteringEvent::Success`] carrying the
    /// same summary that is returned. Crops that are not a cluster
    /// representative are released before it is emitted.
    pub fn execute(&mut self, on_event: &mut dyn FnMut(ClusteringEvent)) -> ClusteringSummary {
        let total = self.source.len();
        let mut detection_results = Vec::with_capacity(total);
        let mut records: Vec<FaceRecord> = Vec::new();

        for index in 0..total {
            let image_index = index + 1;
            on_event(ClusteringEvent::Progress {
                current: image_index,
                total,
                message: format!("Processing image {image_index}/{total}..."),
            });

            let outcome =
                self.process_image(index, &mut records, &mut detection_results, on_event);
            if let Err(e) = outcome {
                let message = format!("Image {image_index}: error - {e}");
                log::warn!("{message}");
                on_event(ClusteringEvent::Error {
                    image_index: Some(image_index),
                    message,
                });
            }
        }

        let summary = if records.is_empty() {
            ClusteringSummary::empty()
        } else {
            let clusters = self.clusterer.cluster(records);
            summarize(&clusters)
        };
        log::info!(
            "Clustered {} faces into {} people",
            summary.total_faces,
            summary.total_people
        );

        on_event(ClusteringEvent::Success {
            summary: summary.clone(),
            detection_results,
        });
        summary
    }

    fn process_image(
        &mut self,
        index: usize,
        records: &mut Vec<FaceRecord>,
        detection_results: &mut Vec<String>,
        on_event: &mut dyn FnMut(ClusteringEvent),
    ) -> Result<(), Box<dyn std::error::Error>> {
        let image_index = index + 1;

        let Some(frame) = self.source.load(index)? else {
            let line = format!("Image {image_index}: failed to load");
            log::warn!("{line}");
            detection_results.push(line);
            return Ok(());
        };

        let boxes = self.detector.detect(&frame)?;
        let line = format!("Image {image_index}: {} faces found", boxes.len());
        log::debug!("{line}");
        detection_results.push(line);
        on_event(ClusteringEvent::ImageProcessed {
            image_index,
            face_count: boxes.len(),
        });

        self.embed_faces(&frame, &boxes, image_index, records)
    }

    /// Appends one record per face that crops and embeds successfully. Boxes
    /// without area are never handed to the cropper.
    fn embed_faces(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
        image_index: usize,
        records: &mut Vec<FaceRecord>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let Some(embedder) = self.embedder.as_mut() else {
            return Ok(());
        };

        for (face_index, bounding_box) in boxes.iter().enumerate() {
            if bounding_box.is_empty() {
                log::debug!("Image {image_index}: skipping empty box for face {face_index}");
                continue;
            }
            let Some(crop) = self.cropper.crop(frame, bounding_box)? else {
                continue;
            };
            let Some(embedding) = embedder.embed(&crop)? else {
                continue;
            };
            records.push(FaceRecord::new(
                embedding,
                Arc::new(crop),
                *bounding_box,
                image_index,
                face_index,
            ));
        }
        Ok(())
    }
}
