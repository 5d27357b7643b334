use std::sync::Arc;

use serde::Serialize;

use crate::clustering::domain::cluster::Cluster;
use crate::shared::frame::Frame;

/// Per-person reporting view of one cluster.
///
/// Serialized field names (`personId`, `faceCount`, `imageIndices`) are the
/// contract exporters rely on. The representative crop is not serialized.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = ""))]
pub struct ClusterInfo<C = Arc<Frame>> {
    /// Rank in the summarized cluster list, not the cluster's creation id.
    pub person_id: usize,
    pub face_count: usize,
    /// Distinct source image indices, ascending.
    pub image_indices: Vec<usize>,
    /// Crop of the first face ever added to the cluster.
    #[serde(skip)]
    pub representative_face: C,
}

/// Result of one clustering run, ready for export or display.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = ""))]
pub struct ClusteringSummary<C = Arc<Frame>> {
    pub total_faces: usize,
    pub total_people: usize,
    pub clusters: Vec<ClusterInfo<C>>,
}

impl<C> ClusteringSummary<C> {
    pub fn empty() -> Self {
        Self {
            total_faces: 0,
            total_people: 0,
            clusters: Vec::new(),
        }
    }

    /// Representative crop handles, in person order.
    ///
    /// These are the only crops a caller must keep alive after summarizing.
    pub fn representatives(&self) -> impl Iterator<Item = &C> {
        self.clusters.iter().map(|c| &c.representative_face)
    }
}

/// Builds the summary for `clusters` in the order given.
///
/// Does not re-sort: `person_id` is each cluster's position in the slice.
pub fn summarize<C: Clone>(clusters: &[Cluster<C>]) -> ClusteringSummary<C> {
    let infos: Vec<ClusterInfo<C>> = clusters
        .iter()
        .enumerate()
        .filter_map(|(person_id, cluster)| {
            let first = cluster.members().first()?;

            let mut image_indices: Vec<usize> =
                cluster.members().iter().map(|m| m.image_index).collect();
            image_indices.sort_unstable();
            image_indices.dedup();

            Some(ClusterInfo {
                person_id,
                face_count: cluster.len(),
                image_indices,
                representative_face: first.crop.clone(),
            })
        })
        .collect();

    ClusteringSummary {
        total_faces: infos.iter().map(|c| c.face_count).sum(),
        total_people: infos.len(),
        clusters: infos,
    }
}
