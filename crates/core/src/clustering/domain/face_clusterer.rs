//! Greedy nearest-centroid clustering of face embeddings.
//!
//! Each face, in input order, joins the existing cluster whose centroid is
//! most similar to it, provided the similarity reaches the threshold;
//! otherwise it opens a new cluster. Earlier assignments are never revisited,
//! so input order changes the result.

use std::fmt;
use std::str::FromStr;

use crate::clustering::domain::cluster::Cluster;
use crate::clustering::domain::face_record::FaceRecord;
use crate::clustering::domain::similarity::{l2_normalized, similarity_or_zero};
use crate::shared::constants::{DEFAULT_THRESHOLD, LENIENT_THRESHOLD, STRICT_THRESHOLD};

/// Named similarity thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThresholdPreset {
    #[default]
    Default,
    /// Minimizes different-person merges.
    Strict,
    /// Minimizes same-person splits.
    Lenient,
}

impl ThresholdPreset {
    pub fn threshold(self) -> f32 {
        match self {
            ThresholdPreset::Default => DEFAULT_THRESHOLD,
            ThresholdPreset::Strict => STRICT_THRESHOLD,
            ThresholdPreset::Lenient => LENIENT_THRESHOLD,
        }
    }
}

impl FromStr for ThresholdPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(ThresholdPreset::Default),
            "strict" => Ok(ThresholdPreset::Strict),
            "lenient" => Ok(ThresholdPreset::Lenient),
            _ => Err(format!(
                "Threshold preset must be one of: default, strict, lenient, got '{s}'"
            )),
        }
    }
}

impl fmt::Display for ThresholdPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThresholdPreset::Default => "default",
            ThresholdPreset::Strict => "strict",
            ThresholdPreset::Lenient => "lenient",
        };
        f.write_str(name)
    }
}

/// Floor a candidate score must beat, whatever the threshold.
const MIN_SIMILARITY: f32 = -1.0;

/// Single-pass greedy face clusterer.
///
/// Holds no state between calls; each [`FaceClusterer::cluster`] run is
/// independent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceClusterer {
    threshold: f32,
}

impl FaceClusterer {
    /// Any value is accepted. Above 1 every face opens its own cluster; at or
    /// below -1 a face still needs a score above -1 to join one. A NaN
    /// threshold matches nothing.
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn from_preset(preset: ThresholdPreset) -> Self {
        Self::new(preset.threshold())
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Partitions `records` into clusters, largest first.
    ///
    /// Centroids are recomputed from all members for every comparison rather
    /// than updated incrementally; the two differ at the margin once
    /// normalization is applied. Equal-sized clusters keep creation order.
    pub fn cluster<C>(&self, records: Vec<FaceRecord<C>>) -> Vec<Cluster<C>> {
        if records.is_empty() {
            return Vec::new();
        }

        let mut clusters: Vec<Cluster<C>> = Vec::new();
        let mut next_id = 0;

        for record in records {
            let probe = l2_normalized(&record.embedding);

            match self.best_match(&clusters, &probe) {
                Some(idx) => clusters[idx].push(record),
                None => {
                    clusters.push(Cluster::new(next_id, record));
                    next_id += 1;
                }
            }
        }

        clusters.sort_by(|a, b| b.len().cmp(&a.len()));
        clusters
    }

    /// Index of the most similar qualifying cluster. Ties go to the earliest
    /// cluster since a later one must be strictly better to take over.
    ///
    /// The score must reach the threshold and beat -1, so exactly opposite
    /// faces never merge. NaN scores fail both comparisons.
    fn best_match<C>(&self, clusters: &[Cluster<C>], probe: &[f32]) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_score = MIN_SIMILARITY;
        for (idx, cluster) in clusters.iter().enumerate() {
            let score = similarity_or_zero(probe, &cluster.centroid());
            if score >= self.threshold && score > best_score {
                best = Some(idx);
                best_score = score;
            }
        }
        best
    }
}

impl Default for FaceClusterer {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
