use std::sync::Arc;

use crate::clustering::domain::face_record::FaceRecord;
use crate::clustering::domain::similarity::l2_normalize;
use crate::shared::constants::EMBEDDING_SIZE;
use crate::shared::frame::Frame;

/// A group of faces believed to be the same person.
///
/// Membership is append-only: a cluster never loses members, never merges
/// and never splits during a run.
#[derive(Clone, Debug)]
pub struct Cluster<C = Arc<Frame>> {
    id: usize,
    members: Vec<FaceRecord<C>>,
}

impl<C> Cluster<C> {
    /// Opens a cluster with its first member.
    pub fn new(id: usize, first: FaceRecord<C>) -> Self {
        Self {
            id,
            members: vec![first],
        }
    }

    /// Creation-order id, unique within one clustering run.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[FaceRecord<C>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn push(&mut self, record: FaceRecord<C>) {
        self.members.push(record);
    }

    pub fn into_members(self) -> Vec<FaceRecord<C>> {
        self.members
    }

    /// L2-normalized mean of all member embeddings, computed from scratch.
    ///
    /// Takes the first member's dimensionality. A member of another length
    /// contributes over the shared prefix only; the divisor is still the
    /// member count. An empty cluster yields the zero vector.
    pub fn centroid(&self) -> Vec<f32> {
        let Some(first) = self.members.first() else {
            return vec![0.0; EMBEDDING_SIZE];
        };

        let mut mean = vec![0.0f32; first.embedding.len()];
        for member in &self.members {
            for (acc, x) in mean.iter_mut().zip(member.embedding.iter()) {
                *acc += x;
            }
        }

        let n = self.members.len() as f32;
        for x in mean.iter_mut() {
            *x /= n;
        }

        l2_normalize(&mut mean);
        mean
    }
}
