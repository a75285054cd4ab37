//! Nearest-neighbor classification over labeled instances

use std::collections::BTreeMap;

use serde::Serialize;

use crate::feature::{Instance, SequenceType};
use crate::geometry::distance::{
    minimum_cosine_distance, squared_euclidean_distance, OrientationStyle,
};

/// One ranked recognition result. Output only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// Nearest-neighbor scorer over the stored instance collection.
#[derive(Debug, Default)]
pub struct InstanceClassifier {
    instances: Vec<Instance>,
}

impl InstanceClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_instance(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    /// Remove the instance derived from the gesture with this id,
    /// regardless of label.
    pub fn remove_instance(&mut self, id: u64) {
        self.instances.retain(|instance| instance.id != id);
    }

    /// Remove every instance carrying this label.
    pub fn remove_instances(&mut self, label: &str) {
        self.instances
            .retain(|instance| instance.label.as_deref() != Some(label));
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Score a query vector against every stored instance and rank the
    /// labels.
    ///
    /// Instances whose vector length differs from the query are skipped
    /// silently; they represent gestures stored under a different sequence
    /// type and cannot be compared. Each label scores as its best-matching
    /// example (`1/distance`, infinite for an exact match), not an average.
    /// Results are sorted by descending score; equal scores rank by label
    /// in ascending lexicographic order.
    pub fn classify(
        &self,
        sequence_type: SequenceType,
        orientation_style: OrientationStyle,
        query: &[f32],
    ) -> Vec<Prediction> {
        let mut best_per_label: BTreeMap<&str, f64> = BTreeMap::new();
        for instance in &self.instances {
            let label = match instance.label.as_deref() {
                Some(label) => label,
                None => continue,
            };
            if instance.vector.len() != query.len() {
                continue;
            }
            let distance = match sequence_type {
                SequenceType::Sensitive => {
                    minimum_cosine_distance(&instance.vector, query, orientation_style)
                }
                SequenceType::Invariant => squared_euclidean_distance(&instance.vector, query),
            };
            let weight = if distance == 0.0 {
                f64::INFINITY
            } else {
                1.0 / distance
            };
            let entry = best_per_label.entry(label).or_insert(f64::NEG_INFINITY);
            if weight > *entry {
                *entry = weight;
            }
        }

        let mut predictions: Vec<Prediction> = best_per_label
            .into_iter()
            .map(|(label, score)| Prediction {
                label: label.to_string(),
                score,
            })
            .collect();
        // The map iterates labels in ascending order, so this stable sort
        // leaves equal scores ranked lexicographically
        predictions.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        predictions
    }
}
