//! Feature extraction
//!
//! Converts a [`Gesture`] into the fixed-length numeric vector the
//! classifier matches on. Two sampling strategies exist: the
//! sequence-sensitive path resamples a single stroke into an
//! orientation-adjusted trajectory, the sequence-invariant path rasterizes
//! the whole gesture into a spatial patch.

use serde::{Deserialize, Serialize};

use crate::geometry::distance::OrientationStyle;
use crate::geometry::sampling::{spatial_sampling, temporal_sampling};
use crate::geometry::transform::{compute_centroid, rotate, translate};
use crate::model::Gesture;
use crate::{Error, Result};

/// Number of trajectory samples for sequence-sensitive extraction.
pub const TEMPORAL_SAMPLE_COUNT: usize = 16;

/// Grid edge length for sequence-invariant extraction.
pub const SPATIAL_GRID_SIZE: usize = 16;

/// The ten canonical angles a sensitive gesture's rotation snaps to:
/// 0, +/-45, +/-90, +/-135 and 180 degrees from either side.
const CANONICAL_ORIENTATIONS: [f32; 10] = [
    0.0,
    std::f32::consts::FRAC_PI_4,
    std::f32::consts::FRAC_PI_2,
    3.0 * std::f32::consts::FRAC_PI_4,
    std::f32::consts::PI,
    -0.0,
    -std::f32::consts::FRAC_PI_4,
    -std::f32::consts::FRAC_PI_2,
    -3.0 * std::f32::consts::FRAC_PI_4,
    -std::f32::consts::PI,
];

/// Whether recognition treats stroke point order and direction as
/// significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SequenceType {
    /// Point order and direction matter; single-stroke gestures only
    #[default]
    Sensitive,
    /// Spatial raster, ignoring stroke order and direction
    Invariant,
}

/// The numeric feature-vector representation of a gesture.
///
/// `label` is `Some` for a stored training sample and `None` for a
/// recognition query. Created once at insertion time; immutable afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub id: u64,
    pub label: Option<String>,
    pub vector: Vec<f32>,
}

impl Instance {
    /// Extract a feature vector from a gesture under the given
    /// configuration.
    ///
    /// Sequence-sensitive extraction accepts exactly one stroke:
    /// multi-stroke gestures fail with
    /// [`Error::UnsupportedMultiStroke`] rather than silently reading the
    /// first stroke. The resulting vector has 32 components
    /// (sensitive) or 256 components (invariant).
    pub fn from_gesture(
        sequence_type: SequenceType,
        orientation_style: OrientationStyle,
        gesture: &Gesture,
        label: Option<String>,
    ) -> Result<Self> {
        if gesture.stroke_count() == 0 {
            return Err(Error::InvalidInput("gesture has no strokes".to_string()));
        }
        let vector = match sequence_type {
            SequenceType::Sensitive => {
                if gesture.stroke_count() > 1 {
                    return Err(Error::UnsupportedMultiStroke(gesture.stroke_count()));
                }
                oriented_trajectory(orientation_style, gesture)
            }
            SequenceType::Invariant => spatial_sampling(gesture, SPATIAL_GRID_SIZE, false),
        };
        Ok(Self {
            id: gesture.id(),
            label,
            vector,
        })
    }
}

/// Sequence-sensitive sampler: resample the stroke, center it on its
/// centroid, then rotate so its starting direction is canonical.
fn oriented_trajectory(orientation_style: OrientationStyle, gesture: &Gesture) -> Vec<f32> {
    let mut samples = temporal_sampling(gesture.strokes()[0].flattened(), TEMPORAL_SAMPLE_COUNT);
    let (cx, cy) = compute_centroid(&samples);
    let orientation = (samples[1] - cy).atan2(samples[0] - cx);

    let mut adjustment = -orientation;
    if orientation_style != OrientationStyle::Invariant {
        // Snap to the canonical angle needing the smallest correction
        for target in CANONICAL_ORIENTATIONS {
            let delta = target - orientation;
            if delta.abs() < adjustment.abs() {
                adjustment = delta;
            }
        }
    }

    translate(&mut samples, -cx, -cy);
    rotate(&mut samples, adjustment);
    l2_normalize(&mut samples);
    samples
}

/// Scale a vector to unit magnitude. A zero vector (degenerate single-point
/// gesture) is left all-zero instead of dividing by zero.
fn l2_normalize(vector: &mut [f32]) {
    let magnitude = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if magnitude == 0.0 {
        return;
    }
    for v in vector.iter_mut() {
        *v /= magnitude;
    }
}
