//! Gestures and gesture id generation

use std::sync::atomic::{AtomicU64, Ordering};

use super::stroke::{fit_to_box, Stroke};
use crate::geometry::bounds::BoundingBox;
use crate::geometry::sampling::temporal_sampling;

/// Source of unique, roughly chronological gesture ids.
///
/// Ids combine a wall-clock millisecond base captured at construction with
/// an atomic counter, so they stay unique within a process and sort in
/// rough creation order. Inject one generator per process instead of
/// relying on global state.
#[derive(Debug)]
pub struct GestureIdGenerator {
    base: u64,
    counter: AtomicU64,
}

impl GestureIdGenerator {
    /// Seed the generator from the current wall clock.
    pub fn new() -> Self {
        Self::with_base(chrono::Utc::now().timestamp_millis() as u64)
    }

    /// Seed the generator from an explicit base value.
    pub fn with_base(base: u64) -> Self {
        Self {
            base,
            counter: AtomicU64::new(0),
        }
    }

    /// Produce the next unique id.
    pub fn next_id(&self) -> u64 {
        self.base + self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for GestureIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// One or more strokes treated as a single recognizable shape.
///
/// A gesture starts empty at stroke-capture start and grows append-only as
/// the user lifts and continues touch; the bounding box is maintained
/// incrementally. Once recognition or storage consumes it the gesture is
/// treated as immutable (clone before further mutation).
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    id: u64,
    strokes: Vec<Stroke>,
    bounds: Option<BoundingBox>,
}

impl Gesture {
    /// Create an empty gesture with a fresh id from the generator.
    pub fn new(ids: &GestureIdGenerator) -> Self {
        Self::with_id(ids.next_id())
    }

    /// Create an empty gesture with an explicit id (deserialization, tests).
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            strokes: Vec::new(),
            bounds: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Union of all stroke bounding boxes; `None` while the gesture is empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Append a stroke, extending the bounding box incrementally.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        let stroke_bounds = stroke.bounding_box();
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(&stroke_bounds),
            None => stroke_bounds,
        });
        self.strokes.push(stroke);
    }

    /// Sum of all stroke lengths.
    pub fn length(&self) -> f32 {
        self.strokes.iter().map(Stroke::length).sum()
    }

    /// Write the gesture in its binary wire form (see the store codec for
    /// the layout).
    pub fn serialize<W: std::io::Write + ?Sized>(&self, sink: &mut W) -> crate::Result<()> {
        crate::store::codec::write_gesture(sink, self)
    }

    /// Read a gesture back from its binary wire form. A malformed stream
    /// fails with [`crate::Error::CorruptData`] and consumes no caller
    /// state.
    pub fn deserialize<R: std::io::Read + ?Sized>(source: &mut R) -> crate::Result<Self> {
        crate::store::codec::read_gesture(source)
    }

    /// Produce renderable polylines for the UI layer: each stroke resampled
    /// to `num_samples` points, scaled as a group to fit a
    /// `sample_width x sample_height` pixel box minus an `edge` border.
    /// Read-only; the gesture is not modified.
    pub fn to_polylines(
        &self,
        sample_width: f32,
        sample_height: f32,
        edge: f32,
        num_samples: usize,
    ) -> Vec<Vec<(f32, f32)>> {
        let bounds = match self.bounds {
            Some(bounds) => bounds,
            None => return Vec::new(),
        };
        self.strokes
            .iter()
            .map(|stroke| {
                let mut sampled = temporal_sampling(stroke.flattened(), num_samples);
                fit_to_box(&mut sampled, &bounds, sample_width, sample_height, edge);
                sampled
                    .chunks_exact(2)
                    .map(|pair| (pair[0], pair[1]))
                    .collect()
            })
            .collect()
    }
}
