//! A single continuous stroke

use super::point::TimedPoint;
use crate::geometry::bounds::{compute_oriented_bounding_box, BoundingBox, OrientedBoundingBox};
use crate::geometry::sampling::temporal_sampling;
use crate::geometry::transform::{scale, translate};
use crate::{Error, Result};

/// One continuous touch-down-to-touch-up path.
///
/// The bounding box, total polyline length, and flattened coordinate array
/// are derived once at construction and always consistent with the point
/// sequence; a stroke is immutable after construction and cloning
/// deep-copies the underlying arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<TimedPoint>,
    bounds: BoundingBox,
    length: f32,
    flattened: Vec<f32>,
}

impl Stroke {
    /// Build a stroke from captured points. At least one point is required.
    pub fn new(points: Vec<TimedPoint>) -> Result<Self> {
        let first = points
            .first()
            .ok_or_else(|| Error::InvalidInput("stroke requires at least one point".to_string()))?;

        let mut bounds = BoundingBox::from_point(first.x, first.y);
        let mut flattened = Vec::with_capacity(points.len() * 2);
        let mut length = 0.0f32;
        for (i, point) in points.iter().enumerate() {
            bounds.include(point.x, point.y);
            flattened.push(point.x);
            flattened.push(point.y);
            if i > 0 {
                length += points[i - 1].distance_to(point);
            }
        }

        Ok(Self {
            points,
            bounds,
            length,
            flattened,
        })
    }

    pub fn points(&self) -> &[TimedPoint] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// Total polyline length: the sum of consecutive Euclidean distances.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// The point sequence as a flat `[x0, y0, x1, y1, ...]` array.
    pub fn flattened(&self) -> &[f32] {
        &self.flattened
    }

    /// Fit an oriented bounding box along the stroke's dominant direction.
    pub fn oriented_bounding_box(&self) -> OrientedBoundingBox {
        compute_oriented_bounding_box(&self.flattened)
    }

    /// Write the stroke in its binary wire form (see the store codec for
    /// the layout).
    pub fn serialize<W: std::io::Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        crate::store::codec::write_stroke(sink, self)
    }

    /// Read a stroke back from its binary wire form.
    pub fn deserialize<R: std::io::Read + ?Sized>(source: &mut R) -> Result<Self> {
        crate::store::codec::read_stroke(source)
    }

    /// Produce a renderable polyline for the UI layer: the stroke resampled
    /// to `num_samples` points and uniformly scaled to fit a
    /// `width x height` pixel box anchored at the origin. Read-only.
    pub fn to_polyline(&self, width: f32, height: f32, num_samples: usize) -> Vec<(f32, f32)> {
        let mut sampled = temporal_sampling(&self.flattened, num_samples);
        fit_to_box(&mut sampled, &self.bounds, width, height, 0.0);
        sampled
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }
}

/// Translate a flattened point set to the origin of a pixel box and scale
/// it uniformly to fit `width - 2*edge` by `height - 2*edge`, leaving an
/// `edge` border on every side.
pub(crate) fn fit_to_box(
    points: &mut [f32],
    bounds: &BoundingBox,
    width: f32,
    height: f32,
    edge: f32,
) {
    translate(points, -bounds.min_x, -bounds.min_y);
    let inner_width = width - 2.0 * edge;
    let inner_height = height - 2.0 * edge;
    let sx = if bounds.width() > 0.0 {
        inner_width / bounds.width()
    } else {
        f32::INFINITY
    };
    let sy = if bounds.height() > 0.0 {
        inner_height / bounds.height()
    } else {
        f32::INFINITY
    };
    let uniform = sx.min(sy);
    let uniform = if uniform.is_finite() { uniform } else { 1.0 };
    scale(points, uniform, uniform);
    translate(points, edge, edge);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke_from(points: &[(f32, f32)]) -> Stroke {
        let timed: Vec<TimedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| TimedPoint::new(x, y, i as i64 * 16))
            .collect();
        Stroke::new(timed).unwrap()
    }

    #[test]
    fn test_empty_stroke_rejected() {
        let result = Stroke::new(Vec::new());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_single_point_stroke() {
        let stroke = stroke_from(&[(5.0, 5.0)]);
        assert_eq!(stroke.point_count(), 1);
        assert_eq!(stroke.length(), 0.0);
        assert_eq!(stroke.bounding_box().width(), 0.0);
    }

    #[test]
    fn test_length_matches_segment_sum() {
        let points = [(0.0, 0.0), (3.0, 0.0), (3.0, 4.0), (0.0, 0.0)];
        let stroke = stroke_from(&points);

        let timed: Vec<TimedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| TimedPoint::new(x, y, i as i64 * 16))
            .collect();
        let mut expected = 0.0f32;
        for window in timed.windows(2) {
            expected += window[0].distance_to(&window[1]);
        }
        assert_eq!(stroke.length(), expected);
        assert!(stroke.length() >= 0.0);
    }

    #[test]
    fn test_bounding_box_consistent_with_points() {
        let stroke = stroke_from(&[(1.0, 2.0), (-3.0, 8.0), (4.0, -1.0)]);
        let bounds = stroke.bounding_box();
        assert_eq!(bounds.min_x, -3.0);
        assert_eq!(bounds.max_x, 4.0);
        assert_eq!(bounds.min_y, -1.0);
        assert_eq!(bounds.max_y, 8.0);
    }

    #[test]
    fn test_flattened_layout() {
        let stroke = stroke_from(&[(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(stroke.flattened(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = stroke_from(&[(0.0, 0.0), (1.0, 1.0)]);
        let cloned = original.clone();
        assert_eq!(original, cloned);
        assert_ne!(
            original.points().as_ptr(),
            cloned.points().as_ptr(),
            "clone must copy the point array"
        );
    }

    #[test]
    fn test_to_polyline_sample_count_and_fit() {
        let stroke = stroke_from(&[(0.0, 0.0), (200.0, 100.0)]);
        let polyline = stroke.to_polyline(100.0, 100.0, 16);
        assert_eq!(polyline.len(), 16);
        for &(x, y) in &polyline {
            assert!((0.0..=100.0).contains(&x));
            assert!((0.0..=100.0).contains(&y));
        }
    }

    #[test]
    fn test_to_polyline_degenerate_stroke() {
        let stroke = stroke_from(&[(50.0, 50.0)]);
        let polyline = stroke.to_polyline(100.0, 100.0, 4);
        assert_eq!(polyline.len(), 4);
        for &(x, y) in &polyline {
            assert_eq!((x, y), (0.0, 0.0), "single point lands at the box origin");
        }
    }

    #[test]
    fn test_serialize_roundtrip() {
        let stroke = stroke_from(&[(0.5, -1.25), (3.75, 4.0), (9.0, 9.0)]);
        let mut buffer = Vec::new();
        stroke.serialize(&mut buffer).unwrap();
        let back = Stroke::deserialize(&mut buffer.as_slice()).unwrap();
        assert_eq!(back.points(), stroke.points());
        assert_eq!(back.length(), stroke.length());
        assert_eq!(back.bounding_box(), stroke.bounding_box());
    }

    #[test]
    fn test_oriented_bounding_box_of_line() {
        let stroke = stroke_from(&[(0.0, 0.0), (10.0, 0.0)]);
        let obb = stroke.oriented_bounding_box();
        assert!(obb.squareness < 0.01);
    }
}
