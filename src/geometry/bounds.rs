//! Axis-aligned and oriented bounding boxes

use super::transform::{compute_centroid, rotate, translate};

/// Axis-aligned bounding box over a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    /// Create a degenerate box covering a single point.
    pub fn from_point(x: f32, y: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Compute the box of a flattened coordinate slice, or `None` if empty.
    pub fn from_flat(points: &[f32]) -> Option<Self> {
        let mut pairs = points.chunks_exact(2);
        let first = pairs.next()?;
        let mut bounds = Self::from_point(first[0], first[1]);
        for pair in pairs {
            bounds.include(pair[0], pair[1]);
        }
        Some(bounds)
    }

    /// Grow the box to cover a point.
    pub fn include(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// The smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Oriented bounding box fitted along a point set's dominant direction.
///
/// `squareness` measures how close the box is to a square versus an
/// elongated rectangle, in `[0, 1]`. A near-square stroke has no reliable
/// dominant direction, so callers use it to detect direction-ambiguous
/// shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBoundingBox {
    /// Dominant direction of the point set (radians)
    pub orientation: f32,
    /// Extent along the dominant axis
    pub width: f32,
    /// Extent across the dominant axis
    pub height: f32,
    /// `min(width, height) / max(width, height)`; 1.0 for a degenerate box
    pub squareness: f32,
    /// Centroid of the point set
    pub center: (f32, f32),
}

/// Fit an oriented bounding box via a second-moment principal-axis fit.
pub fn compute_oriented_bounding_box(points: &[f32]) -> OrientedBoundingBox {
    let (cx, cy) = compute_centroid(points);
    let mut centered = points.to_vec();
    translate(&mut centered, -cx, -cy);

    let count = (centered.len() / 2).max(1) as f32;
    let mut sxx = 0.0f32;
    let mut sxy = 0.0f32;
    let mut syy = 0.0f32;
    for pair in centered.chunks_exact(2) {
        sxx += pair[0] * pair[0];
        sxy += pair[0] * pair[1];
        syy += pair[1] * pair[1];
    }
    sxx /= count;
    sxy /= count;
    syy /= count;

    let orientation = if sxy.abs() < 1e-10 {
        // Covariance already diagonal: the principal axis is axis-aligned
        if sxx >= syy {
            0.0
        } else {
            std::f32::consts::FRAC_PI_2
        }
    } else {
        // Largest eigenvalue of [[sxx, sxy], [sxy, syy]]; its eigenvector
        // (sxy, lambda - sxx) gives the dominant direction
        let trace = sxx + syy;
        let det = sxx * syy - sxy * sxy;
        let lambda = trace / 2.0 + (trace * trace / 4.0 - det).max(0.0).sqrt();
        (lambda - sxx).atan2(sxy)
    };

    rotate(&mut centered, -orientation);
    let bounds = BoundingBox::from_flat(&centered)
        .unwrap_or_else(|| BoundingBox::from_point(0.0, 0.0));
    let width = bounds.width();
    let height = bounds.height();
    let longer = width.max(height);
    let squareness = if longer > 0.0 {
        width.min(height) / longer
    } else {
        1.0
    };

    OrientedBoundingBox {
        orientation,
        width,
        height,
        squareness,
        center: (cx, cy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_single_point() {
        let bounds = BoundingBox::from_flat(&[3.0, 4.0]).unwrap();
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 0.0);
        assert_eq!(bounds.center(), (3.0, 4.0));
    }

    #[test]
    fn test_from_flat_empty() {
        assert!(BoundingBox::from_flat(&[]).is_none());
    }

    #[test]
    fn test_include_and_union() {
        let mut a = BoundingBox::from_point(0.0, 0.0);
        a.include(2.0, 3.0);
        assert_eq!(a.width(), 2.0);
        assert_eq!(a.height(), 3.0);

        let b = BoundingBox::from_point(-1.0, 5.0);
        let u = a.union(&b);
        assert_eq!(u.min_x, -1.0);
        assert_eq!(u.max_x, 2.0);
        assert_eq!(u.min_y, 0.0);
        assert_eq!(u.max_y, 5.0);
    }

    #[test]
    fn test_oriented_box_horizontal_line() {
        let points = vec![0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 3.0, 0.0];
        let obb = compute_oriented_bounding_box(&points);
        assert!((obb.orientation - 0.0).abs() < 1e-4);
        assert!((obb.width - 3.0).abs() < 1e-4);
        assert!(obb.height.abs() < 1e-4);
        assert!(obb.squareness < 0.01, "a line is maximally elongated");
    }

    #[test]
    fn test_oriented_box_vertical_line() {
        let points = vec![0.0, 0.0, 0.0, 1.0, 0.0, 2.0];
        let obb = compute_oriented_bounding_box(&points);
        assert!((obb.orientation - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert!(obb.squareness < 0.01);
    }

    #[test]
    fn test_oriented_box_diagonal_line() {
        let points = vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
        let obb = compute_oriented_bounding_box(&points);
        assert!((obb.orientation - std::f32::consts::FRAC_PI_4).abs() < 1e-4);
        assert!(obb.squareness < 0.01);
    }

    #[test]
    fn test_oriented_box_square_cloud() {
        // Four corners of a square: no dominant direction
        let points = vec![0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0];
        let obb = compute_oriented_bounding_box(&points);
        assert!(
            obb.squareness > 0.95,
            "expected near-square fit, got {}",
            obb.squareness
        );
    }

    #[test]
    fn test_oriented_box_single_point() {
        let obb = compute_oriented_bounding_box(&[5.0, 5.0]);
        assert_eq!(obb.width, 0.0);
        assert_eq!(obb.height, 0.0);
        assert_eq!(obb.squareness, 1.0);
        assert_eq!(obb.center, (5.0, 5.0));
    }
}
