//! Geometry utilities for stroke gestures
//!
//! Pure functions over flattened `[x0, y0, x1, y1, ...]` coordinate slices:
//! - arc-length resampling and grid rasterization
//! - in-place affine transforms
//! - axis-aligned and oriented bounding boxes
//! - the distance metrics the classifier scores with

pub mod bounds;
pub mod distance;
pub mod sampling;
pub mod transform;

pub use bounds::{compute_oriented_bounding_box, BoundingBox, OrientedBoundingBox};
pub use distance::{minimum_cosine_distance, squared_euclidean_distance, OrientationStyle};
pub use sampling::{spatial_sampling, temporal_sampling};
pub use transform::{compute_centroid, rotate, scale, translate};
