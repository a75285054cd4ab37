//! Resampling of stroke trajectories
//!
//! `temporal_sampling` redistributes a polyline into evenly-spaced samples
//! along its arc length, making feature vectors independent of the input
//! device's reporting rate. `spatial_sampling` rasterizes a whole gesture
//! onto a fixed grid for order-insensitive matching.

use crate::model::Gesture;

/// Total polyline length of a flattened coordinate slice.
pub(crate) fn path_length(points: &[f32]) -> f32 {
    let mut pairs = points.chunks_exact(2);
    let mut prev = match pairs.next() {
        Some(pair) => pair,
        None => return 0.0,
    };
    let mut length = 0.0f32;
    for pair in pairs {
        let dx = pair[0] - prev[0];
        let dy = pair[1] - prev[1];
        length += (dx * dx + dy * dy).sqrt();
        prev = pair;
    }
    length
}

/// Resample a polyline to exactly `num_points` samples evenly spaced by arc
/// length, via linear interpolation along segment lengths.
///
/// The result is deterministic and independent of the original sampling
/// density. A zero-length path (single point, or all points coincident)
/// yields `num_points` copies of the first point.
pub fn temporal_sampling(points: &[f32], num_points: usize) -> Vec<f32> {
    if num_points == 0 || points.len() < 2 {
        return Vec::new();
    }
    let first_x = points[0];
    let first_y = points[1];
    if num_points == 1 {
        return vec![first_x, first_y];
    }

    let total_length = path_length(points);
    if total_length <= 0.0 {
        let mut vector = Vec::with_capacity(num_points * 2);
        for _ in 0..num_points {
            vector.push(first_x);
            vector.push(first_y);
        }
        return vector;
    }

    let increment = total_length / (num_points - 1) as f32;
    let mut vector = Vec::with_capacity(num_points * 2);
    vector.push(first_x);
    vector.push(first_y);

    let mut last_x = first_x;
    let mut last_y = first_y;
    let mut distance_so_far = 0.0f32;
    let mut pairs = points.chunks_exact(2).skip(1);
    let mut current = pairs.next();

    while let Some(pair) = current {
        let delta_x = pair[0] - last_x;
        let delta_y = pair[1] - last_y;
        let distance = (delta_x * delta_x + delta_y * delta_y).sqrt();
        if distance_so_far + distance >= increment {
            // The next sample lands inside this segment
            let ratio = (increment - distance_so_far) / distance;
            last_x += ratio * delta_x;
            last_y += ratio * delta_y;
            vector.push(last_x);
            vector.push(last_y);
            distance_so_far = 0.0;
        } else {
            distance_so_far += distance;
            last_x = pair[0];
            last_y = pair[1];
            current = pairs.next();
        }
        if vector.len() == num_points * 2 {
            break;
        }
    }

    // Accumulated rounding can leave the tail short; pad with the endpoint
    while vector.len() < num_points * 2 {
        vector.push(last_x);
        vector.push(last_y);
    }
    vector
}

/// Rasterize a gesture onto a `grid_size x grid_size` weighted grid,
/// flattened row-major to floats.
///
/// The gesture is centered on the grid and scaled from its bounding box;
/// with `keep_aspect_ratio` both axes share the smaller scale factor,
/// otherwise each axis is stretched to fill the grid independently.
/// Coordinates that land outside the grid after scaling are clamped to
/// the grid edges. Each stroke segment is walked at sub-cell resolution so
/// thin diagonals stay connected.
pub fn spatial_sampling(gesture: &Gesture, grid_size: usize, keep_aspect_ratio: bool) -> Vec<f32> {
    let mut sample = vec![0.0f32; grid_size * grid_size];
    if grid_size == 0 {
        return sample;
    }
    let bounds = match gesture.bounding_box() {
        Some(bounds) => bounds,
        None => return sample,
    };

    let target = (grid_size - 1) as f32;
    let width = bounds.width();
    let height = bounds.height();
    let mut sx = if width > 0.0 { target / width } else { f32::INFINITY };
    let mut sy = if height > 0.0 {
        target / height
    } else {
        f32::INFINITY
    };
    if keep_aspect_ratio || !sx.is_finite() || !sy.is_finite() {
        let uniform = sx.min(sy);
        let uniform = if uniform.is_finite() { uniform } else { 0.0 };
        sx = uniform;
        sy = uniform;
    }

    let (cx, cy) = bounds.center();
    let half = target / 2.0;
    for stroke in gesture.strokes() {
        let mut previous: Option<(f32, f32)> = None;
        for pair in stroke.flattened().chunks_exact(2) {
            let x = ((pair[0] - cx) * sx + half).clamp(0.0, target);
            let y = ((pair[1] - cy) * sy + half).clamp(0.0, target);
            plot(x, y, &mut sample, grid_size);
            if let Some((px, py)) = previous {
                let segment = ((x - px) * (x - px) + (y - py) * (y - py)).sqrt();
                let steps = (segment * 2.0).ceil() as usize;
                for step in 1..steps {
                    let t = step as f32 / steps as f32;
                    plot(px + (x - px) * t, py + (y - py) * t, &mut sample, grid_size);
                }
            }
            previous = Some((x, y));
        }
    }
    sample
}

/// Splat one sample into the grid, distributing weight bilinearly over the
/// four surrounding cells and keeping the maximum weight per cell.
fn plot(x: f32, y: f32, sample: &mut [f32], grid_size: usize) {
    let x = x.max(0.0);
    let y = y.max(0.0);
    let max_index = grid_size - 1;
    let x_floor = (x.floor() as usize).min(max_index);
    let x_ceil = (x.ceil() as usize).min(max_index);
    let y_floor = (y.floor() as usize).min(max_index);
    let y_ceil = (y.ceil() as usize).min(max_index);
    if x_floor == x_ceil && y_floor == y_ceil {
        sample[y_floor * grid_size + x_floor] = 1.0;
        return;
    }
    for gy in [y_floor, y_ceil] {
        for gx in [x_floor, x_ceil] {
            let weight = (1.0 - (x - gx as f32).abs()) * (1.0 - (y - gy as f32).abs());
            let index = gy * grid_size + gx;
            if weight > sample[index] {
                sample[index] = weight;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gesture, Stroke, TimedPoint};

    fn flat(points: &[(f32, f32)]) -> Vec<f32> {
        points.iter().flat_map(|&(x, y)| [x, y]).collect()
    }

    fn gesture_from(points: &[(f32, f32)]) -> Gesture {
        let timed: Vec<TimedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| TimedPoint::new(x, y, i as i64))
            .collect();
        let mut gesture = Gesture::with_id(1);
        gesture.add_stroke(Stroke::new(timed).unwrap());
        gesture
    }

    #[test]
    fn test_temporal_sampling_exact_count() {
        for n in [1usize, 2, 16, 64] {
            let points = flat(&[(0.0, 0.0), (10.0, 0.0)]);
            let sampled = temporal_sampling(&points, n);
            assert_eq!(sampled.len(), n * 2, "requested {n} samples");
        }
    }

    #[test]
    fn test_temporal_sampling_dense_input() {
        let points: Vec<(f32, f32)> = (0..1000).map(|i| (i as f32 / 10.0, 0.0)).collect();
        let sampled = temporal_sampling(&flat(&points), 16);
        assert_eq!(sampled.len(), 32);
        assert!((sampled[0] - 0.0).abs() < 1e-4);
        assert!((sampled[30] - 99.9).abs() < 0.1, "last sample near the end");
    }

    #[test]
    fn test_temporal_sampling_even_spacing() {
        let points = flat(&[(0.0, 0.0), (9.0, 0.0)]);
        let sampled = temporal_sampling(&points, 10);
        for (i, pair) in sampled.chunks_exact(2).enumerate() {
            assert!(
                (pair[0] - i as f32).abs() < 1e-4,
                "sample {i} at x={}",
                pair[0]
            );
            assert!(pair[1].abs() < 1e-4);
        }
    }

    #[test]
    fn test_temporal_sampling_density_independent() {
        let sparse = flat(&[(0.0, 0.0), (100.0, 0.0)]);
        let dense: Vec<f32> = flat(
            &(0..=100)
                .map(|i| (i as f32, 0.0))
                .collect::<Vec<(f32, f32)>>(),
        );
        let a = temporal_sampling(&sparse, 16);
        let b = temporal_sampling(&dense, 16);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_temporal_sampling_degenerate_single_point() {
        let points = flat(&[(5.0, 7.0), (5.0, 7.0), (5.0, 7.0)]);
        let sampled = temporal_sampling(&points, 8);
        assert_eq!(sampled.len(), 16);
        for pair in sampled.chunks_exact(2) {
            assert_eq!(pair[0], 5.0);
            assert_eq!(pair[1], 7.0);
        }
    }

    #[test]
    fn test_temporal_sampling_zero_points_requested() {
        let points = flat(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(temporal_sampling(&points, 0).is_empty());
    }

    #[test]
    fn test_path_length() {
        let points = flat(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
        assert!((path_length(&points) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_spatial_sampling_dimensions() {
        let gesture = gesture_from(&[(0.0, 0.0), (10.0, 10.0)]);
        let sample = spatial_sampling(&gesture, 16, false);
        assert_eq!(sample.len(), 256);
    }

    #[test]
    fn test_spatial_sampling_horizontal_line_fills_middle_row() {
        let gesture = gesture_from(&[(0.0, 0.0), (100.0, 0.0)]);
        let sample = spatial_sampling(&gesture, 8, false);
        // Height is zero, so the line is centered vertically; every cell
        // along the middle row should carry weight
        let row = 3; // (8 - 1) / 2 rounds down to cell 3 under bilinear split
        let hits: usize = (0..8).filter(|&col| sample[row * 8 + col] > 0.0).count();
        assert_eq!(hits, 8, "expected the whole middle row to be plotted");
    }

    #[test]
    fn test_spatial_sampling_empty_gesture() {
        let gesture = Gesture::with_id(1);
        let sample = spatial_sampling(&gesture, 16, false);
        assert!(sample.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_spatial_sampling_single_point_gesture() {
        let gesture = gesture_from(&[(42.0, 42.0)]);
        let sample = spatial_sampling(&gesture, 8, false);
        let total: f32 = sample.iter().sum();
        assert!(total > 0.0, "the point must land somewhere on the grid");
    }

    #[test]
    fn test_spatial_sampling_values_bounded() {
        let gesture = gesture_from(&[(0.0, 0.0), (50.0, 80.0), (100.0, 0.0)]);
        let sample = spatial_sampling(&gesture, 16, false);
        assert!(sample.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_spatial_sampling_deterministic() {
        let gesture = gesture_from(&[(0.0, 0.0), (37.0, 91.0), (12.0, 45.0)]);
        let a = spatial_sampling(&gesture, 16, false);
        let b = spatial_sampling(&gesture, 16, false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_spatial_sampling_keep_aspect_ratio_uniform_scale() {
        // A wide flat gesture: aspect-preserving scale keeps it flat, so
        // fewer rows are touched than with independent axis stretching
        let gesture = gesture_from(&[(0.0, 0.0), (100.0, 10.0)]);
        let uniform = spatial_sampling(&gesture, 16, true);
        let stretched = spatial_sampling(&gesture, 16, false);
        let rows_touched = |sample: &[f32]| {
            (0..16)
                .filter(|&row| (0..16).any(|col| sample[row * 16 + col] > 0.0))
                .count()
        };
        assert!(rows_touched(&uniform) < rows_touched(&stretched));
    }
}
