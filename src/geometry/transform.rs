//! In-place affine transforms over flattened coordinate arrays

/// Translate every point in a flattened `[x0, y0, x1, y1, ...]` slice.
pub fn translate(points: &mut [f32], dx: f32, dy: f32) {
    for pair in points.chunks_exact_mut(2) {
        pair[0] += dx;
        pair[1] += dy;
    }
}

/// Scale every point around the origin.
pub fn scale(points: &mut [f32], sx: f32, sy: f32) {
    for pair in points.chunks_exact_mut(2) {
        pair[0] *= sx;
        pair[1] *= sy;
    }
}

/// Rotate every point around the origin by `radians` (counter-clockwise).
pub fn rotate(points: &mut [f32], radians: f32) {
    let (sin, cos) = radians.sin_cos();
    for pair in points.chunks_exact_mut(2) {
        let x = pair[0] * cos - pair[1] * sin;
        let y = pair[0] * sin + pair[1] * cos;
        pair[0] = x;
        pair[1] = y;
    }
}

/// Arithmetic mean of all x's and y's. Returns the origin for an empty slice.
pub fn compute_centroid(points: &[f32]) -> (f32, f32) {
    let count = points.len() / 2;
    if count == 0 {
        return (0.0, 0.0);
    }
    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;
    for pair in points.chunks_exact(2) {
        sum_x += pair[0];
        sum_y += pair[1];
    }
    (sum_x / count as f32, sum_y / count as f32)
}
