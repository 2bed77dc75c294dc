//! Curve interpolation for series paths.
//!
//! Implements monotone cubic Hermite interpolation (Fritsch–Carlson
//! tangents). Unlike a naive cubic spline, the sampled curve never
//! overshoots the local min/max of the input — two equal adjacent values
//! produce a flat span instead of a misleading bump.

use glam::Vec2;

/// Samples per interval when flattening a monotone curve to a polyline.
pub(crate) const CURVE_SUBDIVISIONS: usize = 8;

/// Sample a monotone cubic through `points` (ordered by ascending x).
///
/// Returns a polyline passing through every input point, with
/// `subdivisions` samples per interval. Inputs with fewer than three points
/// are returned unchanged (the monotone tangents degenerate to the secant,
/// i.e. a straight line).
pub fn monotone_polyline(points: &[Vec2], subdivisions: usize) -> Vec<Vec2> {
    if points.len() < 3 || subdivisions < 2 {
        return points.to_vec();
    }

    let n = points.len();

    // Secant slopes per interval.
    let mut secants = vec![0.0f32; n - 1];
    for i in 0..n - 1 {
        let dx = points[i + 1].x - points[i].x;
        secants[i] = if dx.abs() < f32::EPSILON {
            0.0
        } else {
            (points[i + 1].y - points[i].y) / dx
        };
    }

    // Tangents: averaged interior secants, zeroed where the slope changes
    // sign so extrema stay extrema.
    let mut tangents = vec![0.0f32; n];
    tangents[0] = secants[0];
    tangents[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        tangents[i] = if secants[i - 1] * secants[i] <= 0.0 {
            0.0
        } else {
            (secants[i - 1] + secants[i]) * 0.5
        };
    }

    // Fritsch–Carlson limiter: pull tangents back inside the circle of
    // radius 3 around the secant to guarantee monotonicity.
    for i in 0..n - 1 {
        if secants[i].abs() < f32::EPSILON {
            tangents[i] = 0.0;
            tangents[i + 1] = 0.0;
            continue;
        }
        let a = tangents[i] / secants[i];
        let b = tangents[i + 1] / secants[i];
        let s = a * a + b * b;
        if s > 9.0 {
            let tau = 3.0 / s.sqrt();
            tangents[i] = tau * a * secants[i];
            tangents[i + 1] = tau * b * secants[i];
        }
    }

    // Flatten each interval with the cubic Hermite basis.
    let mut out = Vec::with_capacity((n - 1) * subdivisions + 1);
    out.push(points[0]);
    for i in 0..n - 1 {
        let h = points[i + 1].x - points[i].x;
        for k in 1..=subdivisions {
            if k == subdivisions {
                out.push(points[i + 1]);
                break;
            }
            let t = k as f32 / subdivisions as f32;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;

            let x = points[i].x + t * h;
            let y = h00 * points[i].y
                + h10 * h * tangents[i]
                + h01 * points[i + 1].y
                + h11 * h * tangents[i + 1];
            out.push(Vec2::new(x, y));
        }
    }

    out
}
