//! Gap-aware series geometry.
//!
//! Converts an ordered sequence of data points into continuous path
//! segments, breaking at explicit gaps (`y == None`). Consecutive non-gap
//! points join into one segment; a run of a single point degrades to a
//! marker instead of a path.

use glam::Vec2;

use crate::curve::{CURVE_SUBDIVISIONS, monotone_polyline};
use crate::scale::Scale;
use crate::types::{CurveKind, DataPoint};

/// A polyline in pixel space with no embedded gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSegment {
    pub points: Vec<Vec2>,
}

impl PathSegment {
    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the segment has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Project a series through the shared scales into path segments plus
/// isolated markers.
///
/// Every run of consecutive non-gap points yields one segment. A run of a
/// single point yields a degenerate one-point segment that cannot be
/// stroked; its position is mirrored into the marker list so adapters draw
/// a dot there instead of a path.
///
/// Series sharing a y-domain must be passed the same `y_scale` instance so
/// visual comparison between them stays valid; the engine computes the
/// union domain before constructing that scale.
pub fn build_series_geometry(
    points: &[DataPoint],
    x_scale: &Scale,
    y_scale: &Scale,
    curve: CurveKind,
) -> (Vec<PathSegment>, Vec<Vec2>) {
    let mut segments = Vec::new();
    let mut markers = Vec::new();
    let mut run: Vec<Vec2> = Vec::new();

    let mut flush = |run: &mut Vec<Vec2>| {
        match run.len() {
            0 => {}
            1 => {
                markers.push(run[0]);
                segments.push(PathSegment {
                    points: std::mem::take(run),
                });
            }
            _ => {
                let points = match curve {
                    CurveKind::Linear => std::mem::take(run),
                    CurveKind::Monotone => monotone_polyline(run, CURVE_SUBDIVISIONS),
                };
                segments.push(PathSegment { points });
            }
        }
        run.clear();
    };

    for point in points {
        match point.y {
            Some(y) => run.push(Vec2::new(x_scale.forward(point.x), y_scale.forward(y))),
            None => flush(&mut run),
        }
    }
    flush(&mut run);

    (segments, markers)
}
