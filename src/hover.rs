//! Pointer hit-testing and tooltip payloads.
//!
//! Finds the nearest data point along the independent axis with a bisection
//! search — O(log n) per series per pointer move, so hover stays cheap on
//! series with hundreds of points. Gap points are not candidates (they have
//! no value to show and no pixel to anchor).

use glam::Vec2;

use crate::types::{DataPoint, SeriesId};

/// One tooltip line for a series.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub series_id: SeriesId,
    pub label: String,
    /// Resolved dependent value.
    pub value: f64,
    /// Default-formatted value; hosts needing locale/currency formatting
    /// re-format from `value`.
    pub formatted: String,
}

/// A combined tooltip for one pointer position.
///
/// Transient: produced per pointer event and discarded when the pointer
/// leaves the plot region. The anchor is the pixel position of the resolved
/// data point, not the raw pointer, so the tooltip snaps to the data.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipPayload {
    pub anchor: Vec2,
    pub entries: Vec<TooltipEntry>,
}

/// Tooltip event stream emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    /// Show (or move) the tooltip.
    Show(TooltipPayload),
    /// Hide the tooltip; emitted when the pointer is outside the plotted
    /// region or no series has a resolvable point. Not an error.
    Hide,
}

/// Index of the non-gap point nearest to `x` along the independent axis.
///
/// Bisects the (sorted) points for the insertion index, then compares the
/// nearest non-gap neighbor on each side by absolute domain distance.
/// Ties resolve to the right neighbor, deterministically.
pub fn nearest_index(points: &[DataPoint], x: f64) -> Option<usize> {
    if points.is_empty() {
        return None;
    }

    let insertion = points.partition_point(|p| p.x < x);

    let right = points[insertion..]
        .iter()
        .position(|p| !p.is_gap())
        .map(|offset| insertion + offset);
    let left = points[..insertion].iter().rposition(|p| !p.is_gap());

    match (left, right) {
        (None, None) => None,
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (Some(l), Some(r)) => {
            let left_distance = (x - points[l].x).abs();
            let right_distance = (points[r].x - x).abs();
            if left_distance < right_distance {
                Some(l)
            } else {
                Some(r)
            }
        }
    }
}
