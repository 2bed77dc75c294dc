//! Axis and gridline generation.
//!
//! Derives tick positions from a scale, formats labels, and emits gridline
//! positions (gridlines reuse tick positions verbatim). Tick density adapts
//! to the visible domain span, so zooming a time axis collapses labels to
//! coarser units instead of overlapping; remaining collisions are resolved
//! by deterministically dropping every other tick while always keeping the
//! first and the last.

use crate::error::{ChartError, ChartResult};
use crate::scale::{Scale, ScaleKind, align_up, nice_step};

/// Safety bound on tick sweeps; mirrors the guard a degenerate step would
/// otherwise need.
const MAX_TICKS: usize = 1_000;

/// Candidate time steps in milliseconds, finest to coarsest.
const TIME_STEPS_MS: &[f64] = &[
    100.0,
    200.0,
    500.0,
    1_000.0,          // 1 s
    2_000.0,
    5_000.0,
    10_000.0,
    15_000.0,
    30_000.0,
    60_000.0,         // 1 min
    120_000.0,
    300_000.0,
    600_000.0,
    900_000.0,
    1_800_000.0,      // 30 min
    3_600_000.0,      // 1 h
    7_200_000.0,
    10_800_000.0,
    21_600_000.0,
    43_200_000.0,     // 12 h
    86_400_000.0,     // 1 d
    172_800_000.0,
    604_800_000.0,    // 7 d
    1_209_600_000.0,  // 14 d
    2_592_000_000.0,  // 30 d
    7_776_000_000.0,  // 90 d
    31_536_000_000.0, // 365 d
];

const ONE_SECOND_MS: f64 = 1_000.0;
const ONE_MINUTE_MS: f64 = 60_000.0;
const ONE_DAY_MS: f64 = 86_400_000.0;
const ONE_YEAR_MS: f64 = 31_536_000_000.0;

/// A single axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis.
    pub position: f32,
    /// Domain value at this tick.
    pub value: f64,
    /// Formatted label.
    pub label: String,
}

/// Geometry produced for one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisGeometry {
    /// Ticks in axis order.
    pub ticks: Vec<Tick>,
    /// Gridline pixel positions (same positions as the ticks).
    pub grid_lines: Vec<f32>,
}

/// Build axis geometry from a scale.
///
/// `tick_count` is an upper bound on the number of emitted ticks; a
/// non-degenerate domain always yields at least two. `min_label_spacing` is
/// the pixel distance below which neighboring labels are considered to
/// collide. A `formatter` overrides the default numeric / time-granularity
/// labels.
pub fn build_axis(
    scale: &Scale,
    tick_count: usize,
    min_label_spacing: f32,
    formatter: Option<&dyn Fn(f64) -> String>,
) -> ChartResult<AxisGeometry> {
    if tick_count == 0 {
        return Err(ChartError::InvalidTickCount);
    }

    let (values, step) = tick_values(scale, tick_count);
    tracing::trace!(
        kind = ?scale.kind(),
        raw = values.len(),
        step,
        "generated axis ticks"
    );

    let mut values = values;

    // Upper bound from the configuration.
    while values.len() > tick_count.max(2) {
        values = thin_every_other(values);
    }

    // Label collision avoidance in pixel space.
    loop {
        let collides = values
            .windows(2)
            .any(|w| (scale.forward(w[1]) - scale.forward(w[0])).abs() < min_label_spacing);
        if !collides || values.len() <= 2 {
            break;
        }
        values = thin_every_other(values);
    }

    let ticks: Vec<Tick> = values
        .into_iter()
        .map(|value| Tick {
            position: scale.forward(value),
            value,
            label: match formatter {
                Some(f) => f(value),
                None => default_label(scale.kind(), value, step),
            },
        })
        .collect();

    let grid_lines = ticks.iter().map(|t| t.position).collect();
    Ok(AxisGeometry { ticks, grid_lines })
}

/// Build axis geometry from caller-supplied tick values and labels.
///
/// Values outside the scale's domain are dropped; no thinning is applied.
pub fn build_axis_custom(scale: &Scale, custom: &[(f64, String)]) -> AxisGeometry {
    let (d0, d1) = scale.domain();
    let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };

    let ticks: Vec<Tick> = custom
        .iter()
        .filter(|(v, _)| *v >= lo && *v <= hi)
        .map(|(v, label)| Tick {
            position: scale.forward(*v),
            value: *v,
            label: label.clone(),
        })
        .collect();

    let grid_lines = ticks.iter().map(|t| t.position).collect();
    AxisGeometry { ticks, grid_lines }
}

/// Raw tick values for a scale, plus the step they were derived from.
fn tick_values(scale: &Scale, tick_count: usize) -> (Vec<f64>, f64) {
    let (d0, d1) = scale.domain();
    let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    let span = hi - lo;

    match scale.kind() {
        ScaleKind::Band => {
            // one tick per slot whose center sits inside the visible window
            let values = (0..scale.band_count())
                .map(|i| i as f64)
                .filter(|i| i + 0.5 >= lo && i + 0.5 <= hi)
                .collect();
            (values, 1.0)
        }
        ScaleKind::Linear => {
            if span.abs() < f64::EPSILON {
                return (vec![lo], 1.0);
            }
            let step = nice_step(span / tick_count as f64);
            (sweep(lo, hi, step), step)
        }
        ScaleKind::Time => {
            if span.abs() < f64::EPSILON {
                return (vec![lo], ONE_SECOND_MS);
            }
            let ideal = span / tick_count as f64;
            let step = TIME_STEPS_MS
                .iter()
                .copied()
                .find(|&s| s >= ideal)
                // beyond the table: fall back to nice multiples of years
                .unwrap_or_else(|| nice_step(ideal / ONE_YEAR_MS) * ONE_YEAR_MS);
            (sweep(lo, hi, step), step)
        }
    }
}

/// Step multiples of `step` inside `[lo, hi]`, with the domain endpoints as
/// a fallback when the interior holds fewer than two multiples.
fn sweep(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let mut values = Vec::new();
    let mut v = align_up(lo, step);
    let tolerance = step * 1e-6;

    while v <= hi + tolerance && values.len() < MAX_TICKS {
        values.push(v.clamp(lo, hi));
        v += step;
    }

    if values.len() < 2 {
        values = vec![lo, hi];
    }
    values
}

/// Drop every other entry, always keeping the first and the last.
fn thin_every_other<T>(items: Vec<T>) -> Vec<T> {
    let n = items.len();
    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 0 || *i == n - 1)
        .map(|(_, item)| item)
        .collect()
}

fn default_label(kind: ScaleKind, value: f64, step: f64) -> String {
    match kind {
        ScaleKind::Time => format_time_label(value, step),
        _ => format_number(value, step),
    }
}

/// Format a numeric label with decimals derived from the step size.
pub(crate) fn format_number(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{value:.decimals$}")
}

/// Format a time label at the granularity of the tick step.
fn format_time_label(value_ms: f64, step_ms: f64) -> String {
    let Some(dt) = chrono::DateTime::from_timestamp_millis(value_ms as i64) else {
        return format_number(value_ms, step_ms);
    };

    let fmt = if step_ms >= ONE_YEAR_MS {
        "%Y"
    } else if step_ms >= ONE_DAY_MS {
        "%b %d"
    } else if step_ms >= ONE_MINUTE_MS {
        "%H:%M"
    } else if step_ms >= ONE_SECOND_MS {
        "%H:%M:%S"
    } else {
        "%H:%M:%S%.3f"
    };
    dt.format(fmt).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(domain: (f64, f64)) -> Scale {
        Scale::linear(domain, (0.0, 800.0)).unwrap()
    }

    #[test]
    fn test_tick_count_bounds() {
        let axis = build_axis(&linear((0.0, 100.0)), 5, 0.0, None).unwrap();
        assert!(axis.ticks.len() >= 2, "got {} ticks", axis.ticks.len());
        assert!(axis.ticks.len() <= 5, "got {} ticks", axis.ticks.len());
    }

    #[test]
    fn test_zero_tick_count_is_an_error() {
        assert_eq!(
            build_axis(&linear((0.0, 1.0)), 0, 0.0, None),
            Err(ChartError::InvalidTickCount)
        );
    }

    #[test]
    fn test_gridlines_reuse_tick_positions() {
        let axis = build_axis(&linear((0.0, 100.0)), 5, 0.0, None).unwrap();
        let positions: Vec<f32> = axis.ticks.iter().map(|t| t.position).collect();
        assert_eq!(axis.grid_lines, positions);
    }

    #[test]
    fn test_collision_thinning_keeps_first_and_last() {
        let wide = build_axis(&linear((0.0, 100.0)), 5, 0.0, None).unwrap();
        // force collisions with an enormous spacing requirement
        let thin = build_axis(&linear((0.0, 100.0)), 5, 10_000.0, None).unwrap();
        assert_eq!(thin.ticks.len(), 2);
        assert_eq!(thin.ticks[0].value, wide.ticks[0].value);
        assert_eq!(
            thin.ticks.last().unwrap().value,
            wide.ticks.last().unwrap().value
        );
    }

    #[test]
    fn test_band_tick_per_slot() {
        let scale = Scale::band(4, (0.0, 400.0), 0.2).unwrap();
        let axis = build_axis(&scale, 8, 0.0, None).unwrap();
        assert_eq!(axis.ticks.len(), 4);
        assert_eq!(axis.ticks[0].position, 50.0);
        assert_eq!(axis.ticks[3].position, 350.0);
    }

    #[test]
    fn test_time_step_adapts_to_span() {
        // one hour visible: expect minute-scale steps, HH:MM labels
        let hour = Scale::time((0.0, 3_600_000.0), (0.0, 800.0)).unwrap();
        let axis = build_axis(&hour, 6, 0.0, None).unwrap();
        assert!(axis.ticks.len() >= 2 && axis.ticks.len() <= 6);
        assert!(axis.ticks[0].label.contains(':'));

        // three months visible: labels collapse to month/day granularity
        let months = Scale::time((0.0, 90.0 * 86_400_000.0), (0.0, 800.0)).unwrap();
        let axis = build_axis(&months, 6, 0.0, None).unwrap();
        assert!(axis.ticks.iter().all(|t| !t.label.contains(':')));
    }

    #[test]
    fn test_custom_formatter_wins() {
        let axis = build_axis(&linear((0.0, 100.0)), 5, 0.0, Some(&|v| format!("${v:.0}")))
            .unwrap();
        assert!(axis.ticks.iter().all(|t| t.label.starts_with('$')));
    }

    #[test]
    fn test_custom_ticks_filtered_to_domain() {
        let axis = build_axis_custom(
            &linear((0.0, 10.0)),
            &[
                (0.0, "start".into()),
                (5.0, "mid".into()),
                (20.0, "outside".into()),
            ],
        );
        assert_eq!(axis.ticks.len(), 2);
        assert_eq!(axis.ticks[1].label, "mid");
    }

    #[test]
    fn test_format_number_decimals_follow_step() {
        assert_eq!(format_number(2.5, 0.5), "2.5");
        assert_eq!(format_number(2.5, 0.05), "2.50");
        assert_eq!(format_number(40.0, 20.0), "40");
    }
}
