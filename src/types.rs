//! Core data model: points, series, and chart configuration.

use crate::error::{ChartError, ChartResult};

/// A unique identifier for a data series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SeriesId(pub u32);

impl SeriesId {
    /// Create a series ID from an index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Create a series ID from a name using FNV-1a hash.
    ///
    /// The same name always produces the same ID, so callers can reference
    /// series by name across dataset replacements.
    pub fn from_name(name: &str) -> Self {
        const FNV_OFFSET_BASIS: u32 = 2166136261;
        const FNV_PRIME: u32 = 16777619;

        let mut hash = FNV_OFFSET_BASIS;
        for byte in name.bytes() {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }

        Self(hash)
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// A data point with a nullable dependent value.
///
/// `y == None` marks an explicit gap: the point occupies a position on the
/// independent axis but carries no value, and the series renderer breaks the
/// path there instead of interpolating across it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataPoint {
    /// Independent-axis value (time in Unix milliseconds, period index, or
    /// band slot index, depending on the configured x-scale kind).
    pub x: f64,
    /// Dependent value, or `None` for a gap.
    pub y: Option<f64>,
}

impl DataPoint {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }

    /// Create a gap marker at the given position.
    pub fn gap(x: f64) -> Self {
        Self { x, y: None }
    }

    /// Whether this point is a gap.
    pub fn is_gap(&self) -> bool {
        self.y.is_none()
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, Option<f64>)> for DataPoint {
    fn from((x, y): (f64, Option<f64>)) -> Self {
        Self { x, y }
    }
}

/// Rendering hint carried by a series into the geometry output.
///
/// The engine treats hints as opaque style information; adapters decide how
/// to honor them (e.g. closing an area fill down to the baseline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleHint {
    /// Stroke the path only.
    #[default]
    Line,
    /// Stroke the path and fill down to the baseline.
    Area,
}

/// A data series in a chart.
///
/// Points must be ordered by ascending `x`; hit-testing bisects the series
/// and relies on that ordering.
#[derive(Debug, Clone)]
pub struct Series {
    /// Unique identifier (stable across dataset replacements).
    pub id: SeriesId,
    /// Display label (for legend and tooltips).
    pub label: String,
    /// Data points, ordered by `x`.
    pub points: Vec<DataPoint>,
    /// Rendering hint.
    pub style_hint: StyleHint,
}

impl Series {
    /// Create a new series. The ID is derived from the label via FNV-1a.
    pub fn new(label: impl Into<String>, points: Vec<DataPoint>) -> Self {
        let label = label.into();
        debug_assert!(
            points.windows(2).all(|w| w[0].x <= w[1].x),
            "series '{label}' points must be ordered by x"
        );
        Self {
            id: SeriesId::from_name(&label),
            label,
            points,
            style_hint: StyleHint::default(),
        }
    }

    /// Create a series from `(x, y)` tuples.
    pub fn from_tuples(label: impl Into<String>, data: &[(f64, f64)]) -> Self {
        Self::new(label, data.iter().map(|&d| d.into()).collect())
    }

    /// Set an explicit series ID.
    pub fn with_id(mut self, id: SeriesId) -> Self {
        self.id = id;
        self
    }

    /// Set the rendering hint.
    pub fn with_style_hint(mut self, hint: StyleHint) -> Self {
        self.style_hint = hint;
        self
    }

    /// Get the min/max x extent of this series, ignoring nothing (gaps
    /// still occupy a position on the independent axis).
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.x, last.x))
    }

    /// Get the min/max of the non-gap dependent values.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut has_value = false;

        for p in &self.points {
            if let Some(y) = p.y {
                has_value = true;
                min = min.min(y);
                max = max.max(y);
            }
        }

        if has_value { Some((min, max)) } else { None }
    }
}

/// Curve interpolation used by the series renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveKind {
    /// Straight segments between consecutive points.
    Linear,
    /// Monotone cubic interpolation: smooth, but never overshoots the
    /// local min/max of the data.
    #[default]
    Monotone,
}

/// Scale kind for the independent (x) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XScaleKind {
    /// Plain numeric axis.
    #[default]
    Linear,
    /// Unix-millisecond timestamps with granularity-aware tick labels.
    Time,
    /// Categorical band slots (x values are slot indices).
    Band,
}

/// How the y domain is derived.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum YDomainMode {
    /// Union of all series' observed min/max, padded and niced.
    #[default]
    Auto,
    /// Fixed domain supplied by the caller; no padding applied.
    Fixed { min: f64, max: f64 },
}

/// Zoom/pan behaviour configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomConfig {
    /// Whether gestures are honored at all.
    pub enabled: bool,
    /// Minimum allowed scale factor.
    pub min_scale: f32,
    /// Maximum allowed scale factor.
    pub max_scale: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

/// Chart configuration, validated when the engine is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Curve interpolation for series paths.
    pub curve: CurveKind,
    /// Target tick count per axis (upper bound on generated ticks).
    pub tick_count: usize,
    /// Kind of the x scale.
    pub x_scale: XScaleKind,
    /// How the y domain is derived.
    pub y_domain: YDomainMode,
    /// Zoom/pan behaviour.
    pub zoom: ZoomConfig,
    /// Fraction by which auto domains are padded outward (0 disables).
    pub domain_padding: f64,
    /// Whether auto domains are rounded to human-friendly boundaries.
    pub nice_domain: bool,
    /// Minimum pixel spacing between tick labels before thinning kicks in.
    pub min_label_spacing: f32,
    /// Inner padding fraction between band slots (band x scale only).
    pub band_padding: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            curve: CurveKind::default(),
            tick_count: 5,
            x_scale: XScaleKind::default(),
            y_domain: YDomainMode::default(),
            zoom: ZoomConfig::default(),
            domain_padding: 0.05,
            nice_domain: true,
            min_label_spacing: 48.0,
            band_padding: 0.2,
        }
    }
}

impl ChartConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the curve kind.
    pub fn with_curve(mut self, curve: CurveKind) -> Self {
        self.curve = curve;
        self
    }

    /// Set the target tick count.
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    /// Set the x scale kind.
    pub fn with_x_scale(mut self, kind: XScaleKind) -> Self {
        self.x_scale = kind;
        self
    }

    /// Set the y domain mode.
    pub fn with_y_domain(mut self, mode: YDomainMode) -> Self {
        self.y_domain = mode;
        self
    }

    /// Set the zoom configuration.
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    /// Disable zoom/pan gestures.
    pub fn without_zoom(mut self) -> Self {
        self.zoom.enabled = false;
        self
    }

    /// Set the auto-domain padding fraction.
    pub fn with_domain_padding(mut self, fraction: f64) -> Self {
        self.domain_padding = fraction;
        self
    }

    /// Disable nice-domain rounding.
    pub fn without_nice_domain(mut self) -> Self {
        self.nice_domain = false;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ChartResult<()> {
        if self.tick_count == 0 {
            return Err(ChartError::InvalidTickCount);
        }
        if !(self.zoom.min_scale > 0.0 && self.zoom.max_scale >= self.zoom.min_scale) {
            return Err(ChartError::InvalidZoomRange {
                min: self.zoom.min_scale,
                max: self.zoom.max_scale,
            });
        }
        Ok(())
    }
}
