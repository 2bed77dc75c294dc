//! Plotline - render-agnostic interactive chart engine
//!
//! This crate provides:
//! - Scales (linear, time, band) with bidirectional domain/pixel mapping
//! - Gap-aware series geometry with monotone curve interpolation
//! - Axis/grid generation with adaptive tick density and collision thinning
//! - Bisection hit-testing driving a snapped tooltip event stream
//! - Composable, clamped pan/zoom with pivot preservation
//! - Deterministic legend styling, stable across re-renders
//!
//! The engine never touches a rendering API: every render produces an
//! immutable [`Frame`] of plain geometry (path segments, markers, ticks,
//! gridlines, legend entries) that an SVG/Canvas/GPU adapter draws. Data
//! flows one direction — dataset + configuration in, geometry and
//! interaction events out.
//!
//! # Example
//!
//! ```
//! use plotline::{ChartConfig, ChartEngine, DataPoint, Rect, Series};
//!
//! let mut engine = ChartEngine::new(ChartConfig::default()).unwrap();
//! engine.set_plot_area(Rect::new(0.0, 0.0, 800.0, 600.0));
//! engine.set_dataset(vec![Series::new(
//!     "history",
//!     vec![
//!         DataPoint::new(1.0, 10.0),
//!         DataPoint::gap(2.0),
//!         DataPoint::new(3.0, 30.0),
//!     ],
//! )]);
//!
//! let frame = engine.render().unwrap();
//! assert_eq!(frame.series.len(), 1);
//! ```

// Core primitives
mod color;
mod error;
mod rect;
mod types;

// Coordinate machinery
mod scale;
mod transform;

// Geometry generation
mod axis;
mod curve;
mod series;

// Interaction and styling
mod hover;
mod legend;

// Pipeline orchestration
mod engine;

// Re-exports
pub use glam::Vec2;

pub use color::Color;
pub use error::{ChartError, ChartResult};
pub use rect::Rect;
pub use types::{
    ChartConfig, CurveKind, DataPoint, Series, SeriesId, StyleHint, XScaleKind, YDomainMode,
    ZoomConfig,
};

pub use scale::{Scale, ScaleKind};
pub use transform::{Gesture, ViewTransform};

pub use axis::{AxisGeometry, Tick, build_axis, build_axis_custom};
pub use curve::monotone_polyline;
pub use series::{PathSegment, build_series_geometry};

pub use hover::{HoverEvent, TooltipEntry, TooltipPayload, nearest_index};
pub use legend::{DashPattern, LegendEntry, Palette, StyleResolver};

pub use engine::{ChartEngine, Frame, SeriesGeometry};
