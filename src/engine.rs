//! The chart engine: a pure-function render pipeline with explicit state.
//!
//! Each [`ChartEngine::render`] call rebuilds scales and geometry from the
//! current dataset and plot area and returns an immutable [`Frame`]
//! snapshot for an adapter (SVG/Canvas/GPU) to draw. The only state that
//! survives across renders is:
//! - the accumulated [`ViewTransform`] (until [`ChartEngine::reset_view`]),
//! - the legend style cache (stable colors per series id),
//! - the render generation counter, bumped whenever the dataset is
//!   replaced so stale hover references can never be read against new data.

use glam::Vec2;

use crate::axis::{AxisGeometry, build_axis, format_number};
use crate::color::Color;
use crate::error::{ChartError, ChartResult};
use crate::hover::{HoverEvent, TooltipEntry, TooltipPayload, nearest_index};
use crate::legend::{DashPattern, LegendEntry, Palette, StyleResolver};
use crate::rect::Rect;
use crate::scale::{Scale, nice_step};
use crate::series::{PathSegment, build_series_geometry};
use crate::transform::{Gesture, ViewTransform};
use crate::types::{ChartConfig, Series, SeriesId, StyleHint, XScaleKind, YDomainMode};

/// Drawable geometry for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGeometry {
    pub id: SeriesId,
    pub label: String,
    /// Continuous path segments (gaps split series into several).
    pub segments: Vec<PathSegment>,
    /// Isolated points with no path (single-point runs).
    pub markers: Vec<Vec2>,
    pub color: Color,
    pub dash: DashPattern,
    pub hint: StyleHint,
}

/// An immutable geometry snapshot for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub plot_area: Rect,
    pub series: Vec<SeriesGeometry>,
    pub x_axis: AxisGeometry,
    pub y_axis: AxisGeometry,
    pub legend: Vec<LegendEntry>,
    /// Render generation this frame was built from. Payloads or frames
    /// carrying an older generation refer to a replaced dataset.
    pub generation: u64,
}

/// The chart engine. One instance per chart; instances own their view
/// transform exclusively and must not be shared between charts.
pub struct ChartEngine {
    config: ChartConfig,
    series: Vec<Series>,
    plot_area: Rect,
    view: ViewTransform,
    styles: StyleResolver,
    generation: u64,
    x_formatter: Option<Box<dyn Fn(f64) -> String>>,
    y_formatter: Option<Box<dyn Fn(f64) -> String>>,
}

impl ChartEngine {
    /// Create an engine with a validated configuration.
    ///
    /// Fails fast on bad configuration (zero tick count, inverted zoom
    /// range) rather than rendering garbage later.
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            series: Vec::new(),
            plot_area: Rect::new(0.0, 0.0, 0.0, 0.0),
            view: ViewTransform::IDENTITY,
            styles: StyleResolver::new(),
            generation: 0,
            x_formatter: None,
            y_formatter: None,
        })
    }

    /// Replace the style palette (before the first render).
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.styles = StyleResolver::with_palette(palette);
        self
    }

    /// Replace the dataset. Full recompute model: the next render rebuilds
    /// everything, and the generation bump invalidates any outstanding
    /// hover/tooltip state derived from the old series array.
    pub fn set_dataset(&mut self, series: Vec<Series>) {
        self.series = series;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "dataset replaced");
    }

    /// Set the plot area in pixels.
    pub fn set_plot_area(&mut self, rect: Rect) {
        self.plot_area = rect;
    }

    /// Override x tick labels (e.g. host-localized date strings).
    pub fn set_x_tick_formatter(&mut self, formatter: impl Fn(f64) -> String + 'static) {
        self.x_formatter = Some(Box::new(formatter));
    }

    /// Override y tick labels (e.g. host-formatted currency).
    pub fn set_y_tick_formatter(&mut self, formatter: impl Fn(f64) -> String + 'static) {
        self.y_formatter = Some(Box::new(formatter));
    }

    /// Current render generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The accumulated view transform.
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Build the geometry snapshot for the current dataset, plot area, and
    /// view transform.
    pub fn render(&mut self) -> ChartResult<Frame> {
        let (x_scale, y_scale) = self.effective_scales()?;

        let x_axis = build_axis(
            &x_scale,
            self.config.tick_count,
            self.config.min_label_spacing,
            self.x_formatter.as_deref(),
        )?;
        let y_axis = build_axis(
            &y_scale,
            self.config.tick_count,
            self.config.min_label_spacing,
            self.y_formatter.as_deref(),
        )?;

        let legend = self.styles.resolve(&self.series);

        let series = self
            .series
            .iter()
            .zip(&legend)
            .map(|(s, entry)| {
                let (segments, markers) =
                    build_series_geometry(&s.points, &x_scale, &y_scale, self.config.curve);
                SeriesGeometry {
                    id: s.id,
                    label: s.label.clone(),
                    segments,
                    markers,
                    color: entry.color,
                    dash: entry.dash.clone(),
                    hint: s.style_hint,
                }
            })
            .collect::<Vec<_>>();

        tracing::trace!(
            generation = self.generation,
            series = series.len(),
            x_ticks = x_axis.ticks.len(),
            y_ticks = y_axis.ticks.len(),
            "rendered frame"
        );

        Ok(Frame {
            plot_area: self.plot_area,
            series,
            x_axis,
            y_axis,
            legend,
            generation: self.generation,
        })
    }

    /// Hit-test a pointer position against the current dataset.
    ///
    /// Outside the plot area (or with nothing to resolve) this emits
    /// [`HoverEvent::Hide`] rather than an error. Each call is computed
    /// fresh against the current dataset, so a stale pointer position can
    /// never resolve against replaced series (last-wins semantics: hosts
    /// that buffer pointer events should only forward the latest).
    pub fn pointer_moved(&self, position: Vec2) -> HoverEvent {
        if !self.plot_area.contains(position) {
            return HoverEvent::Hide;
        }
        let Ok((x_scale, y_scale)) = self.effective_scales() else {
            return HoverEvent::Hide;
        };

        let target_x = x_scale.inverse(position.x);
        let (y_lo, y_hi) = y_scale.domain();
        let value_step = nice_step((y_hi - y_lo).abs().max(f64::EPSILON) / self.config.tick_count as f64);

        let mut entries = Vec::with_capacity(self.series.len());
        let mut anchor: Option<(f64, Vec2)> = None;

        for s in &self.series {
            let Some(index) = nearest_index(&s.points, target_x) else {
                continue;
            };
            let point = s.points[index];
            let Some(value) = point.y else { continue };

            let pixel = Vec2::new(x_scale.forward(point.x), y_scale.forward(value));
            let distance = (point.x - target_x).abs();
            if anchor.is_none_or(|(best, _)| distance < best) {
                anchor = Some((distance, pixel));
            }

            entries.push(TooltipEntry {
                series_id: s.id,
                label: s.label.clone(),
                value,
                formatted: format_number(value, value_step),
            });
        }

        match anchor {
            Some((_, anchor)) if !entries.is_empty() => HoverEvent::Show(TooltipPayload {
                anchor,
                entries,
            }),
            _ => HoverEvent::Hide,
        }
    }

    /// The pointer left the plot region.
    pub fn pointer_left(&self) -> HoverEvent {
        HoverEvent::Hide
    }

    /// Apply a pan/zoom gesture to the persisted view transform.
    ///
    /// Returns whether the transform changed (the adapter's signal to
    /// redraw axes). Gestures are ignored while zoom is disabled; a fully
    /// clamped gesture reports no change.
    pub fn apply_gesture(&mut self, gesture: Gesture) -> bool {
        if !self.config.zoom.enabled {
            return false;
        }
        let next = self.view.applied(gesture, &self.config.zoom);
        let changed = next != self.view;
        self.view = next;
        if changed {
            tracing::trace!(scale = self.view.scale, "view transform updated");
        }
        changed
    }

    /// Reset pan/zoom to the identity, restoring the original scales.
    pub fn reset_view(&mut self) {
        self.view = ViewTransform::IDENTITY;
    }

    /// Dispose of the engine. Contractually a no-op: all engine state is
    /// owned, nothing subscribes to anything.
    pub fn dispose(self) {}

    // =========================================================================
    // Scale derivation
    // =========================================================================

    fn x_domain(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut has_points = false;
        for s in &self.series {
            if let Some((min, max)) = s.x_bounds() {
                has_points = true;
                lo = lo.min(min);
                hi = hi.max(max);
            }
        }
        has_points.then_some((lo, hi))
    }

    fn y_domain(&self) -> Option<(f64, f64)> {
        match self.config.y_domain {
            YDomainMode::Fixed { min, max } => Some((min, max)),
            YDomainMode::Auto => {
                let mut lo = f64::INFINITY;
                let mut hi = f64::NEG_INFINITY;
                let mut has_values = false;
                for s in &self.series {
                    if let Some((min, max)) = s.y_bounds() {
                        has_values = true;
                        lo = lo.min(min);
                        hi = hi.max(max);
                    }
                }
                has_values.then_some((lo, hi))
            }
        }
    }

    fn base_scales(&self) -> ChartResult<(Scale, Scale)> {
        if !self.plot_area.is_valid() {
            return Err(ChartError::DegeneratePlotArea);
        }
        if self.series.is_empty() {
            return Err(ChartError::EmptyDataset);
        }

        let plot = self.plot_area;
        let x_domain = self.x_domain().ok_or(ChartError::EmptyDataset)?;
        let x_range = (plot.x, plot.right());

        let x_scale = match self.config.x_scale {
            XScaleKind::Linear => {
                let mut scale =
                    Scale::linear(x_domain, x_range)?.with_padding(self.config.domain_padding);
                if self.config.nice_domain {
                    scale = scale.nice(self.config.tick_count);
                }
                scale
            }
            XScaleKind::Time => Scale::time(x_domain, x_range)?,
            XScaleKind::Band => {
                let count = x_domain.1.max(0.0) as usize + 1;
                Scale::band(count, x_range, self.config.band_padding)?
            }
        };

        let y_domain = self.y_domain().ok_or(ChartError::EmptyDataset)?;
        // reversed range: data-space up maps to screen-space up
        let mut y_scale = Scale::linear(y_domain, (plot.bottom(), plot.y))?;
        if matches!(self.config.y_domain, YDomainMode::Auto) {
            y_scale = y_scale.with_padding(self.config.domain_padding);
            if self.config.nice_domain {
                y_scale = y_scale.nice(self.config.tick_count);
            }
        }

        Ok((x_scale, y_scale))
    }

    fn effective_scales(&self) -> ChartResult<(Scale, Scale)> {
        let (x_scale, y_scale) = self.base_scales()?;
        if self.view.is_identity() {
            return Ok((x_scale, y_scale));
        }
        Ok((
            windowed(x_scale, &self.view, true),
            windowed(y_scale, &self.view, false),
        ))
    }
}

/// Re-project a base scale so its domain is the window visible under the
/// view transform, keeping the pixel range fixed. All rendered elements are
/// then re-projected simply by being built against the windowed scale.
fn windowed(scale: Scale, view: &ViewTransform, horizontal: bool) -> Scale {
    let (r0, r1) = scale.range();
    let translate = if horizontal {
        view.translate.x
    } else {
        view.translate.y
    };
    let window = (
        scale.inverse_continuous((r0 - translate) / view.scale),
        scale.inverse_continuous((r1 - translate) / view.scale),
    );
    scale.with_domain(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataPoint;

    fn engine_with(points: Vec<DataPoint>) -> ChartEngine {
        let mut engine = ChartEngine::new(ChartConfig::default()).unwrap();
        engine.set_plot_area(Rect::new(0.0, 0.0, 800.0, 600.0));
        engine.set_dataset(vec![Series::new("history", points)]);
        engine
    }

    fn sample_points() -> Vec<DataPoint> {
        (0..20)
            .map(|i| DataPoint::new(i as f64, (i as f64 * 0.7).sin() * 10.0 + 20.0))
            .collect()
    }

    #[test]
    fn test_render_produces_frame() {
        let mut engine = engine_with(sample_points());
        let frame = engine.render().unwrap();
        assert_eq!(frame.series.len(), 1);
        assert_eq!(frame.series[0].segments.len(), 1);
        assert!(frame.x_axis.ticks.len() >= 2);
        assert!(frame.y_axis.ticks.len() >= 2);
        assert_eq!(frame.legend.len(), 1);
    }

    #[test]
    fn test_empty_dataset_fails_loudly() {
        let mut engine = ChartEngine::new(ChartConfig::default()).unwrap();
        engine.set_plot_area(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(engine.render().unwrap_err(), ChartError::EmptyDataset);

        engine.set_dataset(vec![Series::new("gaps", vec![DataPoint::gap(0.0)])]);
        assert_eq!(engine.render().unwrap_err(), ChartError::EmptyDataset);
    }

    #[test]
    fn test_missing_plot_area_fails() {
        let mut engine = ChartEngine::new(ChartConfig::default()).unwrap();
        engine.set_dataset(vec![Series::new("s", sample_points())]);
        assert_eq!(engine.render().unwrap_err(), ChartError::DegeneratePlotArea);
    }

    #[test]
    fn test_generation_bumps_on_dataset_replacement() {
        let mut engine = engine_with(sample_points());
        let first = engine.render().unwrap();
        engine.set_dataset(vec![Series::new("history", sample_points())]);
        let second = engine.render().unwrap();
        assert!(second.generation > first.generation);
    }

    #[test]
    fn test_pointer_outside_plot_hides() {
        let engine = engine_with(sample_points());
        assert_eq!(
            engine.pointer_moved(Vec2::new(-10.0, 50.0)),
            HoverEvent::Hide
        );
        assert_eq!(engine.pointer_left(), HoverEvent::Hide);
    }

    #[test]
    fn test_pointer_inside_shows_snapped_tooltip() {
        let engine = engine_with(sample_points());
        let event = engine.pointer_moved(Vec2::new(400.0, 300.0));
        let HoverEvent::Show(payload) = event else {
            panic!("expected a tooltip");
        };
        assert_eq!(payload.entries.len(), 1);
        assert_eq!(payload.entries[0].label, "history");
        // anchor snaps to the resolved data point, inside the plot
        assert!(payload.anchor.x >= 0.0 && payload.anchor.x <= 800.0);
    }

    #[test]
    fn test_gesture_respects_zoom_toggle() {
        let mut disabled = ChartEngine::new(ChartConfig::default().without_zoom()).unwrap();
        assert!(!disabled.apply_gesture(Gesture::zoom(2.0, Vec2::ZERO)));
        assert!(disabled.view().is_identity());

        let mut enabled = engine_with(sample_points());
        assert!(enabled.apply_gesture(Gesture::zoom(2.0, Vec2::new(400.0, 300.0))));
        assert!(!enabled.view().is_identity());
        enabled.reset_view();
        assert!(enabled.view().is_identity());
    }

    #[test]
    fn test_zoom_pivot_keeps_domain_point_fixed() {
        let mut engine = engine_with(sample_points());
        let pivot = Vec2::new(250.0, 300.0);

        let before = {
            let (x_scale, _) = engine.effective_scales().unwrap();
            x_scale.inverse(pivot.x)
        };
        assert!(engine.apply_gesture(Gesture::zoom(2.0, pivot)));
        let after = {
            let (x_scale, _) = engine.effective_scales().unwrap();
            x_scale.inverse(pivot.x)
        };
        assert!(
            (before - after).abs() < 1e-3,
            "domain under pivot moved: {before} -> {after}"
        );
    }

    #[test]
    fn test_reset_restores_base_scales_exactly() {
        let mut engine = engine_with(sample_points());
        let original = engine.render().unwrap();
        engine.apply_gesture(Gesture::zoom(3.0, Vec2::new(100.0, 100.0)));
        engine.apply_gesture(Gesture::pan(Vec2::new(40.0, -20.0)));
        engine.reset_view();
        let restored = engine.render().unwrap();
        assert_eq!(original.x_axis, restored.x_axis);
        assert_eq!(original.y_axis, restored.y_axis);
        assert_eq!(original.series, restored.series);
    }

    #[test]
    fn test_zoom_in_narrows_visible_domain() {
        let mut engine = engine_with(sample_points());
        let (base_x, _) = engine.effective_scales().unwrap();
        engine.apply_gesture(Gesture::zoom(2.0, Vec2::new(400.0, 300.0)));
        let (zoomed_x, _) = engine.effective_scales().unwrap();

        let base_span = base_x.domain().1 - base_x.domain().0;
        let zoomed_span = zoomed_x.domain().1 - zoomed_x.domain().0;
        assert!((zoomed_span - base_span / 2.0).abs() < base_span * 1e-4);
    }

    #[test]
    fn test_band_chart_renders() {
        let mut engine = ChartEngine::new(
            ChartConfig::default().with_x_scale(XScaleKind::Band),
        )
        .unwrap();
        engine.set_plot_area(Rect::new(0.0, 0.0, 400.0, 300.0));
        engine.set_dataset(vec![Series::from_tuples(
            "quarters",
            &[(0.0, 5.0), (1.0, 8.0), (2.0, 3.0), (3.0, 9.0)],
        )]);
        let frame = engine.render().unwrap();
        assert_eq!(frame.x_axis.ticks.len(), 4);
    }
}
