//! Scales: bidirectional mapping between data domains and pixel ranges.
//!
//! Three scale kinds cover the engine's input shapes:
//! - `Linear` — plain numeric domains
//! - `Time` — Unix-millisecond timestamps (same mapping math, time-aware ticks)
//! - `Band` — categorical slots with inner padding and a `bandwidth`
//!
//! A scale maps `domain -> range` with [`Scale::forward`] and back with
//! [`Scale::inverse`]. Ranges may be reversed (`range.0 > range.1`), which is
//! how the engine expresses the y-axis flip between data space (up) and
//! screen space (down).

use crate::error::{ChartError, ChartResult};

/// Scale kind. Closed set: the engine resolves the mapping at configuration
/// time rather than through any runtime lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Time,
    Band,
}

/// A scale mapping a data domain to a pixel range.
///
/// ```
/// use plotline::Scale;
///
/// let scale = Scale::linear((0.0, 100.0), (0.0, 800.0)).unwrap();
/// assert_eq!(scale.forward(50.0), 400.0);
/// assert!((scale.inverse(400.0) - 50.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
    /// Data domain. For band scales this is a continuous slot window over
    /// `[0, band_count]`, which lets zoom/pan use the same window math as
    /// the numeric kinds.
    domain: (f64, f64),
    range: (f32, f32),
    clamp: bool,
    band_count: usize,
    band_padding: f32,
}

impl Scale {
    /// Create a linear scale.
    pub fn linear(domain: (f64, f64), range: (f32, f32)) -> ChartResult<Self> {
        Self::validated(ScaleKind::Linear, domain, range, 0, 0.0)
    }

    /// Create a time scale over Unix-millisecond timestamps.
    pub fn time(domain: (f64, f64), range: (f32, f32)) -> ChartResult<Self> {
        Self::validated(ScaleKind::Time, domain, range, 0, 0.0)
    }

    /// Create a band scale dividing the range into `count` equal slots.
    ///
    /// `padding` is the inner padding fraction (`0.0..1.0`) subtracted from
    /// each slot's width; slot centers are unaffected.
    pub fn band(count: usize, range: (f32, f32), padding: f32) -> ChartResult<Self> {
        if count == 0 {
            return Err(ChartError::EmptyBand);
        }
        Self::validated(
            ScaleKind::Band,
            (0.0, count as f64),
            range,
            count,
            padding.clamp(0.0, 0.99),
        )
    }

    fn validated(
        kind: ScaleKind,
        domain: (f64, f64),
        range: (f32, f32),
        band_count: usize,
        band_padding: f32,
    ) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::NonFiniteDomain {
                min: domain.0,
                max: domain.1,
            });
        }
        if !range.0.is_finite() || !range.1.is_finite() || (range.1 - range.0).abs() < f32::EPSILON
        {
            return Err(ChartError::EmptyRange { at: range.0 });
        }
        Ok(Self {
            kind,
            domain,
            range,
            clamp: false,
            band_count,
            band_padding,
        })
    }

    /// The scale kind.
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// The data domain `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The pixel range `(start, end)`; may be reversed.
    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Enable clamping: `forward` output is restricted to the range.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Replace the domain, keeping kind/range/band settings.
    pub(crate) fn with_domain(mut self, domain: (f64, f64)) -> Self {
        self.domain = domain;
        self
    }

    /// Number of band slots (0 for non-band scales).
    pub fn band_count(&self) -> usize {
        self.band_count
    }

    /// Slot width after inner padding, for bar/column rendering.
    ///
    /// `None` for non-band scales.
    pub fn bandwidth(&self) -> Option<f32> {
        if self.kind != ScaleKind::Band {
            return None;
        }
        let window = (self.domain.1 - self.domain.0).abs().max(f64::EPSILON);
        let slot = ((self.range.1 - self.range.0).abs() as f64 / window) as f32;
        Some(slot * (1.0 - self.band_padding))
    }

    /// Map a domain value to a pixel coordinate.
    ///
    /// Band scales take a slot index and return the slot-center pixel.
    /// A degenerate (equal-endpoint) domain maps everything to the range
    /// midpoint instead of dividing by zero.
    pub fn forward(&self, value: f64) -> f32 {
        let v = match self.kind {
            ScaleKind::Band => value + 0.5,
            _ => value,
        };

        let span = self.domain.1 - self.domain.0;
        let mut t = if span.abs() < f64::EPSILON {
            0.5
        } else {
            (v - self.domain.0) / span
        };

        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }

        self.range.0 + t as f32 * (self.range.1 - self.range.0)
    }

    /// Map a pixel coordinate back to a domain value.
    ///
    /// Defined for any pixel inside the range (and, unclamped, beyond it).
    /// Band scales snap to the nearest slot index.
    pub fn inverse(&self, px: f32) -> f64 {
        let v = self.inverse_continuous(px);

        match self.kind {
            ScaleKind::Band => {
                let last = (self.band_count - 1) as f64;
                (v - 0.5).round().clamp(0.0, last)
            }
            _ => v,
        }
    }

    /// Inverse mapping without band snapping; used for visible-window
    /// derivation under pan/zoom, where fractional slot positions matter.
    pub(crate) fn inverse_continuous(&self, px: f32) -> f64 {
        let t = f64::from((px - self.range.0) / (self.range.1 - self.range.0));
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }

    /// Pad the domain outward by a fraction of its span on each side.
    ///
    /// Keeps extreme points off the axis edge. No-op for band scales, for a
    /// zero fraction, and for degenerate domains (the `forward` midpoint
    /// guard already covers those).
    pub fn with_padding(mut self, fraction: f64) -> Self {
        if self.kind == ScaleKind::Band || fraction <= 0.0 {
            return self;
        }
        let span = self.domain.1 - self.domain.0;
        if span.abs() < f64::EPSILON {
            return self;
        }
        let pad = span * fraction;
        self.domain = (self.domain.0 - pad, self.domain.1 + pad);
        self
    }

    /// Round the domain outward to multiples of a nice step derived from
    /// `tick_count`.
    ///
    /// Expansion can change the derived step, so the rounding iterates to a
    /// fixed point; applying `nice` twice therefore yields the same domain
    /// as applying it once.
    pub fn nice(mut self, tick_count: usize) -> Self {
        if self.kind == ScaleKind::Band || tick_count == 0 {
            return self;
        }
        let (mut lo, mut hi) = self.domain;
        if !(hi - lo).is_finite() || (hi - lo).abs() < f64::EPSILON {
            return self;
        }
        let reversed = lo > hi;
        if reversed {
            std::mem::swap(&mut lo, &mut hi);
        }

        for _ in 0..4 {
            let step = nice_step((hi - lo) / tick_count as f64);
            let new_lo = align_down(lo, step);
            let new_hi = align_up(hi, step);
            if new_lo == lo && new_hi == hi {
                break;
            }
            lo = new_lo;
            hi = new_hi;
        }

        self.domain = if reversed { (hi, lo) } else { (lo, hi) };
        self
    }
}

/// Round a raw step up to a human-friendly {1, 2, 5} * 10^n value.
pub(crate) fn nice_step(rough: f64) -> f64 {
    let magnitude = 10f64.powf(rough.abs().log10().floor());
    let normalized = rough.abs() / magnitude;

    if normalized < 1.5 {
        magnitude
    } else if normalized < 3.0 {
        2.0 * magnitude
    } else if normalized < 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    }
}

/// Largest step multiple `<= value`, tolerant of values that are already
/// multiples up to floating-point fuzz.
pub(crate) fn align_down(value: f64, step: f64) -> f64 {
    let q = value / step;
    if (q - q.round()).abs() < 1e-9 {
        q.round() * step
    } else {
        q.floor() * step
    }
}

/// Smallest step multiple `>= value`, tolerant like [`align_down`].
pub(crate) fn align_up(value: f64, step: f64) -> f64 {
    let q = value / step;
    if (q - q.round()).abs() < 1e-9 {
        q.round() * step
    } else {
        q.ceil() * step
    }
}
