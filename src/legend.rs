//! Legend entries and deterministic style resolution.
//!
//! Series styles are assigned positionally from a palette the first time a
//! series id is seen, then cached, so a series keeps its color and dash
//! pattern across re-renders even as other series are added or removed.

use ahash::AHashMap;

use crate::color::Color;
use crate::types::{Series, SeriesId};

/// Line dash pattern.
///
/// Alternating on/off segment lengths; an empty segments array is a solid
/// line. Pure presentation data, passed through to the adapter unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashPattern {
    /// Alternating lengths: [on, off, on, off, ...]. Empty = solid.
    pub segments: Vec<f32>,
    /// Phase offset (starting position in the pattern).
    pub phase: f32,
}

impl DashPattern {
    /// Solid line (no dashes).
    pub const SOLID: DashPattern = DashPattern {
        segments: Vec::new(),
        phase: 0.0,
    };

    /// Create a dashed pattern.
    pub fn dashed(dash: f32, gap: f32) -> Self {
        Self {
            segments: vec![dash, gap],
            phase: 0.0,
        }
    }

    /// Create a dotted pattern.
    pub fn dotted(size: f32) -> Self {
        Self {
            segments: vec![size, size],
            phase: 0.0,
        }
    }

    /// Check if this is a solid line.
    pub fn is_solid(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A resolved legend entry for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub series_id: SeriesId,
    pub label: String,
    pub color: Color,
    pub dash: DashPattern,
}

/// Color/dash palette cycled through by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub colors: Vec<Color>,
    pub dashes: Vec<DashPattern>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::from_hex(0x4E79A7),
                Color::from_hex(0xF28E2B),
                Color::from_hex(0x59A14F),
                Color::from_hex(0xE15759),
                Color::from_hex(0x76B7B2),
                Color::from_hex(0xEDC948),
                Color::from_hex(0xB07AA1),
                Color::from_hex(0x9C755F),
            ],
            dashes: vec![DashPattern::SOLID],
        }
    }
}

impl Palette {
    fn style_at(&self, index: usize) -> (Color, DashPattern) {
        let color = self.colors[index % self.colors.len()];
        // dash advances once per full color cycle, so sibling series stay
        // distinguishable past the palette length
        let dash = self.dashes[(index / self.colors.len()) % self.dashes.len()].clone();
        (color, dash)
    }
}

/// Assigns stable styles to series and produces legend entries.
#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    palette: Palette,
    assigned: AHashMap<SeriesId, usize>,
    next_slot: usize,
}

impl StyleResolver {
    /// Create a resolver over the default palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver over a custom palette.
    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette,
            assigned: AHashMap::new(),
            next_slot: 0,
        }
    }

    /// Resolve styles for the given series list.
    ///
    /// First sight of a series id claims the next palette slot; the
    /// assignment is cached, so re-resolving after other series were added
    /// or removed never changes an existing series' style.
    pub fn resolve(&mut self, series: &[Series]) -> Vec<LegendEntry> {
        let assigned = &mut self.assigned;
        let next_slot = &mut self.next_slot;
        let palette = &self.palette;

        series
            .iter()
            .map(|s| {
                let slot = *assigned.entry(s.id).or_insert_with(|| {
                    let slot = *next_slot;
                    *next_slot += 1;
                    slot
                });
                let (color, dash) = palette.style_at(slot);
                LegendEntry {
                    series_id: s.id,
                    label: s.label.clone(),
                    color,
                    dash,
                }
            })
            .collect()
    }

    /// Resolved style for a single known series id, if any.
    pub fn style_of(&self, id: SeriesId) -> Option<(Color, DashPattern)> {
        self.assigned.get(&id).map(|&slot| self.palette.style_at(slot))
    }
}
