//! Pan/zoom view transform.
//!
//! Gestures accumulate into a single translate+scale affine transform that
//! the engine applies on top of the base scales. The scale factor is
//! clamped on every update, and zooming preserves the domain point under
//! the gesture pivot ("zoom around cursor"). Composition is associative
//! but not commutative, so gestures must be applied in event order.

use glam::Vec2;

use crate::types::ZoomConfig;

/// An accumulated pan/zoom transform in pixel space.
///
/// A point `p` in base (unzoomed) pixel coordinates appears on screen at
/// `p * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Translation in pixels.
    pub translate: Vec2,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single pan/zoom gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// Multiplicative zoom delta (1.0 = no zoom).
    pub delta_scale: f32,
    /// Pan delta in pixels.
    pub delta: Vec2,
    /// Pixel position the zoom is anchored on.
    pub pivot: Vec2,
}

impl Gesture {
    /// A pure pan gesture.
    pub fn pan(delta: Vec2) -> Self {
        Self {
            delta_scale: 1.0,
            delta,
            pivot: Vec2::ZERO,
        }
    }

    /// A pure zoom gesture anchored at `pivot`.
    pub fn zoom(delta_scale: f32, pivot: Vec2) -> Self {
        Self {
            delta_scale,
            delta: Vec2::ZERO,
            pivot,
        }
    }
}

impl ViewTransform {
    /// Identity transform (no pan, no zoom). Restores the original
    /// scale/range exactly.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Whether this is the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Transform a base pixel coordinate into screen space.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        point * self.scale + self.translate
    }

    /// Transform a screen coordinate back into base pixel space.
    pub fn unapply(&self, point: Vec2) -> Vec2 {
        (point - self.translate) / self.scale
    }

    /// Apply a gesture, returning the updated transform.
    ///
    /// The new scale factor is `clamp(scale * delta_scale)` within the
    /// configured zoom range. The translation is solved so that the base
    /// point currently under the pivot stays under the pivot, then the pan
    /// delta is added.
    pub fn applied(&self, gesture: Gesture, zoom: &ZoomConfig) -> Self {
        let new_scale = (self.scale * gesture.delta_scale).clamp(zoom.min_scale, zoom.max_scale);
        let base = (gesture.pivot - self.translate) / self.scale;
        let translate = gesture.pivot - base * new_scale + gesture.delta;
        Self {
            translate,
            scale: new_scale,
        }
    }

    /// Compose: apply `self`, then `other`.
    pub fn then(&self, other: &ViewTransform) -> Self {
        Self {
            translate: other.translate + self.translate * other.scale,
            scale: self.scale * other.scale,
        }
    }
}

impl std::ops::Mul<ViewTransform> for ViewTransform {
    type Output = ViewTransform;

    fn mul(self, rhs: ViewTransform) -> ViewTransform {
        self.then(&rhs)
    }
}

impl std::ops::Mul<Vec2> for ViewTransform {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        self.apply(rhs)
    }
}
