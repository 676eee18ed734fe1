//! Animatable value types
//!
//! Linear interpolation for the values the layout engine animates:
//! scalars, points, sizes, rects, colors and affine transforms.

use floatlabel_core::{Affine2D, Color, Point, Rect, Size};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t
    ///
    /// `t` is not clamped: spring curves overshoot past 1.0 on purpose.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

// ============================================================================
// f32 / Point / Size
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

impl Interpolate for Size {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Size::new(
            self.width.lerp(&other.width, t),
            self.height.lerp(&other.height, t),
        )
    }
}

// ============================================================================
// Rect
// ============================================================================

impl Interpolate for Rect {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Rect::from_origin_size(
            self.origin.lerp(&other.origin, t),
            self.size.lerp(&other.size, t),
        )
    }
}

// ============================================================================
// Color
// ============================================================================

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }
}

// ============================================================================
// Affine2D
// ============================================================================

impl Interpolate for Affine2D {
    /// Element-wise interpolation; exact for the scale/translate transforms
    /// the field animates.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut elements = [0.0; 6];
        for (i, value) in elements.iter_mut().enumerate() {
            *value = self.elements[i].lerp(&other.elements[i], t);
        }
        Affine2D { elements }
    }
}
