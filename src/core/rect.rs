//! Axis-Aligned Rectangles
//!
//! Every collision test in the game goes through [`overlaps`].

use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose corner sits at `origin + offset`.
    #[inline]
    pub fn at(origin: Vec2, offset: Vec2, w: f32, h: f32) -> Self {
        Self::new(origin.x + offset.x, origin.y + offset.y, w, h)
    }

    /// Same rectangle moved by `(dx, dy)`.
    #[inline]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Check if two rectangles overlap.
///
/// Both axes must intersect as open intervals, so rectangles that only
/// share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.right() > b.x && a.x < b.right() && a.bottom() > b.y && a.y < b.bottom()
}
