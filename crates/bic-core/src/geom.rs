//! Canvas geometry: points, sizes, and spawn-position defaults.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Floor applied to every widget during resize.
pub const MIN_WIDGET_SIZE: Size = Size {
    width: 300.0,
    height: 200.0,
};

/// A position on the canvas, in CSS-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A widget box size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Element-wise max against a minimum size.
    pub fn clamp_min(self, min: Size) -> Size {
        Size {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

/// The visible canvas dimensions, used only to pick default spawn
/// positions. Widgets may be dragged or resized past these bounds —
/// no edge clamping is applied after spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
        }
    }
}

impl CanvasBounds {
    /// Random spawn point such that a widget of `size` starts fully
    /// inside the bounds. Never negative, even when the widget is
    /// larger than the canvas.
    pub fn random_position(&self, size: Size) -> Point {
        let max_x = (self.width - size.width).max(0.0);
        let max_y = (self.height - size.height).max(0.0);
        let mut rng = rand::rng();
        Point {
            x: rng.random_range(0.0..=max_x),
            y: rng.random_range(0.0..=max_y),
        }
    }
}
