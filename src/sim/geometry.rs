//! Axis-aligned rectangles and motion directions
//!
//! Every entity in the play field is a screen-space rectangle (y grows
//! downward). Motion is a discrete direction times a fixed speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from a top-left corner and a size
    pub fn from_origin(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Move the rectangle by `delta`, keeping its size
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.left += delta.x;
        self.right += delta.x;
        self.top += delta.y;
        self.bottom += delta.y;
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Horizontal span overlap, with `slack` added on both sides of `self`
    #[inline]
    pub fn overlaps_horizontally(&self, other: &Rect, slack: f32) -> bool {
        self.left - slack < other.right && other.left < self.right + slack
    }
}

/// Play field dimensions; the origin is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(crate::consts::FIELD_WIDTH, crate::consts::FIELD_HEIGHT)
    }
}

/// Discrete motion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    Stopped,
    Up,
    Down,
}

impl Direction {
    /// Unit step for this direction (screen space, +y is down)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Stopped => Vec2::ZERO,
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }

    /// Horizontal mirror; vertical and stopped directions are unchanged
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            other => other,
        }
    }
}

/// Anything a renderer can draw: a rectangle plus whether it is shown
pub trait Renderable {
    fn bounds(&self) -> Rect;
    fn is_shown(&self) -> bool;
}
