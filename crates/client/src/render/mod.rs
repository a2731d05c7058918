//! Per-tick view model handed to the drawing backend.
//!
//! The core never touches a drawing surface; a backend implements
//! [`Renderer`] and consumes one [`FrameModel`] per accepted tick.

use glam::Vec2;
use protocol::{ArenaPhase, Power};

/// Axis-aligned rectangle with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }
}

/// Eased copy of the arena boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaView {
    pub bounds: Rect,
    pub phase: ArenaPhase,
}

/// One visible food or power-food pellet.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodView {
    pub position: Vec2,
    pub size: f32,
    pub color: String,
    pub scale: f32,
}

/// One visible snake, reduced and smoothed.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeView {
    /// Smoothed body polyline, tail to head.
    pub points: Vec<Vec2>,
    pub head: Vec2,
    /// Second-to-last reduced point; gives the backend a heading reference.
    pub neck: Option<Vec2>,
    pub color: String,
    pub body_width: f32,
    /// Spawn materialize progress, also the draw alpha.
    pub alpha: f32,
    pub low_detail: bool,
    /// Display name, present once the reveal gate passes.
    pub label: Option<String>,
    /// Active power tags, present once the reveal gate passes.
    pub powers: Vec<Power>,
    pub spawn_protected: bool,
}

/// Complete scene description for one tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameModel {
    /// World-space offset of the viewport's top-left corner.
    pub camera: Vec2,
    pub low_detail: bool,
    pub arena: Option<ArenaView>,
    pub food: Vec<FoodView>,
    pub power_food: Vec<FoodView>,
    pub snakes: Vec<SnakeView>,
}

/// Drawing backend boundary.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameModel);
}

/// Head radius in world units.
pub const HEAD_WIDTH: f32 = 12.0;

/// Body radius at segment index `i`, tapering from 10 down to 6.
#[inline]
pub fn segment_width(i: usize) -> f32 {
    if i == 0 {
        HEAD_WIDTH
    } else {
        (10.0 - (i as f32 * 0.03).min(3.0)).max(6.0)
    }
}

/// Per-segment opacity, fading toward the tail with a 0.7 floor.
#[inline]
pub fn segment_alpha(i: usize) -> f32 {
    (1.0 - i as f32 * 0.008).max(0.7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_bounds_inclusive() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::ZERO));
        assert!(!rect.contains(Vec2::new(10.1, 5.0)));
    }

    #[test]
    fn test_segment_taper() {
        assert_eq!(segment_width(0), 12.0);
        assert_eq!(segment_width(1), 10.0 - 0.03);
        assert_eq!(segment_width(500), 7.0);
        assert_eq!(segment_width(5000), 7.0); // taper capped at 3
    }

    #[test]
    fn test_segment_alpha_floor() {
        assert_eq!(segment_alpha(0), 1.0);
        assert_eq!(segment_alpha(1000), 0.7);
    }
}
