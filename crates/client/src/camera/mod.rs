// Camera tracking - critically damped follow of the chosen target point.
//
// Exponential-decay filter, normalized so the configured smoothing factor
// applies exactly at the reference tick length:
//   camera += (target - camera) * (1 - (1 - smoothing)^(dt / reference))
use glam::Vec2;

use crate::config::CameraConfig;

/// Client-local camera point. Persists across snapshots and eases toward
/// a target every tick; holds position when no target resolves.
#[derive(Debug)]
pub struct CameraController {
    pub position: Vec2,
    smoothing: f32,
    reference_tick_ms: f32,
}

impl CameraController {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            smoothing: config.smoothing,
            reference_tick_ms: config.reference_tick_ms,
        }
    }

    /// Move toward `target`. `dt_ms` is the time since the last accepted tick.
    pub fn tick(&mut self, target: Vec2, dt_ms: f64) {
        let exponent = dt_ms as f32 / self.reference_tick_ms;
        let alpha = 1.0 - (1.0 - self.smoothing).powf(exponent);
        self.position += (target - self.position) * alpha;
    }

    /// Snap without easing (session reset).
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
    }
}
