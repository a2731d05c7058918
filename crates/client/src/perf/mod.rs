//! Frame-budget adaptation.
//!
//! Two independent hysteresis loops drive the low-detail flag: one from
//! scene load (visible segment and snake counts), one from measured frame
//! rate. Either loop can force low detail; both must clear for normal
//! detail. The dead zones keep the flag from flickering at a boundary.

use tracing::debug;

use crate::config::DetailConfig;

#[derive(Debug)]
pub struct PerformanceAdaptiveController {
    low_load: bool,
    low_fps: bool,
    frame_count: u32,
    window_start_ms: Option<f64>,
    fps: u32,
    config: DetailConfig,
}

impl PerformanceAdaptiveController {
    pub fn new(config: &DetailConfig) -> Self {
        Self {
            low_load: false,
            low_fps: false,
            frame_count: 0,
            window_start_ms: None,
            fps: 0,
            config: config.clone(),
        }
    }

    /// Feed this tick's visible scene load.
    pub fn observe_load(&mut self, segments: usize, snakes: usize) {
        if !self.low_load
            && (segments > self.config.enter_segments || snakes > self.config.enter_snakes)
        {
            self.low_load = true;
            debug!(segments, snakes, "low detail engaged (load)");
        } else if self.low_load
            && segments < self.config.exit_segments
            && snakes < self.config.exit_snakes
        {
            self.low_load = false;
            debug!(segments, snakes, "low detail cleared (load)");
        }
    }

    /// Count one accepted frame; closes the sampling window when due.
    pub fn on_frame(&mut self, now_ms: f64) {
        self.frame_count += 1;
        let start = *self.window_start_ms.get_or_insert(now_ms);
        if now_ms - start >= self.config.fps_window_ms {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.window_start_ms = Some(now_ms);

            if !self.low_fps && self.fps < self.config.enter_fps {
                self.low_fps = true;
                debug!(fps = self.fps, "low detail engaged (fps)");
            } else if self.low_fps && self.fps > self.config.exit_fps {
                self.low_fps = false;
                debug!(fps = self.fps, "low detail cleared (fps)");
            }
        }
    }

    pub fn low_detail(&self) -> bool {
        self.low_load || self.low_fps
    }

    /// Last completed window's frame count.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> PerformanceAdaptiveController {
        PerformanceAdaptiveController::new(&DetailConfig::default())
    }

    #[test]
    fn test_load_hysteresis_dead_zone() {
        let mut perf = controller();
        perf.observe_load(500, 5);
        assert!(!perf.low_detail());

        // First tick over either threshold engages.
        perf.observe_load(1000, 14);
        assert!(perf.low_detail());

        // Inside the dead zone: stays engaged.
        perf.observe_load(700, 10);
        assert!(perf.low_detail());
        perf.observe_load(600, 10);
        assert!(perf.low_detail());

        // Both counts must clear their exit thresholds.
        perf.observe_load(649, 8);
        assert!(!perf.low_detail());
    }

    #[test]
    fn test_snake_count_alone_engages() {
        let mut perf = controller();
        perf.observe_load(100, 13);
        assert!(perf.low_detail());
    }

    #[test]
    fn test_fps_window() {
        let mut perf = controller();
        // 30 frames over one second: below the 45 enter threshold.
        for i in 0..=30 {
            perf.on_frame(i as f64 * 33.4);
        }
        assert_eq!(perf.fps(), 31);
        assert!(perf.low_detail());

        // 70 frames in the next window clears it (> 55).
        let base = 31.0 * 33.4;
        for i in 1..=70 {
            perf.on_frame(base + i as f64 * 14.3);
        }
        assert!(!perf.low_detail());
    }

    #[test]
    fn test_either_loop_forces_low_detail() {
        let mut perf = controller();
        perf.observe_load(1000, 5);
        assert!(perf.low_detail());
        // FPS loop clearing does not override the load loop.
        for i in 0..=70 {
            perf.on_frame(i as f64 * 14.3);
        }
        assert!(perf.low_detail());
    }
}
