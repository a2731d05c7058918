//! Geometry smoothing - snake path reduction and arena bound easing.

use glam::Vec2;
use protocol::{Arena, ArenaPhase, SnakeSegment};

use crate::config::GeometryConfig;
use crate::render::{ArenaView, Rect};

/// Tick length (ms) at which the easing constants apply exactly.
const REFERENCE_TICK_MS: f32 = 16.0;

/// Select points at a fixed stride walking tail to head, always including
/// the head as the final point. Bounds curve-construction cost independent
/// of snake length while keeping head precision for steering feedback.
pub fn reduce_path(snake: &[SnakeSegment], budget: usize) -> Vec<Vec2> {
    if snake.is_empty() {
        return Vec::new();
    }
    let budget = budget.max(1);
    let stride = (snake.len() / budget).max(1);

    let mut points = Vec::with_capacity(snake.len().min(budget) + 2);
    let mut index = snake.len() - 1;
    loop {
        points.push(snake[index].pos());
        if index < stride {
            break;
        }
        index -= stride;
    }
    if index != 0 {
        points.push(snake[0].pos());
    }
    points
}

/// Piecewise midpoint smoothing: each interior point is blended toward the
/// midpoint of itself and its successor, hiding faceting at low budgets.
/// Endpoints pass through unchanged.
pub fn smooth_path(points: &[Vec2]) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for i in 1..points.len() - 1 {
        let mid = (points[i] + points[i + 1]) * 0.5;
        out.push((points[i] + mid) * 0.5);
    }
    out.push(points[points.len() - 1]);
    out
}

/// Client-local eased copy of the arena boundary. Exists only while the
/// snapshot carries arena data; eases toward the authoritative bounds
/// rather than snapping, faster while the boundary is shrinking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaRenderState {
    pub bounds: Rect,
    pub phase: ArenaPhase,
    pub updated_ms: f64,
}

#[derive(Debug)]
pub struct ArenaEasing {
    state: Option<ArenaRenderState>,
    smoothing: f32,
    shrink_smoothing: f32,
}

impl ArenaEasing {
    pub fn new(config: &GeometryConfig) -> Self {
        Self {
            state: None,
            smoothing: config.arena_smoothing,
            shrink_smoothing: config.arena_smoothing_shrinking,
        }
    }

    pub fn tick(&mut self, arena: Option<&Arena>, dt_ms: f64, now_ms: f64) -> Option<ArenaView> {
        let Some(arena) = arena else {
            self.state = None;
            return None;
        };
        let target = Rect::new(
            Vec2::new(arena.min_x, arena.min_y),
            Vec2::new(arena.max_x, arena.max_y),
        );

        match &mut self.state {
            Some(state) => {
                let smoothing = if arena.phase == ArenaPhase::Shrinking {
                    self.shrink_smoothing
                } else {
                    self.smoothing
                };
                let alpha = 1.0 - (1.0 - smoothing).powf(dt_ms as f32 / REFERENCE_TICK_MS);
                state.bounds.min += (target.min - state.bounds.min) * alpha;
                state.bounds.max += (target.max - state.bounds.max) * alpha;
                state.phase = arena.phase;
                state.updated_ms = now_ms;
            }
            None => {
                // First sighting snaps; there is nothing to ease from.
                self.state = Some(ArenaRenderState {
                    bounds: target,
                    phase: arena.phase,
                    updated_ms: now_ms,
                });
            }
        }

        self.state.map(|state| ArenaView {
            bounds: state.bounds,
            phase: state.phase,
        })
    }

    pub fn state(&self) -> Option<&ArenaRenderState> {
        self.state.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_snake(len: usize) -> Vec<SnakeSegment> {
        (0..len)
            .map(|i| SnakeSegment {
                x: i as f32,
                y: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_reduce_keeps_head_last() {
        for len in [1, 2, 5, 48, 49, 200, 1000] {
            let snake = straight_snake(len);
            let points = reduce_path(&snake, 48);
            assert_eq!(*points.last().unwrap(), Vec2::ZERO, "len {len}");
            assert_eq!(points[0], Vec2::new((len - 1) as f32, 0.0));
        }
    }

    #[test]
    fn test_reduce_bounds_point_count() {
        let snake = straight_snake(1000);
        let normal = reduce_path(&snake, 48);
        let low = reduce_path(&snake, 24);
        assert!(normal.len() <= 52);
        assert!(low.len() <= 27);
        assert!(low.len() < normal.len());
    }

    #[test]
    fn test_short_snake_unreduced() {
        let snake = straight_snake(10);
        let points = reduce_path(&snake, 48);
        assert_eq!(points.len(), 10);
    }

    #[test]
    fn test_smooth_preserves_endpoints() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(30.0, 10.0),
        ];
        let smoothed = smooth_path(&points);
        assert_eq!(smoothed.len(), points.len());
        assert_eq!(smoothed[0], points[0]);
        assert_eq!(*smoothed.last().unwrap(), *points.last().unwrap());
        // Interior point pulled toward its successor.
        assert!(smoothed[1].x > points[1].x);
    }

    #[test]
    fn test_smooth_passthrough_below_three_points() {
        let points = vec![Vec2::ZERO, Vec2::new(1.0, 1.0)];
        assert_eq!(smooth_path(&points), points);
    }

    fn arena(min: f32, max: f32, phase: ArenaPhase) -> Arena {
        Arena {
            min_x: min,
            min_y: min,
            max_x: max,
            max_y: max,
            phase,
        }
    }

    #[test]
    fn test_arena_snaps_on_first_sighting() {
        let mut easing = ArenaEasing::new(&GeometryConfig::default());
        let view = easing
            .tick(Some(&arena(0.0, 2000.0, ArenaPhase::Static)), 16.0, 100.0)
            .unwrap();
        assert_eq!(view.bounds.max, Vec2::splat(2000.0));
    }

    #[test]
    fn test_arena_eases_not_snaps_on_change() {
        let mut easing = ArenaEasing::new(&GeometryConfig::default());
        easing.tick(Some(&arena(0.0, 2000.0, ArenaPhase::Static)), 16.0, 0.0);
        let view = easing
            .tick(Some(&arena(500.0, 1500.0, ArenaPhase::Shrinking)), 16.0, 16.0)
            .unwrap();
        // One shrinking tick moves 18% of the way.
        assert!((view.bounds.min.x - 500.0 * 0.18).abs() < 1e-3);
        assert!(view.bounds.max.x > 1500.0);
        assert_eq!(view.phase, ArenaPhase::Shrinking);
    }

    #[test]
    fn test_final_phase_eases_at_slow_rate() {
        let mut slow = ArenaEasing::new(&GeometryConfig::default());
        slow.tick(Some(&arena(0.0, 2000.0, ArenaPhase::Static)), 16.0, 0.0);
        let view = slow
            .tick(Some(&arena(500.0, 1500.0, ArenaPhase::Final)), 16.0, 16.0)
            .unwrap();
        assert!((view.bounds.min.x - 500.0 * 0.12).abs() < 1e-3);
    }

    #[test]
    fn test_state_dropped_without_arena_data() {
        let mut easing = ArenaEasing::new(&GeometryConfig::default());
        easing.tick(Some(&arena(0.0, 2000.0, ArenaPhase::Static)), 16.0, 0.0);
        assert!(easing.tick(None, 16.0, 16.0).is_none());
        assert!(easing.state().is_none());
    }
}
