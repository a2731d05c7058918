//! Viewport culling - camera-relative visible region and entity filtering.

use glam::Vec2;
use protocol::{Entity, FoodItem, SnakeSegment, Snapshot};
use std::collections::HashSet;

use crate::config::CullingConfig;
use crate::render::Rect;

/// One snake that passed the visibility test, keyed by its map key.
#[derive(Debug, Clone, Copy)]
pub struct VisibleSnake<'a> {
    pub key: &'a str,
    pub entity: &'a Entity,
    pub is_player: bool,
}

/// Recomputes the visible region each tick and filters entities against it.
///
/// Point entities use the base rectangle; snakes use a larger rectangle and
/// a sampling test so per-frame cost stays bounded regardless of length. A
/// barely-overlapping long snake can be missed between samples; that trade
/// is deliberate.
#[derive(Debug)]
pub struct ViewportCuller {
    bounds: Rect,
    snake_bounds: Rect,
    config: CullingConfig,
}

impl ViewportCuller {
    pub fn new(config: &CullingConfig) -> Self {
        Self {
            bounds: Rect::default(),
            snake_bounds: Rect::default(),
            config: config.clone(),
        }
    }

    /// Rebuild both rectangles from the camera offset and viewport size.
    pub fn recompute(&mut self, camera: Vec2, viewport: Vec2) {
        self.bounds = Rect::new(
            camera - Vec2::splat(self.config.margin),
            camera + viewport + Vec2::splat(self.config.margin),
        );
        self.snake_bounds = self.bounds.expand(self.config.snake_margin);
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Filter point entities: inside the base rectangle with scale > 0,
    /// truncated to `cap` in snapshot order.
    pub fn visible_food<'a>(&self, items: &'a [FoodItem], cap: usize) -> Vec<&'a FoodItem> {
        items
            .iter()
            .filter(|item| item.scale > 0.0 && self.bounds.contains(item.pos()))
            .take(cap)
            .collect()
    }

    /// Sampling visibility test against the expanded rectangle.
    pub fn snake_visible(&self, snake: &[SnakeSegment]) -> bool {
        let len = snake.len();
        if len == 0 {
            return false;
        }
        if len <= self.config.exhaustive_len {
            return snake
                .iter()
                .any(|segment| self.snake_bounds.contains(segment.pos()));
        }
        let samples = self.config.snake_samples.min(len).max(2);
        (0..samples).any(|i| {
            let index = i * (len - 1) / (samples - 1);
            self.snake_bounds.contains(snake[index].pos())
        })
    }

    /// Visible alive snakes (players first, then bots) plus the active key
    /// set used to purge stale spawn records.
    pub fn visible_snakes<'a>(
        &self,
        snapshot: &'a Snapshot,
    ) -> (Vec<VisibleSnake<'a>>, HashSet<String>) {
        let mut visible = Vec::new();
        let mut active = HashSet::new();

        for (is_player, map) in [(true, &snapshot.players), (false, &snapshot.bots)] {
            for (key, entity) in map {
                if entity.alive && self.snake_visible(&entity.snake) {
                    active.insert(key.clone());
                    visible.push(VisibleSnake {
                        key,
                        entity,
                        is_player,
                    });
                }
            }
        }

        (visible, active)
    }
}
