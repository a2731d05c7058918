//! Spawn materialize animation.
//!
//! The server does not animate births; a local per-entity timeline is
//! synthesized on first sighting and held immutable until the entity leaves
//! the active set. Re-deriving the timeline each tick would restart the
//! animation, which is forbidden.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

use crate::config::SpawnConfig;

/// Immutable per-entity birth timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRecord {
    pub start_ms: f64,
    pub duration_ms: f64,
}

/// Produces a 0-1 materialize progress per entity per tick.
#[derive(Debug)]
pub struct SpawnAnimator {
    records: HashMap<String, SpawnRecord>,
    rng: SmallRng,
    config: SpawnConfig,
}

impl SpawnAnimator {
    pub fn new(config: &SpawnConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// Fixed-seed constructor for deterministic tests.
    pub fn with_seed(config: &SpawnConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: &SpawnConfig, rng: SmallRng) -> Self {
        Self {
            records: HashMap::new(),
            rng,
            config: config.clone(),
        }
    }

    /// Materialize progress for one entity.
    ///
    /// The locally controlled player never animates in (`is_self`). A future
    /// `spawn_time` is honored as declared; a past-or-present one gets a
    /// bounded random start jitter so simultaneous joiners do not animate in
    /// lock-step; no declared time starts immediately.
    pub fn progress(
        &mut self,
        key: &str,
        is_self: bool,
        spawn_time: Option<f64>,
        spawn_duration: Option<f64>,
        now_ms: f64,
    ) -> f32 {
        if is_self {
            return 1.0;
        }

        if !self.records.contains_key(key) {
            let start_ms = match spawn_time {
                Some(declared) if declared > now_ms => declared,
                Some(declared) => declared + self.rng.random_range(0.0..self.config.jitter_ms),
                None => now_ms,
            };
            let duration_ms = spawn_duration
                .unwrap_or(self.config.default_duration_ms)
                .max(1.0);
            self.records.insert(
                key.to_string(),
                SpawnRecord {
                    start_ms,
                    duration_ms,
                },
            );
        }
        let record = self.records[key];

        let t = ((now_ms - record.start_ms) / record.duration_ms).clamp(0.0, 1.0) as f32;
        t * t * (3.0 - 2.0 * t)
    }

    /// Progress above which the name label shows.
    pub fn name_visible(&self, progress: f32) -> bool {
        progress > self.config.name_reveal
    }

    /// Progress above which power effects show.
    pub fn effects_visible(&self, progress: f32) -> bool {
        progress > self.config.effect_reveal
    }

    /// Purge records for keys no longer in the active set.
    pub fn retain_active(&mut self, active: &HashSet<String>) {
        self.records.retain(|key, _| active.contains(key));
    }

    pub fn record(&self, key: &str) -> Option<&SpawnRecord> {
        self.records.get(key)
    }

    /// Drop all timelines (session teardown/restart).
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
