//! World snapshot data model.
//!
//! One `Snapshot` is a complete, server-authoritative description of the
//! world at an instant. Snapshots replace each other wholesale on arrival;
//! there is no field-level merge.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A single snake body point. Index 0 in a snake is the head.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SnakeSegment {
    pub x: f32,
    pub y: f32,
}

impl SnakeSegment {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Power-up tags an entity can hold. Presence is a set-membership test.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Power {
    Ghost,
    Shield,
    Speed,
    Magnet,
    DoubleScore,
}

/// A player- or bot-controlled snake.
///
/// `powers` maps each active power tag to its expiry timestamp (ms since
/// epoch, server clock). `spawn_time`/`spawn_duration` are the server's
/// declared birth timeline, when it declares one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub alive: bool,
    #[serde(default)]
    pub snake: Vec<SnakeSegment>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub length: u32,
    #[serde(default)]
    pub powers: BTreeMap<Power, f64>,
    #[serde(default)]
    pub spawn_protection: Option<f64>,
    #[serde(default, alias = "spawn_time_ms")]
    pub spawn_time: Option<f64>,
    #[serde(default, alias = "spawn_duration_ms")]
    pub spawn_duration: Option<f64>,
}

impl Entity {
    /// Head position, if the snake has any segments.
    #[inline]
    pub fn head(&self) -> Option<Vec2> {
        self.snake.first().map(SnakeSegment::pos)
    }

    pub fn has_power(&self, power: Power) -> bool {
        self.powers.contains_key(&power)
    }

    /// Power tags whose expiry lies in the future, in stable tag order.
    pub fn active_powers(&self, now_ms: f64) -> Vec<Power> {
        self.powers
            .iter()
            .filter(|(_, expiry)| **expiry > now_ms)
            .map(|(power, _)| *power)
            .collect()
    }

    pub fn spawn_protected(&self, now_ms: f64) -> bool {
        self.spawn_protection.is_some_and(|expiry| now_ms < expiry)
    }
}

/// Food and power-food pellets. `scale` is both an emergence/consumption
/// animation input and a visibility gate: `scale <= 0` means not visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub size: f32,
    #[serde(default)]
    pub color: String,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl FoodItem {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Score-ordered leaderboard row. Rank is positional (index + 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    #[serde(default)]
    pub score: u32,
}

/// Battle-royale boundary phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArenaPhase {
    #[default]
    Static,
    Shrinking,
    Final,
}

/// Axis-aligned closing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
    #[serde(default)]
    pub phase: ArenaPhase,
}

/// The authoritative world state at one point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub players: HashMap<String, Entity>,
    #[serde(default)]
    pub bots: HashMap<String, Entity>,
    #[serde(default)]
    pub food: Vec<FoodItem>,
    #[serde(default)]
    pub power_food: Vec<FoodItem>,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub arena: Option<Arena>,
}

impl Snapshot {
    /// Look up an entity by map key, players first, then bots.
    pub fn entity_by_id(&self, id: &str) -> Option<&Entity> {
        self.players.get(id).or_else(|| self.bots.get(id))
    }

    /// Look up an entity by display name, players first, then bots.
    /// Duplicate names resolve to the first match in map iteration order.
    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.players
            .values()
            .find(|entity| entity.name == name)
            .or_else(|| self.bots.values().find(|entity| entity.name == name))
    }

    /// Leaderboard rank (1-based) of the given display name.
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.leaderboard
            .iter()
            .position(|entry| entry.name == name)
            .map(|index| index + 1)
    }
}
