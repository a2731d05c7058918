//! Client tuning configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub culling: CullingConfig,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub detail: DetailConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl ClientConfig {
    /// Load configuration from `client.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new("client.toml");
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("No client.toml found, creating default config");
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }
}

/// Render tick pacing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Target frame rate; ticks arriving faster than this are skipped.
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

fn default_target_fps() -> u32 {
    60
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
        }
    }
}

/// Camera tracking.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CameraConfig {
    /// Exponential-decay smoothing factor per reference tick.
    #[serde(default = "default_camera_smoothing")]
    pub smoothing: f32,
    /// Tick length (ms) at which `smoothing` applies exactly.
    #[serde(default = "default_reference_tick_ms")]
    pub reference_tick_ms: f32,
}

fn default_camera_smoothing() -> f32 {
    0.08
}

fn default_reference_tick_ms() -> f32 {
    16.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: default_camera_smoothing(),
            reference_tick_ms: default_reference_tick_ms(),
        }
    }
}

/// Viewport culling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CullingConfig {
    /// Margin (world units) added around the viewport for point entities.
    #[serde(default = "default_margin")]
    pub margin: f32,
    /// Extra margin added on top of `margin` for snake sampling.
    #[serde(default = "default_snake_margin")]
    pub snake_margin: f32,
    /// Visible food list cap.
    #[serde(default = "default_max_food")]
    pub max_food: usize,
    /// Visible power-food list cap.
    #[serde(default = "default_max_power_food")]
    pub max_power_food: usize,
    /// Sample count for long snakes.
    #[serde(default = "default_snake_samples")]
    pub snake_samples: usize,
    /// Snakes up to this length are tested segment by segment.
    #[serde(default = "default_exhaustive_len")]
    pub exhaustive_len: usize,
}

fn default_margin() -> f32 {
    50.0
}

fn default_snake_margin() -> f32 {
    160.0
}

fn default_max_food() -> usize {
    150
}

fn default_max_power_food() -> usize {
    20
}

fn default_snake_samples() -> usize {
    12
}

fn default_exhaustive_len() -> usize {
    3
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            snake_margin: default_snake_margin(),
            max_food: default_max_food(),
            max_power_food: default_max_power_food(),
            snake_samples: default_snake_samples(),
            exhaustive_len: default_exhaustive_len(),
        }
    }
}

/// Spawn materialize animation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpawnConfig {
    /// Animation length when the server declares none.
    #[serde(default = "default_spawn_duration_ms")]
    pub default_duration_ms: f64,
    /// Upper bound of the uniform start jitter for already-spawned entities.
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: f64,
    /// Progress above which the name label shows.
    #[serde(default = "default_name_reveal")]
    pub name_reveal: f32,
    /// Progress above which power effects show.
    #[serde(default = "default_effect_reveal")]
    pub effect_reveal: f32,
}

fn default_spawn_duration_ms() -> f64 {
    700.0
}

fn default_jitter_ms() -> f64 {
    450.0
}

fn default_name_reveal() -> f32 {
    0.65
}

fn default_effect_reveal() -> f32 {
    0.35
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_spawn_duration_ms(),
            jitter_ms: default_jitter_ms(),
            name_reveal: default_name_reveal(),
            effect_reveal: default_effect_reveal(),
        }
    }
}

/// Detail-level hysteresis.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetailConfig {
    /// Visible segment count that forces low detail.
    #[serde(default = "default_enter_segments")]
    pub enter_segments: usize,
    /// Visible segment count below which load-based low detail clears.
    #[serde(default = "default_exit_segments")]
    pub exit_segments: usize,
    /// Visible snake count that forces low detail.
    #[serde(default = "default_enter_snakes")]
    pub enter_snakes: usize,
    /// Visible snake count below which load-based low detail clears.
    #[serde(default = "default_exit_snakes")]
    pub exit_snakes: usize,
    /// Measured FPS below which low detail engages.
    #[serde(default = "default_enter_fps")]
    pub enter_fps: u32,
    /// Measured FPS above which fps-based low detail clears.
    #[serde(default = "default_exit_fps")]
    pub exit_fps: u32,
    /// FPS sampling window length.
    #[serde(default = "default_fps_window_ms")]
    pub fps_window_ms: f64,
}

fn default_enter_segments() -> usize {
    900
}

fn default_exit_segments() -> usize {
    650
}

fn default_enter_snakes() -> usize {
    12
}

fn default_exit_snakes() -> usize {
    9
}

fn default_enter_fps() -> u32 {
    45
}

fn default_exit_fps() -> u32 {
    55
}

fn default_fps_window_ms() -> f64 {
    1000.0
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            enter_segments: default_enter_segments(),
            exit_segments: default_exit_segments(),
            enter_snakes: default_enter_snakes(),
            exit_snakes: default_exit_snakes(),
            enter_fps: default_enter_fps(),
            exit_fps: default_exit_fps(),
            fps_window_ms: default_fps_window_ms(),
        }
    }
}

/// Snake path reduction and arena easing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeometryConfig {
    /// Point budget per snake body at normal detail.
    #[serde(default = "default_path_budget")]
    pub path_budget: usize,
    /// Point budget per snake body at low detail.
    #[serde(default = "default_path_budget_low")]
    pub path_budget_low: usize,
    /// Arena bound smoothing while the boundary is shrinking.
    #[serde(default = "default_arena_smoothing_shrinking")]
    pub arena_smoothing_shrinking: f32,
    /// Arena bound smoothing otherwise.
    #[serde(default = "default_arena_smoothing")]
    pub arena_smoothing: f32,
}

fn default_path_budget() -> usize {
    48
}

fn default_path_budget_low() -> usize {
    24
}

fn default_arena_smoothing_shrinking() -> f32 {
    0.18
}

fn default_arena_smoothing() -> f32 {
    0.12
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            path_budget: default_path_budget(),
            path_budget_low: default_path_budget_low(),
            arena_smoothing_shrinking: default_arena_smoothing_shrinking(),
            arena_smoothing: default_arena_smoothing(),
        }
    }
}

/// Outbound rate limits protecting the transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Minimum gap between intent (move) messages.
    #[serde(default = "default_move_interval_ms")]
    pub move_interval_ms: f64,
    /// Liveness ping cadence.
    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: f64,
}

fn default_move_interval_ms() -> f64 {
    100.0
}

fn default_ping_interval_ms() -> f64 {
    1000.0
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            move_interval_ms: default_move_interval_ms(),
            ping_interval_ms: default_ping_interval_ms(),
        }
    }
}
