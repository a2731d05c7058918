//! Session orchestration.
//!
//! `GameSession` owns one instance of every component and wires them
//! together per tick. All shared state lives here and is touched from two
//! callback contexts only: the render tick and the inbound message
//! callback. Those never run concurrently on a single-threaded event loop;
//! a multi-threaded embedder must serialize access.

use glam::Vec2;
use protocol::{ClientMessage, Entity, ServerMessage, Snapshot};
use tracing::{debug, info, warn};

use crate::camera::CameraController;
use crate::config::ClientConfig;
use crate::culling::ViewportCuller;
use crate::geometry::{self, ArenaEasing};
use crate::network::{self, Outbound};
use crate::perf::PerformanceAdaptiveController;
use crate::render::{self, FoodView, FrameModel, SnakeView};
use crate::snapshot::SnapshotStore;
use crate::spawn::SpawnAnimator;
use crate::spectate::SpectatorTargetSelector;
use crate::ui::{self, HudModel};

/// Upper clamp on the per-tick delta, guarding against background-tab gaps.
const FRAME_DT_MAX_MS: f64 = 100.0;

/// Final stats surfaced once when the local player dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathSummary {
    pub score: u32,
    pub length: u32,
}

/// The client session: snapshot store, camera, culling, spawn animation,
/// spectator selection, detail adaptation, and outbound throttling.
/// Created at session start, reset at restart, dropped at teardown.
pub struct GameSession {
    config: ClientConfig,
    store: SnapshotStore,
    camera: CameraController,
    culler: ViewportCuller,
    spawn: SpawnAnimator,
    spectator: SpectatorTargetSelector,
    perf: PerformanceAdaptiveController,
    arena: ArenaEasing,
    outbound: Outbound,

    viewport: Vec2,
    player_id: Option<String>,
    assigned_name: Option<String>,
    spectator_mode: bool,
    connection_lost: bool,
    last_error: Option<String>,
    death: Option<DeathSummary>,

    frame_interval_ms: f64,
    last_tick_ms: Option<f64>,
}

impl GameSession {
    pub fn new(config: ClientConfig, viewport: Vec2) -> Self {
        let spawn = SpawnAnimator::new(&config.spawn);
        Self::assemble(config, viewport, spawn)
    }

    /// Deterministic spawn jitter for tests.
    pub fn with_seed(config: ClientConfig, viewport: Vec2, seed: u64) -> Self {
        let spawn = SpawnAnimator::with_seed(&config.spawn, seed);
        Self::assemble(config, viewport, spawn)
    }

    fn assemble(config: ClientConfig, viewport: Vec2, spawn: SpawnAnimator) -> Self {
        Self {
            camera: CameraController::new(&config.camera),
            culler: ViewportCuller::new(&config.culling),
            spectator: SpectatorTargetSelector::new(),
            perf: PerformanceAdaptiveController::new(&config.detail),
            arena: ArenaEasing::new(&config.geometry),
            outbound: Outbound::new(
                config.network.move_interval_ms,
                config.network.ping_interval_ms,
            ),
            store: SnapshotStore::new(),
            spawn,
            viewport,
            player_id: None,
            assigned_name: None,
            spectator_mode: false,
            connection_lost: false,
            last_error: None,
            death: None,
            frame_interval_ms: 1000.0 / config.render.target_fps as f64,
            last_tick_ms: None,
            config,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Inbound text callback. Malformed or unknown messages are discarded.
    pub fn handle_message(&mut self, text: &str, now_ms: f64) {
        if let Some(message) = network::decode_message(text) {
            self.handle_server_message(message, now_ms);
        }
    }

    pub fn handle_server_message(&mut self, message: ServerMessage, now_ms: f64) {
        match message {
            ServerMessage::PlayerId {
                player_id,
                assigned_name,
            } => {
                info!(player_id = %player_id, "identity assigned");
                self.player_id = Some(player_id);
                self.assigned_name = assigned_name;
            }
            ServerMessage::GameState(snapshot) => {
                self.observe_local_death(&snapshot);
                self.store.apply(snapshot);
            }
            ServerMessage::Error { message } => {
                warn!(%message, "server error");
                self.last_error = Some(message);
            }
            ServerMessage::Pong => self.outbound.observe_pong(now_ms),
        }
    }

    /// Flip to spectating and capture final stats the first time the local
    /// player shows up dead.
    fn observe_local_death(&mut self, snapshot: &Snapshot) {
        if self.spectator_mode || self.death.is_some() {
            return;
        }
        let Some(player) = self.player_id.as_deref().and_then(|id| snapshot.players.get(id))
        else {
            return;
        };
        if !player.alive {
            debug!(score = player.score, "local player died, entering spectator mode");
            self.death = Some(DeathSummary {
                score: player.score,
                length: player.length,
            });
            self.spectator_mode = true;
        }
    }

    /// Start (or restart) playing. Resets per-session caches; world state
    /// stays until the next snapshot replaces it.
    pub fn join(&mut self, name: &str, color: &str) -> ClientMessage {
        self.spectator_mode = false;
        self.spectator.clear();
        self.spawn.clear();
        self.death = None;
        self.last_error = None;
        ClientMessage::Join {
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Enter spectator mode without joining (death-screen spectate button).
    pub fn spectate(&mut self) {
        self.spectator_mode = true;
    }

    /// Manual spectator selection from a leaderboard row.
    pub fn select_spectator_target(&mut self, name: &str) {
        if self.spectator_mode {
            self.spectator.set_target(name);
        }
    }

    /// Rate-limited intent update; only while playing and alive.
    pub fn movement_intent(
        &mut self,
        direction: f64,
        accelerating: bool,
        now_ms: f64,
    ) -> Option<ClientMessage> {
        let player_id = self.player_id.as_deref()?;
        let alive = self
            .store
            .current()?
            .players
            .get(player_id)
            .is_some_and(|player| player.alive);
        if !alive {
            return None;
        }
        self.outbound
            .movement(player_id, direction, accelerating, now_ms)
    }

    /// Liveness ping on its fixed cadence.
    pub fn ping(&mut self, now_ms: f64) -> Option<ClientMessage> {
        let player_id = self.player_id.clone()?;
        self.outbound.ping(&player_id, now_ms)
    }

    pub fn set_connection_lost(&mut self, lost: bool) {
        self.connection_lost = lost;
    }

    /// One render tick. Returns the scene description, or `None` when the
    /// tick fired too early or no snapshot has arrived yet.
    pub fn tick(&mut self, now_ms: f64) -> Option<FrameModel> {
        if let Some(last) = self.last_tick_ms {
            if now_ms - last < self.frame_interval_ms {
                return None;
            }
        }
        let dt_ms = self.last_tick_ms.map_or(
            self.config.camera.reference_tick_ms as f64,
            |last| (now_ms - last).min(FRAME_DT_MAX_MS),
        );
        self.last_tick_ms = Some(now_ms);

        let snapshot = self.store.current()?;

        if self.spectator_mode {
            self.spectator.resync(snapshot);
        }

        // Camera target: spectated head, else leaderboard leader, else (in
        // player mode) own head with the same fallback; hold when nothing
        // resolves.
        let target_head = if self.spectator_mode {
            self.spectator
                .target()
                .and_then(|name| snapshot.entity_by_name(name))
                .and_then(Entity::head)
                .or_else(|| leaderboard_head(snapshot))
        } else {
            self.player_id
                .as_deref()
                .and_then(|id| snapshot.players.get(id))
                .filter(|player| player.alive)
                .and_then(Entity::head)
                .or_else(|| leaderboard_head(snapshot))
        };
        if let Some(head) = target_head {
            self.camera.tick(head - self.viewport * 0.5, dt_ms);
        }

        self.culler.recompute(self.camera.position, self.viewport);

        let (visible, active) = self.culler.visible_snakes(snapshot);
        self.spawn.retain_active(&active);

        let segments: usize = visible.iter().map(|v| v.entity.snake.len()).sum();
        self.perf.observe_load(segments, visible.len());
        self.perf.on_frame(now_ms);
        let low_detail = self.perf.low_detail();

        // Low detail halves the pellet caps and the path budget.
        let divisor = if low_detail { 2 } else { 1 };
        let food_cap = self.config.culling.max_food / divisor;
        let power_cap = self.config.culling.max_power_food / divisor;
        let budget = if low_detail {
            self.config.geometry.path_budget_low
        } else {
            self.config.geometry.path_budget
        };

        let food = collect_food(self.culler.visible_food(&snapshot.food, food_cap));
        let power_food = collect_food(self.culler.visible_food(&snapshot.power_food, power_cap));

        let mut snakes = Vec::with_capacity(visible.len());
        for seen in &visible {
            let is_self = seen.is_player && self.player_id.as_deref() == Some(seen.key);
            let progress = self.spawn.progress(
                seen.key,
                is_self,
                seen.entity.spawn_time,
                seen.entity.spawn_duration,
                now_ms,
            );
            if progress <= 0.0 {
                continue;
            }

            let reduced = geometry::reduce_path(&seen.entity.snake, budget);
            let head = reduced.last().copied().unwrap_or_default();
            let neck = reduced.len().checked_sub(2).map(|i| reduced[i]);
            let label = (self.spawn.name_visible(progress) && !seen.entity.name.is_empty())
                .then(|| seen.entity.name.clone());
            let powers = if self.spawn.effects_visible(progress) {
                seen.entity.active_powers(now_ms)
            } else {
                Vec::new()
            };

            snakes.push(SnakeView {
                points: geometry::smooth_path(&reduced),
                head,
                neck,
                color: seen.entity.color.clone(),
                body_width: render::HEAD_WIDTH,
                alpha: progress,
                low_detail,
                label,
                powers,
                spawn_protected: seen.entity.spawn_protected(now_ms),
            });
        }

        let arena = self.arena.tick(snapshot.arena.as_ref(), dt_ms, now_ms);

        Some(FrameModel {
            camera: self.camera.position,
            low_detail,
            arena,
            food,
            power_food,
            snakes,
        })
    }

    /// Scoreboard state for the UI collaborator.
    pub fn hud(&self) -> HudModel {
        ui::build_hud(
            self.store.current(),
            self.player_id.as_deref(),
            self.spectator.target(),
            self.connection_lost,
            self.outbound.latency_ms(),
        )
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    pub fn assigned_name(&self) -> Option<&str> {
        self.assigned_name.as_deref()
    }

    pub fn spectator_mode(&self) -> bool {
        self.spectator_mode
    }

    pub fn death(&self) -> Option<DeathSummary> {
        self.death
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn latency_ms(&self) -> Option<f64> {
        self.outbound.latency_ms()
    }
}

fn leaderboard_head(snapshot: &Snapshot) -> Option<Vec2> {
    snapshot
        .leaderboard
        .first()
        .and_then(|entry| snapshot.entity_by_name(&entry.name))
        .and_then(Entity::head)
}

fn collect_food(items: Vec<&protocol::FoodItem>) -> Vec<FoodView> {
    items
        .into_iter()
        .map(|item| FoodView {
            position: item.pos(),
            size: item.size,
            color: item.color.clone(),
            scale: item.scale,
        })
        .collect()
}
