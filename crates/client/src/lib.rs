//! Snake-arena client core.
//!
//! Turns sparse, irregular world snapshots into a temporally smooth,
//! spatially filtered, performance-adaptive scene description ready to hand
//! to a drawing backend. The transport (connection lifecycle) and the pixel
//! backend are external collaborators: inbound text arrives through
//! [`session::GameSession::handle_message`], outbound messages are returned
//! to the caller for sending, and each accepted render tick yields a
//! read-only [`render::FrameModel`].

pub mod camera;
pub mod config;
pub mod culling;
pub mod geometry;
pub mod network;
pub mod perf;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod spectate;
pub mod ui;

pub use config::ClientConfig;
pub use render::{FrameModel, Renderer};
pub use session::{DeathSummary, GameSession};
pub use ui::HudModel;
