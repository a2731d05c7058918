//! Shared protocol crate for the vortex client.
//!
//! This crate contains:
//! - World snapshot data model (players, bots, food, leaderboard, arena)
//! - Inbound/outbound message definitions and JSON codecs
//! - Shared types (Power, ArenaPhase, Position)

mod error;
pub mod messages;
pub mod snapshot;

pub use error::ProtocolError;
pub use messages::{ClientMessage, ServerMessage, decode, encode};
pub use snapshot::{
    Arena, ArenaPhase, Entity, FoodItem, LeaderboardEntry, Power, SnakeSegment, Snapshot,
};

/// Represents a 2D position using glam's Vec2.
pub type Position = glam::Vec2;
