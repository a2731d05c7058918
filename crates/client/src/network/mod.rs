//! Inbound decode guard and outbound throttling.
//!
//! The persistent connection itself belongs to the transport collaborator;
//! this module only shapes what crosses it. Outbound throttles protect the
//! transport, they are not a correctness requirement of the core.

use protocol::{ClientMessage, ServerMessage};
use tracing::warn;

/// Decode one inbound message, discarding malformed or unknown input.
pub fn decode_message(text: &str) -> Option<ServerMessage> {
    match protocol::decode(text) {
        Ok(message) => Some(message),
        Err(error) => {
            warn!(%error, "discarding inbound message");
            None
        }
    }
}

/// Minimum-interval gate.
#[derive(Debug)]
pub struct RateLimiter {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl RateLimiter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// True when enough time has passed; records the send time when it has.
    pub fn allow(&mut self, now_ms: f64) -> bool {
        let due = self
            .last_ms
            .is_none_or(|last| now_ms - last >= self.interval_ms);
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }
}

/// Builds rate-limited outbound messages and tracks round-trip latency.
#[derive(Debug)]
pub struct Outbound {
    move_limiter: RateLimiter,
    ping_limiter: RateLimiter,
    last_ping_sent_ms: Option<f64>,
    latency_ms: Option<f64>,
}

impl Outbound {
    pub fn new(move_interval_ms: f64, ping_interval_ms: f64) -> Self {
        Self {
            move_limiter: RateLimiter::new(move_interval_ms),
            ping_limiter: RateLimiter::new(ping_interval_ms),
            last_ping_sent_ms: None,
            latency_ms: None,
        }
    }

    /// Intent update, no more than once per interval.
    pub fn movement(
        &mut self,
        player_id: &str,
        direction: f64,
        accelerating: bool,
        now_ms: f64,
    ) -> Option<ClientMessage> {
        if !self.move_limiter.allow(now_ms) {
            return None;
        }
        Some(ClientMessage::Move {
            player_id: player_id.to_string(),
            direction,
            accelerating,
        })
    }

    /// Liveness ping on the fixed cadence, echoing the last measured ping.
    pub fn ping(&mut self, player_id: &str, now_ms: f64) -> Option<ClientMessage> {
        if !self.ping_limiter.allow(now_ms) {
            return None;
        }
        self.last_ping_sent_ms = Some(now_ms);
        Some(ClientMessage::Ping {
            player_id: player_id.to_string(),
            ping: self.latency_ms.unwrap_or(0.0),
        })
    }

    /// Latency = now - last ping send time.
    pub fn observe_pong(&mut self, now_ms: f64) {
        if let Some(sent) = self.last_ping_sent_ms {
            self.latency_ms = Some(now_ms - sent);
        }
    }

    pub fn latency_ms(&self) -> Option<f64> {
        self.latency_ms
    }
}
