//! Inbound/outbound message definitions.
//!
//! Messages are JSON objects tagged by a `type` field, exchanged over a
//! message-oriented connection owned by the transport collaborator.

use serde::{Deserialize, Serialize};

use crate::ProtocolError;
use crate::snapshot::Snapshot;

/// Server -> client messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Identity assignment, consumed once at join.
    PlayerId {
        player_id: String,
        #[serde(default)]
        assigned_name: Option<String>,
    },
    /// A full world snapshot, taken verbatim as the new current state.
    GameState(Snapshot),
    /// Surfaced to the user by the UI collaborator; never retried.
    Error { message: String },
    /// Round-trip latency sample.
    Pong,
}

/// Client -> server messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Sent once per session start/restart.
    Join { name: String, color: String },
    /// Intent update; the session rate-limits these to one per 100 ms.
    Move {
        player_id: String,
        /// Heading in radians.
        direction: f64,
        accelerating: bool,
    },
    /// Liveness ping on a fixed cadence, echoing the last measured ping.
    Ping { player_id: String, ping: f64 },
}

/// Decode one inbound message. Unknown `type` tags and wrong shapes
/// surface as `ProtocolError::Malformed`; callers discard and move on.
pub fn decode(text: &str) -> Result<ServerMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode one outbound message.
pub fn encode(message: &ClientMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_game_state() {
        let text = r#"{
            "type": "game_state",
            "players": {"p1": {"name": "dana", "alive": true, "snake": [{"x": 1.0, "y": 2.0}]}},
            "bots": {},
            "food": [],
            "power_food": [],
            "leaderboard": [{"name": "dana", "score": 12}]
        }"#;
        match decode(text).unwrap() {
            ServerMessage::GameState(snapshot) => {
                assert_eq!(snapshot.players.len(), 1);
                assert_eq!(snapshot.leaderboard[0].score, 12);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_decode_player_id_without_name() {
        match decode(r#"{"type": "player_id", "player_id": "abc"}"#).unwrap() {
            ServerMessage::PlayerId {
                player_id,
                assigned_name,
            } => {
                assert_eq!(player_id, "abc");
                assert!(assigned_name.is_none());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"type": "mystery"}"#).is_err());
    }

    #[test]
    fn test_encode_move() {
        let text = encode(&ClientMessage::Move {
            player_id: "p1".to_string(),
            direction: 1.5,
            accelerating: true,
        })
        .unwrap();
        assert!(text.contains(r#""type":"move""#));
        assert!(text.contains(r#""accelerating":true"#));
    }
}
