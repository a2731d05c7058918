//! HUD view model for the UI collaborator.

use protocol::Snapshot;

/// Leaderboard rows shown at most.
const LEADERBOARD_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub score: u32,
    pub is_me: bool,
}

/// Read-only scoreboard state; value-comparable so the UI layer can diff.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HudModel {
    pub score: Option<u32>,
    pub length: Option<u32>,
    pub rank: Option<usize>,
    pub leaderboard: Vec<LeaderboardRow>,
    pub connection_lost: bool,
    pub spectator_target: Option<String>,
    pub latency_ms: Option<f64>,
}

/// Build the HUD model from the current snapshot.
pub fn build_hud(
    snapshot: Option<&Snapshot>,
    player_id: Option<&str>,
    spectator_target: Option<&str>,
    connection_lost: bool,
    latency_ms: Option<f64>,
) -> HudModel {
    let mut hud = HudModel {
        connection_lost,
        spectator_target: spectator_target.map(str::to_string),
        latency_ms,
        ..HudModel::default()
    };
    let Some(snapshot) = snapshot else {
        return hud;
    };

    let me = player_id.and_then(|id| snapshot.players.get(id));
    if let Some(player) = me {
        hud.score = Some(player.score);
        hud.length = Some(player.length);
        hud.rank = snapshot.rank_of(&player.name);
    }

    let my_name = me.map(|player| player.name.as_str());
    hud.leaderboard = snapshot
        .leaderboard
        .iter()
        .take(LEADERBOARD_LIMIT)
        .enumerate()
        .map(|(index, entry)| LeaderboardRow {
            rank: index + 1,
            name: entry.name.clone(),
            score: entry.score,
            is_me: Some(entry.name.as_str()) == my_name,
        })
        .collect();

    hud
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{Entity, LeaderboardEntry};

    fn snapshot_with_player() -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.players.insert(
            "p1".to_string(),
            Entity {
                name: "dana".to_string(),
                alive: true,
                score: 42,
                length: 7,
                ..Entity::default()
            },
        );
        for (name, score) in [("ace", 90), ("dana", 42), ("bot-3", 10)] {
            snapshot.leaderboard.push(LeaderboardEntry {
                name: name.to_string(),
                score,
            });
        }
        snapshot
    }

    #[test]
    fn test_local_player_stats_and_rank() {
        let snapshot = snapshot_with_player();
        let hud = build_hud(Some(&snapshot), Some("p1"), None, false, Some(18.0));
        assert_eq!(hud.score, Some(42));
        assert_eq!(hud.length, Some(7));
        assert_eq!(hud.rank, Some(2));
        assert!(hud.leaderboard[1].is_me);
        assert!(!hud.leaderboard[0].is_me);
    }

    #[test]
    fn test_rank_none_when_absent_from_leaderboard() {
        let mut snapshot = snapshot_with_player();
        snapshot.leaderboard.retain(|entry| entry.name != "dana");
        let hud = build_hud(Some(&snapshot), Some("p1"), None, false, None);
        assert_eq!(hud.rank, None);
        assert_eq!(hud.score, Some(42));
    }

    #[test]
    fn test_leaderboard_capped_at_ten() {
        let mut snapshot = Snapshot::default();
        for i in 0..15u32 {
            snapshot.leaderboard.push(LeaderboardEntry {
                name: format!("e{i}"),
                score: 100 - i,
            });
        }
        let hud = build_hud(Some(&snapshot), None, None, false, None);
        assert_eq!(hud.leaderboard.len(), 10);
        assert_eq!(hud.leaderboard[9].rank, 10);
    }

    #[test]
    fn test_empty_before_first_snapshot() {
        let hud = build_hud(None, Some("p1"), Some("ace"), true, None);
        assert!(hud.leaderboard.is_empty());
        assert!(hud.connection_lost);
        assert_eq!(hud.spectator_target.as_deref(), Some("ace"));
    }
}
