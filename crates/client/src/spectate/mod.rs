//! Spectator target selection with liveness tracking.

use protocol::Snapshot;
use tracing::debug;

/// Chooses and cycles the entity a spectator is watching.
///
/// Candidates are leaderboard entries whose backing entity is alive, in
/// leaderboard order. A manual selection is honored until it dies or
/// disappears, then rotation resumes.
#[derive(Debug, Default)]
pub struct SpectatorTargetSelector {
    target: Option<String>,
}

impl SpectatorTargetSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Manual override from a leaderboard row click.
    pub fn set_target(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(target = %name, "spectator target selected");
        self.target = Some(name);
    }

    pub fn clear(&mut self) {
        self.target = None;
    }

    /// Advance to the next alive candidate if the current target is missing
    /// or no longer alive.
    pub fn resync(&mut self, snapshot: &Snapshot) {
        let valid = self
            .target
            .as_deref()
            .and_then(|name| snapshot.entity_by_name(name))
            .is_some_and(|entity| entity.alive);
        if !valid {
            self.advance(snapshot);
        }
    }

    /// Round-robin step through the alive-candidate list.
    pub fn advance(&mut self, snapshot: &Snapshot) {
        let alive: Vec<&str> = snapshot
            .leaderboard
            .iter()
            .filter(|entry| {
                snapshot
                    .entity_by_name(&entry.name)
                    .is_some_and(|entity| entity.alive)
            })
            .map(|entry| entry.name.as_str())
            .collect();

        let next = if alive.is_empty() {
            None
        } else {
            match self
                .target
                .as_deref()
                .and_then(|name| alive.iter().position(|candidate| *candidate == name))
            {
                Some(index) => Some(alive[(index + 1) % alive.len()].to_string()),
                None => Some(alive[0].to_string()),
            }
        };

        if next != self.target {
            debug!(from = ?self.target, to = ?next, "spectator target advanced");
            self.target = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{Entity, LeaderboardEntry};

    fn arena_with(names: &[(&str, bool)]) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for (i, (name, alive)) in names.iter().enumerate() {
            snapshot.bots.insert(
                format!("b{i}"),
                Entity {
                    name: name.to_string(),
                    alive: *alive,
                    ..Entity::default()
                },
            );
            snapshot.leaderboard.push(LeaderboardEntry {
                name: name.to_string(),
                score: 100 - i as u32,
            });
        }
        snapshot
    }

    #[test]
    fn test_round_robin_returns_to_start() {
        let snapshot = arena_with(&[("a", true), ("b", true), ("c", true)]);
        let mut selector = SpectatorTargetSelector::new();
        selector.set_target("a");
        for _ in 0..3 {
            selector.advance(&snapshot);
        }
        assert_eq!(selector.target(), Some("a"));
    }

    #[test]
    fn test_dead_candidates_skipped() {
        let snapshot = arena_with(&[("a", true), ("b", false), ("c", true)]);
        let mut selector = SpectatorTargetSelector::new();
        selector.set_target("a");
        selector.advance(&snapshot);
        assert_eq!(selector.target(), Some("c"));
    }

    #[test]
    fn test_resync_keeps_valid_target() {
        let snapshot = arena_with(&[("a", true), ("b", true)]);
        let mut selector = SpectatorTargetSelector::new();
        selector.set_target("b");
        selector.resync(&snapshot);
        assert_eq!(selector.target(), Some("b"));
    }

    #[test]
    fn test_resync_replaces_dead_target() {
        let snapshot = arena_with(&[("a", true), ("b", false)]);
        let mut selector = SpectatorTargetSelector::new();
        selector.set_target("b");
        selector.resync(&snapshot);
        assert_eq!(selector.target(), Some("a"));
    }

    #[test]
    fn test_no_alive_candidates_clears_target() {
        let snapshot = arena_with(&[("a", false)]);
        let mut selector = SpectatorTargetSelector::new();
        selector.set_target("a");
        selector.resync(&snapshot);
        assert_eq!(selector.target(), None);
    }

    #[test]
    fn test_unknown_target_jumps_to_first() {
        let snapshot = arena_with(&[("a", true), ("b", true)]);
        let mut selector = SpectatorTargetSelector::new();
        selector.set_target("gone");
        selector.resync(&snapshot);
        assert_eq!(selector.target(), Some("a"));
    }
}
