//! Latest-snapshot store.

use protocol::{Entity, Snapshot};
use tracing::trace;

/// Holds the most recent authoritative snapshot.
///
/// Snapshots are applied in arrival order with last-write-wins semantics;
/// no reordering or buffering is attempted.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: Option<Snapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot unconditionally.
    pub fn apply(&mut self, snapshot: Snapshot) {
        trace!(
            players = snapshot.players.len(),
            bots = snapshot.bots.len(),
            food = snapshot.food.len(),
            "snapshot applied"
        );
        self.current = Some(snapshot);
    }

    /// The latest snapshot, or `None` before the first message.
    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn entity_by_id(&self, id: &str) -> Option<&Entity> {
        self.current.as_ref()?.entity_by_id(id)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.current.as_ref()?.entity_by_name(name)
    }

    /// Drop all world state (session teardown/restart).
    pub fn clear(&mut self) {
        self.current = None;
    }
}
