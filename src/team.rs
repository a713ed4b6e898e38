use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::store::{PlayerStore, StoreError};

/// The user's team membership, kept in sync with the remote store.
///
/// Local state is only updated after the remote operation confirms, so a
/// failed insert or delete leaves the set exactly as it was. There are no
/// all-or-nothing semantics for bulk callers: each player is confirmed
/// independently, and a partial failure leaves the confirmed subset.
pub struct TeamStore {
    store: Arc<dyn PlayerStore>,
    members: RwLock<HashSet<i64>>,
}

impl TeamStore {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        TeamStore {
            store,
            members: RwLock::new(HashSet::new()),
        }
    }

    /// Replace the local set with the remote team membership.
    pub async fn load(&self) -> Result<(), StoreError> {
        let ids = self.store.fetch_team_ids().await?;
        let mut members = self.members.write().await;
        members.clear();
        members.extend(ids);
        debug!(count = members.len(), "Loaded team membership");
        Ok(())
    }

    /// Snapshot of the current member set.
    pub async fn members(&self) -> HashSet<i64> {
        self.members.read().await.clone()
    }

    pub async fn contains(&self, player_id: i64) -> bool {
        self.members.read().await.contains(&player_id)
    }

    /// Add a player to the team. The local set is extended only when the
    /// remote insert confirms; the returned bool is that confirmation.
    pub async fn add_player(&self, player_id: i64) -> Result<bool, StoreError> {
        let confirmed = self.store.insert_team_member(player_id).await.map_err(|e| {
            warn!(player_id, error = %e, "Failed to add player to team");
            e
        })?;
        if confirmed {
            self.members.write().await.insert(player_id);
        } else {
            warn!(player_id, "Remote store rejected team insert");
        }
        Ok(confirmed)
    }

    /// Remove a player from the team, success-gated like [`add_player`].
    ///
    /// [`add_player`]: TeamStore::add_player
    pub async fn remove_player(&self, player_id: i64) -> Result<bool, StoreError> {
        let confirmed = self.store.delete_team_member(player_id).await.map_err(|e| {
            warn!(player_id, error = %e, "Failed to remove player from team");
            e
        })?;
        if confirmed {
            self.members.write().await.remove(&player_id);
        } else {
            warn!(player_id, "Remote store rejected team delete");
        }
        Ok(confirmed)
    }
}
