/// Mock player store for development and testing
use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::fixtures;
use crate::store::{PlayerStore, StoreError};
use crate::types::{Player, PlayerPage, PlayerSeason};

/// Store that serves fixture data instead of hitting Postgres.
///
/// Failure injection is per-operation: a failing insert/delete reports an
/// unconfirmed mutation (`Ok(false)`), a failing page fetch reports a
/// database error, matching how the real store misbehaves.
pub struct MockStore {
    players: Vec<Player>,
    team: Mutex<HashSet<i64>>,
    fail_inserts: HashSet<i64>,
    fail_deletes: HashSet<i64>,
    fail_page_fetch: bool,
}

impl MockStore {
    pub fn new(players: Vec<Player>) -> Self {
        info!(count = players.len(), "Creating MockStore");
        Self {
            players,
            team: Mutex::new(HashSet::new()),
            fail_inserts: HashSet::new(),
            fail_deletes: HashSet::new(),
            fail_page_fetch: false,
        }
    }

    /// Pre-populate the remote team membership
    pub fn with_team(self, ids: Vec<i64>) -> Self {
        self.team.lock().unwrap().extend(ids);
        self
    }

    /// Make inserts for one player come back unconfirmed
    pub fn with_failing_insert(mut self, player_id: i64) -> Self {
        self.fail_inserts.insert(player_id);
        self
    }

    /// Make deletes for one player come back unconfirmed
    pub fn with_failing_delete(mut self, player_id: i64) -> Self {
        self.fail_deletes.insert(player_id);
        self
    }

    /// Make every page fetch fail with a database error
    pub fn with_failing_page_fetch(mut self) -> Self {
        self.fail_page_fetch = true;
        self
    }
}

#[async_trait]
impl PlayerStore for MockStore {
    async fn fetch_page(
        &self,
        offset: i64,
        limit: i64,
        _season_id: i64,
    ) -> Result<PlayerPage, StoreError> {
        if self.fail_page_fetch {
            return Err(StoreError::Database("mock page fetch failure".into()));
        }
        info!(offset, limit, "MockStore: returning fixture page");
        let mut sorted = self.players.clone();
        sorted.sort_by(|a, b| {
            b.stats
                .points
                .cmp(&a.stats.points)
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        let players = sorted
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok(PlayerPage {
            players,
            total_count: self.players.len(),
        })
    }

    async fn fetch_players(
        &self,
        ids: &[i64],
        _season_id: i64,
    ) -> Result<Vec<Player>, StoreError> {
        info!(count = ids.len(), "MockStore: returning fixture players by id");
        Ok(self
            .players
            .iter()
            .filter(|p| ids.contains(&p.player_id))
            .cloned()
            .collect())
    }

    async fn fetch_season_history(
        &self,
        player_id: i64,
    ) -> Result<Vec<PlayerSeason>, StoreError> {
        info!(player_id, "MockStore: returning fixture season history");
        Ok(fixtures::create_mock_history(player_id))
    }

    async fn fetch_team_ids(&self) -> Result<Vec<i64>, StoreError> {
        let mut ids: Vec<i64> = self.team.lock().unwrap().iter().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn insert_team_member(&self, player_id: i64) -> Result<bool, StoreError> {
        if self.fail_inserts.contains(&player_id) {
            info!(player_id, "MockStore: rejecting team insert");
            return Ok(false);
        }
        Ok(self.team.lock().unwrap().insert(player_id))
    }

    async fn delete_team_member(&self, player_id: i64) -> Result<bool, StoreError> {
        if self.fail_deletes.contains(&player_id) {
            info!(player_id, "MockStore: rejecting team delete");
            return Ok(false);
        }
        Ok(self.team.lock().unwrap().remove(&player_id))
    }
}
