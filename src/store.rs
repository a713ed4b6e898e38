/// Trait for the remote player/stats/team data store, abstracting over the
/// real Postgres-backed client and mock implementations
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use thiserror::Error;
use tracing::warn;

use crate::types::{Player, PlayerPage, PlayerSeason, PlayerStats};

/// Error returned by data-store operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Trait for player data providers, implemented by both PgStore and MockStore
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Get one window of players with stats for a season, ordered by
    /// descending points. `total_count` is the unfiltered row count.
    async fn fetch_page(
        &self,
        offset: i64,
        limit: i64,
        season_id: i64,
    ) -> Result<PlayerPage, StoreError>;

    /// Get stats rows for a specific set of players in one season
    async fn fetch_players(
        &self,
        ids: &[i64],
        season_id: i64,
    ) -> Result<Vec<Player>, StoreError>;

    /// Get every season row for one player, ordered by ascending season
    async fn fetch_season_history(
        &self,
        player_id: i64,
    ) -> Result<Vec<PlayerSeason>, StoreError>;

    /// Get the IDs of all players on the user's team
    async fn fetch_team_ids(&self) -> Result<Vec<i64>, StoreError>;

    /// Add a player to the user's team. Returns whether the remote store
    /// confirmed the insert.
    async fn insert_team_member(&self, player_id: i64) -> Result<bool, StoreError>;

    /// Remove a player from the user's team. Returns whether a row was
    /// actually deleted.
    async fn delete_team_member(&self, player_id: i64) -> Result<bool, StoreError>;
}

/// PostgreSQL implementation of the player store.
///
/// Expects the `players`, `player_stats` and `user_teams` tables with
/// BIGINT ids and DOUBLE PRECISION rate columns.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const STAT_COLUMNS: &str = "ps.games_played, ps.goals, ps.assists, ps.points, \
     ps.points_per_game, ps.shots, ps.shooting_percent, ps.time_on_ice_per_game, \
     ps.short_handed_goals, ps.game_winning_goals";

fn stats_from_row(row: &sqlx::postgres::PgRow) -> PlayerStats {
    PlayerStats {
        games_played: row.get("games_played"),
        goals: row.get("goals"),
        assists: row.get("assists"),
        points: row.get("points"),
        points_per_game: row.get("points_per_game"),
        shots: row.get("shots"),
        shooting_percent: row.get("shooting_percent"),
        time_on_ice_per_game: row.get("time_on_ice_per_game"),
        short_handed_goals: row.get("short_handed_goals"),
        game_winning_goals: row.get("game_winning_goals"),
    }
}

fn player_from_row(row: &sqlx::postgres::PgRow) -> Player {
    Player {
        player_id: row.get("player_id"),
        name: row.get("name"),
        position: row.get("position"),
        stats: stats_from_row(row),
    }
}

#[async_trait]
impl PlayerStore for PgStore {
    async fn fetch_page(
        &self,
        offset: i64,
        limit: i64,
        season_id: i64,
    ) -> Result<PlayerPage, StoreError> {
        let sql = format!(
            "SELECT ps.player_id, p.name, p.position, {STAT_COLUMNS} \
             FROM player_stats ps \
             JOIN players p ON p.player_id = ps.player_id \
             WHERE ps.season_id = $1 \
             ORDER BY ps.points DESC, ps.player_id \
             OFFSET $2 LIMIT $3"
        );
        let rows = sqlx::query(&sql)
            .bind(season_id)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, season_id, "Failed to fetch player page");
                StoreError::from(e)
            })?;

        let total: i64 =
            sqlx::query("SELECT COUNT(*) AS total FROM player_stats WHERE season_id = $1")
                .bind(season_id)
                .fetch_one(&self.pool)
                .await
                .map_err(StoreError::from)?
                .get("total");

        Ok(PlayerPage {
            players: rows.iter().map(player_from_row).collect(),
            total_count: total as usize,
        })
    }

    async fn fetch_players(
        &self,
        ids: &[i64],
        season_id: i64,
    ) -> Result<Vec<Player>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT ps.player_id, p.name, p.position, {STAT_COLUMNS} \
             FROM player_stats ps \
             JOIN players p ON p.player_id = ps.player_id \
             WHERE ps.player_id = ANY($1) AND ps.season_id = $2 \
             ORDER BY ps.points DESC, ps.player_id"
        );
        let rows = sqlx::query(&sql)
            .bind(ids)
            .bind(season_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch players by id");
                StoreError::from(e)
            })?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    async fn fetch_season_history(
        &self,
        player_id: i64,
    ) -> Result<Vec<PlayerSeason>, StoreError> {
        let sql = format!(
            "SELECT ps.season_id, {STAT_COLUMNS} \
             FROM player_stats ps \
             WHERE ps.player_id = $1 \
             ORDER BY ps.season_id"
        );
        let rows = sqlx::query(&sql)
            .bind(player_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id, "Failed to fetch season history");
                StoreError::from(e)
            })?;

        Ok(rows
            .iter()
            .map(|row| PlayerSeason {
                season_id: row.get("season_id"),
                stats: stats_from_row(row),
            })
            .collect())
    }

    async fn fetch_team_ids(&self) -> Result<Vec<i64>, StoreError> {
        let rows = sqlx::query("SELECT player_id FROM user_teams ORDER BY player_id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch team ids");
                StoreError::from(e)
            })?;

        Ok(rows.iter().map(|row| row.get("player_id")).collect())
    }

    async fn insert_team_member(&self, player_id: i64) -> Result<bool, StoreError> {
        let result =
            sqlx::query("INSERT INTO user_teams (player_id) VALUES ($1) ON CONFLICT DO NOTHING")
                .bind(player_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, player_id, "Failed to insert team member");
                    StoreError::from(e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_team_member(&self, player_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM user_teams WHERE player_id = $1")
            .bind(player_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id, "Failed to delete team member");
                StoreError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
