/// Shared types used across the application
///
/// This module contains the data model shared between the library
/// (browse engine, commands, tui) and the binary (main.rs).

/// Games in a full NHL regular season, used to normalize projections
pub const FULL_SEASON_GAMES: f64 = 82.0;

/// Season browsed when the config does not name one
pub const DEFAULT_SEASON_ID: i64 = 20232024;

/// Per-season counting and rate stats for one player.
///
/// Read-only once fetched; the projection calculator and the display
/// layer both consume this without mutating it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerStats {
    pub games_played: i64,
    pub goals: i64,
    pub assists: i64,
    pub points: i64,
    pub points_per_game: f64,
    pub shots: i64,
    /// Fraction in 0..=1, not a percentage
    pub shooting_percent: f64,
    /// Seconds per game
    pub time_on_ice_per_game: f64,
    pub short_handed_goals: i64,
    pub game_winning_goals: i64,
}

/// One player with their stats for the browsed season.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub player_id: i64,
    pub name: String,
    /// Position code: forward subtypes ("C", "L", "R") or "D" for defense
    pub position: String,
    pub stats: PlayerStats,
}

/// One season row in a player's multi-season history.
///
/// `season_id` is the 8-digit start/end year encoding, e.g. 20232024.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSeason {
    pub season_id: i64,
    pub stats: PlayerStats,
}

/// Result of a page fetch: the rows plus the unfiltered total count,
/// which drives pagination math.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPage {
    pub players: Vec<Player>,
    pub total_count: usize,
}
