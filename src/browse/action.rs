use crate::positions::PositionFilter;
use crate::types::{PlayerPage, PlayerSeason};

use super::state::SortColumn;

/// Actions driving the browse engine.
///
/// All state changes happen through these. Actions are dispatched from user
/// input (the TUI views) and from effects (async store completions).
#[derive(Debug, Clone)]
pub enum Action {
    // User intent
    ToggleSelect(i64),
    BulkHide,
    UnhideAll,
    BulkAddToTeam,
    ChangePage(i64),
    SetSortColumn(SortColumn),
    SetPositionFilter(PositionFilter),
    RefreshPlayers,
    RefreshTeam,
    OpenPlayerDetail(i64),
    ClosePlayerDetail,

    // Store completions (from effects)
    PlayersLoaded(u64, Result<PlayerPage, String>),
    TeamLoaded(Result<Vec<i64>, String>),
    HistoryLoaded(i64, Result<Vec<PlayerSeason>, String>),
    /// Resolution of a bulk add: `requested` is every originally selected
    /// id in selection order, `added` the subset the remote store confirmed.
    BulkAddCompleted {
        requested: Vec<i64>,
        added: Vec<i64>,
    },
}
