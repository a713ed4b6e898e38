use std::collections::HashSet;

use crate::positions::PositionFilter;
use crate::types::{Player, PlayerSeason, DEFAULT_SEASON_ID};

/// Rows per rendered page
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Size of the browse window fetched from the store in one request
pub const DEFAULT_FETCH_LIMIT: usize = 500;

/// Column the browse table is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Points,
    Projected,
}

impl SortColumn {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Points => "Pts",
            Self::Projected => "Proj",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Season-history drill-down for a single player
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailState {
    pub player_id: i64,
    pub loading: bool,
    pub seasons: Vec<PlayerSeason>,
    pub error: Option<String>,
}

/// State owned by the player-list engine — single source of truth
///
/// Everything derived (the rendered row set) is recomputed from this via
/// [`visible_rows`]; nothing derived is stored.
///
/// [`visible_rows`]: super::rows::visible_rows
#[derive(Debug, Clone)]
pub struct BrowseState {
    /// Raw browse window fetched from the store, descending points order
    pub players: Vec<Player>,
    /// Unfiltered total row count reported by the store
    pub total_players: usize,

    /// 1-based page index into the filtered/sorted row set
    pub current_page: usize,
    pub page_size: usize,
    pub fetch_limit: usize,
    pub season_id: i64,

    /// Checked players, in selection order. Bulk remote effects are issued
    /// in this order.
    pub selected: Vec<i64>,
    /// Session-local exclusions, cleared by UnhideAll
    pub hidden: HashSet<i64>,
    /// Team membership overlay; members never appear in the browse list
    pub team: HashSet<i64>,

    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub position_filter: PositionFilter,

    /// Loading and error are mutually exclusive; an error is terminal until
    /// the next refresh.
    pub loading: bool,
    pub error: Option<String>,
    /// Non-fatal notice about the last bulk mutation (partial failures);
    /// cleared by the next bulk action or refresh
    pub notice: Option<String>,
    /// Token of the most recently issued page fetch. Responses carrying an
    /// older token are dropped.
    pub request_seq: u64,

    pub detail: Option<DetailState>,
}

impl Default for BrowseState {
    fn default() -> Self {
        BrowseState {
            players: Vec::new(),
            total_players: 0,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            fetch_limit: DEFAULT_FETCH_LIMIT,
            season_id: DEFAULT_SEASON_ID,
            selected: Vec::new(),
            hidden: HashSet::new(),
            team: HashSet::new(),
            sort_column: SortColumn::default(),
            sort_direction: SortDirection::default(),
            position_filter: PositionFilter::default(),
            loading: false,
            error: None,
            notice: None,
            request_seq: 0,
            detail: None,
        }
    }
}

impl BrowseState {
    pub fn new(season_id: i64, page_size: usize, fetch_limit: usize) -> Self {
        BrowseState {
            season_id,
            page_size: page_size.max(1),
            fetch_limit: fetch_limit.max(1),
            ..Default::default()
        }
    }

    /// Total page count, never less than one page
    pub fn total_pages(&self) -> usize {
        self.total_players.div_ceil(self.page_size).max(1)
    }

    pub fn is_selected(&self, player_id: i64) -> bool {
        self.selected.contains(&player_id)
    }

    /// Whether a player can currently appear in a rendered row
    pub fn is_renderable(&self, player_id: i64) -> bool {
        !self.hidden.contains(&player_id)
            && !self.team.contains(&player_id)
            && self.players.iter().any(|p| p.player_id == player_id)
    }

    /// Drop selected ids that are no longer renderable, preserving order.
    /// Keeps the invariant: selection is a subset of renderable ids.
    pub fn prune_selection(&mut self) {
        let hidden = &self.hidden;
        let team = &self.team;
        let players = &self.players;
        self.selected.retain(|id| {
            !hidden.contains(id)
                && !team.contains(id)
                && players.iter().any(|p| p.player_id == *id)
        });
    }

    /// Clamp the current page into `[1, total_pages]`
    pub fn clamp_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }
}
