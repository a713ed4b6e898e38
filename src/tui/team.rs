use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::warn;

use crate::config::ThemeConfig;
use crate::formatting::{format_points_per_game, format_shooting_percent, format_time_on_ice};
use crate::store::PlayerStore;
use crate::team::TeamStore;
use crate::types::Player;

use super::theme;

/// Team tab: the user's roster with multi-select removal.
///
/// Unlike the browse tab this view talks to the team service directly; the
/// roster is small and removal is awaited inline, one player at a time.
pub struct TeamView {
    roster: Vec<Player>,
    selected: Vec<i64>,
    cursor: usize,
    pub error: Option<String>,
}

impl TeamView {
    pub fn new() -> Self {
        TeamView {
            roster: Vec::new(),
            selected: Vec::new(),
            cursor: 0,
            error: None,
        }
    }

    /// Reload membership and roster stats from the store.
    pub async fn refresh(
        &mut self,
        store: &dyn PlayerStore,
        team: &TeamStore,
        season_id: i64,
    ) {
        self.error = None;
        if let Err(e) = team.load().await {
            warn!(error = %e, "Failed to refresh team membership");
            self.error = Some(format!("Failed to load team: {}", e));
            return;
        }
        let mut ids: Vec<i64> = team.members().await.into_iter().collect();
        ids.sort_unstable();
        match store.fetch_players(&ids, season_id).await {
            Ok(players) => {
                self.roster = players;
                let roster = &self.roster;
                self.selected
                    .retain(|id| roster.iter().any(|p| p.player_id == *id));
                self.cursor = self.cursor.min(self.roster.len().saturating_sub(1));
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch roster stats");
                self.error = Some(format!("Failed to load roster: {}", e));
            }
        }
    }

    /// Remove every selected player, awaiting each delete in order. Each
    /// removal is confirmed independently; a mid-batch failure keeps the
    /// players that were already removed removed.
    pub async fn remove_selected(&mut self, team: &TeamStore) {
        let ids = std::mem::take(&mut self.selected);
        for id in ids {
            match team.remove_player(id).await {
                Ok(true) => {}
                Ok(false) => {
                    self.error = Some(format!("Player {} was not removed", id));
                }
                Err(e) => {
                    self.error = Some(format!("Failed to remove player {}: {}", id, e));
                }
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, config: &ThemeConfig) {
        if self.roster.is_empty() {
            let empty = Paragraph::new("No players on your team yet.")
                .style(theme::hint_style())
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        let hint = if self.selected.is_empty() {
            "space select • d remove from team • r refresh".to_string()
        } else {
            format!("{} selected • d remove from team", self.selected.len())
        };
        f.render_widget(Paragraph::new(hint).style(theme::hint_style()), chunks[0]);

        let header = Row::new(vec![
            "", "Name", "Pos", "GP", "G", "A", "Pts", "Pts/G", "Shots", "Shot%", "TOI", "SHG",
            "GWG",
        ])
        .style(theme::header_style());

        let body = self.roster.iter().map(|player| {
            let s = &player.stats;
            let checked = self.selected.contains(&player.player_id);
            let row = Row::new(vec![
                Cell::from(if checked { "[x]" } else { "[ ]" }),
                Cell::from(player.name.clone()),
                Cell::from(player.position.clone()),
                Cell::from(s.games_played.to_string()),
                Cell::from(s.goals.to_string()),
                Cell::from(s.assists.to_string()),
                Cell::from(s.points.to_string()),
                Cell::from(format_points_per_game(s.points_per_game)),
                Cell::from(s.shots.to_string()),
                Cell::from(format_shooting_percent(s.shooting_percent)),
                Cell::from(format_time_on_ice(s.time_on_ice_per_game)),
                Cell::from(s.short_handed_goals.to_string()),
                Cell::from(s.game_winning_goals.to_string()),
            ]);
            if checked {
                row.style(theme::checked_row_style(config))
            } else {
                row
            }
        });

        let widths = [
            Constraint::Length(3),
            Constraint::Length(22),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ];

        let table = Table::new(body, widths)
            .header(header)
            .row_highlight_style(theme::selection_style(config))
            .highlight_symbol(theme::LIST_HIGHLIGHT_SYMBOL);

        let mut table_state = TableState::default();
        table_state.select(Some(self.cursor));
        f.render_stateful_widget(table, chunks[1], &mut table_state);
    }

    /// Keys that do not need store access. Returns true when the caller
    /// should run the async removal flow.
    pub fn handle_key(&mut self, key: KeyEvent) -> TeamKeyResult {
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                TeamKeyResult::Handled
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.roster.len() {
                    self.cursor += 1;
                }
                TeamKeyResult::Handled
            }
            KeyCode::Char(' ') => {
                if let Some(player) = self.roster.get(self.cursor) {
                    let id = player.player_id;
                    if let Some(pos) = self.selected.iter().position(|x| *x == id) {
                        self.selected.remove(pos);
                    } else {
                        self.selected.push(id);
                    }
                }
                TeamKeyResult::Handled
            }
            KeyCode::Char('d') if !self.selected.is_empty() => TeamKeyResult::RemoveSelected,
            KeyCode::Char('r') => TeamKeyResult::Refresh,
            _ => TeamKeyResult::NotHandled,
        }
    }
}

/// What the event loop should do after a team-view key.
#[derive(Debug, PartialEq, Eq)]
pub enum TeamKeyResult {
    Handled,
    NotHandled,
    /// Run the sequential removal flow, then refresh
    RemoveSelected,
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_store::MockStore;
    use crate::fixtures;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    async fn loaded_view(mock: MockStore) -> (TeamView, Arc<TeamStore>, Arc<dyn PlayerStore>) {
        let store: Arc<dyn PlayerStore> = Arc::new(mock);
        let team = Arc::new(TeamStore::new(store.clone()));
        let mut view = TeamView::new();
        view.refresh(&*store, &team, 20232024).await;
        (view, team, store)
    }

    #[tokio::test]
    async fn test_refresh_loads_roster() {
        let mock = MockStore::new(fixtures::create_mock_players(10)).with_team(vec![2, 5]);
        let (view, _, _) = loaded_view(mock).await;
        assert_eq!(view.roster.len(), 2);
        assert!(view.error.is_none());
    }

    #[tokio::test]
    async fn test_space_toggles_selection() {
        let mock = MockStore::new(fixtures::create_mock_players(10)).with_team(vec![2, 5]);
        let (mut view, _, _) = loaded_view(mock).await;

        view.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(view.selected.len(), 1);
        view.handle_key(key(KeyCode::Char(' ')));
        assert!(view.selected.is_empty());
    }

    #[tokio::test]
    async fn test_remove_selected_is_success_gated_per_player() {
        let mock = MockStore::new(fixtures::create_mock_players(10))
            .with_team(vec![2, 5])
            .with_failing_delete(5);
        let (mut view, team, store) = loaded_view(mock).await;

        view.selected = vec![2, 5];
        view.remove_selected(&team).await;
        view.refresh(&*store, &team, 20232024).await;

        // 2 came off the team, the failed delete left 5 in place
        assert!(!team.contains(2).await);
        assert!(team.contains(5).await);
    }

    #[tokio::test]
    async fn test_remove_without_selection_is_not_offered() {
        let mock = MockStore::new(fixtures::create_mock_players(10)).with_team(vec![2]);
        let (mut view, _, _) = loaded_view(mock).await;
        assert_eq!(
            view.handle_key(key(KeyCode::Char('d'))),
            TeamKeyResult::NotHandled
        );
    }
}
