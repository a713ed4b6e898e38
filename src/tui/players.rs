use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::browse::{visible_rows, Action, BrowseState, PlayerRow, SortColumn};
use crate::config::ThemeConfig;
use crate::formatting::{
    format_points_per_game, format_season, format_shooting_percent, format_time_on_ice,
};
use crate::modifiers::ModifierStore;

use super::theme;

/// Browse tab: the paginated player table plus the season-history modal.
///
/// The view owns only its cursor; everything else is read from the engine
/// state and recomputed per frame.
pub struct PlayersView {
    cursor: usize,
}

impl PlayersView {
    pub fn new() -> Self {
        PlayersView { cursor: 0 }
    }

    fn rows(&self, state: &BrowseState, modifiers: &ModifierStore) -> Vec<PlayerRow> {
        visible_rows(state, modifiers.modifiers(), modifiers.is_active())
    }

    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        state: &BrowseState,
        modifiers: &ModifierStore,
        config: &ThemeConfig,
    ) {
        if state.loading {
            let loading = Paragraph::new("Loading players...")
                .style(theme::hint_style())
                .alignment(Alignment::Center);
            f.render_widget(loading, area);
            return;
        }
        if let Some(error) = &state.error {
            let msg = Paragraph::new(error.as_str())
                .style(theme::error_style())
                .alignment(Alignment::Center);
            f.render_widget(msg, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Action hint
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.render_action_hint(f, chunks[0], state);

        let rows = self.rows(state, modifiers);
        self.cursor = self.cursor.min(rows.len().saturating_sub(1));
        self.render_table(f, chunks[1], &rows, config);
        self.render_footer(f, chunks[2], state);

        if state.detail.is_some() {
            self.render_detail_modal(f, area, state);
        }
    }

    fn render_action_hint(&self, f: &mut Frame, area: Rect, state: &BrowseState) {
        // Mirrors the selection-dependent menu: bulk actions only make
        // sense with a selection, unhide only with hidden players.
        let hint = if !state.selected.is_empty() {
            format!(
                "{} selected • h hide • t add to team",
                state.selected.len()
            )
        } else if !state.hidden.is_empty() {
            format!("{} hidden • u unhide all", state.hidden.len())
        } else {
            "space select • enter details • f filter • s/p sort • ←/→ page".to_string()
        };
        f.render_widget(Paragraph::new(hint).style(theme::hint_style()), area);
    }

    fn render_table(&self, f: &mut Frame, area: Rect, rows: &[PlayerRow], config: &ThemeConfig) {
        let header = Row::new(vec![
            "", "Name", "Proj", "Pos", "GP", "G", "A", "Pts", "Pts/G", "Shots", "Shot%", "TOI",
            "SHG", "GWG",
        ])
        .style(theme::header_style());

        let body = rows.iter().map(|row| {
            let s = &row.player.stats;
            let cells = vec![
                Cell::from(if row.selected { "[x]" } else { "[ ]" }),
                Cell::from(row.player.name.clone()),
                Cell::from(row.projected.to_string()),
                Cell::from(row.player.position.clone()),
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
            ];
            let table_row = Row::new(cells);
            if row.selected {
                table_row.style(theme::checked_row_style(config))
            } else {
                table_row
            }
        });

        let widths = [
            Constraint::Length(3),
            Constraint::Length(22),
            Constraint::Length(5),
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
        table_state.select(if rows.is_empty() { None } else { Some(self.cursor) });
        f.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect, state: &BrowseState) {
        let footer = format!(
            "page {}/{} • {} players • {} • sort {} {}",
            state.current_page,
            state.total_pages(),
            state.total_players,
            state.position_filter.label(),
            state.sort_column.label(),
            match state.sort_direction {
                crate::browse::SortDirection::Ascending => "↑",
                crate::browse::SortDirection::Descending => "↓",
            },
        );
        f.render_widget(Paragraph::new(footer).style(theme::hint_style()), area);
    }

    fn render_detail_modal(&self, f: &mut Frame, area: Rect, state: &BrowseState) {
        let Some(detail) = &state.detail else {
            return;
        };
        let modal = centered_rect(area, 70, 60);
        f.render_widget(Clear, modal);

        let title = state
            .players
            .iter()
            .find(|p| p.player_id == detail.player_id)
            .map(|p| format!("{} ({})", p.name, crate::positions::position_name(&p.position)))
            .unwrap_or_else(|| format!("Player {}", detail.player_id));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title));
        let inner = block.inner(modal);
        f.render_widget(block, modal);

        if detail.loading {
            f.render_widget(
                Paragraph::new("Loading seasons...").style(theme::hint_style()),
                inner,
            );
            return;
        }
        if let Some(error) = &detail.error {
            f.render_widget(
                Paragraph::new(error.as_str()).style(theme::error_style()),
                inner,
            );
            return;
        }

        let header = Row::new(vec![
            "Season", "GP", "G", "A", "Pts", "Pts/G", "Shots", "Shot%", "TOI", "SHG", "GWG",
        ])
        .style(theme::header_style());
        let body = detail.seasons.iter().map(|season| {
            let s = &season.stats;
            Row::new(vec![
                Cell::from(format_season(season.season_id)),
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
            ])
        });
        let widths = [
            Constraint::Length(6),
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
        f.render_widget(Table::new(body, widths).header(header), inner);
    }

    /// Translate a key event into engine actions. Cursor movement is view
    /// state and produces no actions.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        state: &BrowseState,
        modifiers: &ModifierStore,
    ) -> Vec<Action> {
        // The detail modal swallows everything except close keys
        if state.detail.is_some() {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => vec![Action::ClosePlayerDetail],
                _ => Vec::new(),
            };
        }

        let rows = self.rows(state, modifiers);
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down => {
                if self.cursor + 1 < rows.len() {
                    self.cursor += 1;
                }
                Vec::new()
            }
            KeyCode::Char(' ') => match rows.get(self.cursor) {
                Some(row) => vec![Action::ToggleSelect(row.player.player_id)],
                None => Vec::new(),
            },
            KeyCode::Enter => match rows.get(self.cursor) {
                Some(row) => vec![Action::OpenPlayerDetail(row.player.player_id)],
                None => Vec::new(),
            },
            KeyCode::Left => {
                self.cursor = 0;
                vec![Action::ChangePage(-1)]
            }
            KeyCode::Right => {
                self.cursor = 0;
                vec![Action::ChangePage(1)]
            }
            KeyCode::Char('h') => vec![Action::BulkHide],
            KeyCode::Char('u') => vec![Action::UnhideAll],
            KeyCode::Char('t') => vec![Action::BulkAddToTeam],
            KeyCode::Char('f') => {
                vec![Action::SetPositionFilter(state.position_filter.next())]
            }
            KeyCode::Char('s') => vec![Action::SetSortColumn(SortColumn::Points)],
            KeyCode::Char('p') => vec![Action::SetSortColumn(SortColumn::Projected)],
            KeyCode::Char('r') => vec![Action::RefreshPlayers],
            _ => Vec::new(),
        }
    }
}

/// Centered sub-rectangle, sized as a percentage of the parent.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crossterm::event::KeyModifiers;

    fn loaded_state() -> BrowseState {
        let mut state = BrowseState::default();
        state.players = fixtures::create_mock_players(20);
        state.total_players = 20;
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_space_selects_cursor_row() {
        let mut view = PlayersView::new();
        let state = loaded_state();
        let modifiers = ModifierStore::new();

        let actions = view.handle_key(key(KeyCode::Char(' ')), &state, &modifiers);
        // Cursor starts on the top row, which is player 1 (highest points)
        assert!(matches!(actions.as_slice(), [Action::ToggleSelect(1)]));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut view = PlayersView::new();
        let state = loaded_state();
        let modifiers = ModifierStore::new();

        view.handle_key(key(KeyCode::Up), &state, &modifiers);
        assert_eq!(view.cursor, 0);
        for _ in 0..40 {
            view.handle_key(key(KeyCode::Down), &state, &modifiers);
        }
        // Page size is 15, so the cursor cannot leave the rendered page
        assert_eq!(view.cursor, 14);
    }

    #[test]
    fn test_page_keys_emit_clamped_page_changes() {
        let mut view = PlayersView::new();
        let state = loaded_state();
        let modifiers = ModifierStore::new();

        let actions = view.handle_key(key(KeyCode::Right), &state, &modifiers);
        assert!(matches!(actions.as_slice(), [Action::ChangePage(1)]));
        let actions = view.handle_key(key(KeyCode::Left), &state, &modifiers);
        assert!(matches!(actions.as_slice(), [Action::ChangePage(-1)]));
    }

    #[test]
    fn test_detail_modal_swallows_keys() {
        let mut view = PlayersView::new();
        let mut state = loaded_state();
        state.detail = Some(Default::default());
        let modifiers = ModifierStore::new();

        let actions = view.handle_key(key(KeyCode::Char('h')), &state, &modifiers);
        assert!(actions.is_empty());
        let actions = view.handle_key(key(KeyCode::Esc), &state, &modifiers);
        assert!(matches!(actions.as_slice(), [Action::ClosePlayerDetail]));
    }
}
