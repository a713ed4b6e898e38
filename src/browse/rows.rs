use crate::modifiers::Modifiers;
use crate::projection::projected_value;
use crate::types::Player;

use super::state::{BrowseState, SortColumn, SortDirection};

/// One renderable row: the player plus the derived values the table shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    pub player: Player,
    pub projected: i64,
    pub selected: bool,
}

/// Compute the rows to render from the raw window.
///
/// The pipeline order is fixed: membership filter (hidden and team ids are
/// both subtracted), position filter, sort, paginate. Changing a modifier
/// or team membership only reruns this function; it never refetches.
pub fn visible_rows(state: &BrowseState, modifiers: &Modifiers, active: bool) -> Vec<PlayerRow> {
    let mut rows: Vec<PlayerRow> = state
        .players
        .iter()
        .filter(|p| !state.hidden.contains(&p.player_id) && !state.team.contains(&p.player_id))
        .filter(|p| state.position_filter.matches(&p.position))
        .map(|p| PlayerRow {
            projected: projected_value(&p.stats, modifiers, active),
            selected: state.is_selected(p.player_id),
            player: p.clone(),
        })
        .collect();

    sort_rows(&mut rows, state.sort_column, state.sort_direction);
    paginate(rows, state.current_page, state.page_size)
}

/// Sort in place. The comparator is total (stat key, then player id), so
/// flipping the direction reverses the order exactly.
fn sort_rows(rows: &mut [PlayerRow], column: SortColumn, direction: SortDirection) {
    rows.sort_unstable_by(|a, b| {
        let ord = match column {
            SortColumn::Points => a.player.stats.points.cmp(&b.player.stats.points),
            SortColumn::Projected => a.projected.cmp(&b.projected),
        }
        .then_with(|| a.player.player_id.cmp(&b.player.player_id));

        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn paginate(rows: Vec<PlayerRow>, current_page: usize, page_size: usize) -> Vec<PlayerRow> {
    let start = current_page.saturating_sub(1) * page_size;
    rows.into_iter().skip(start).take(page_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::positions::PositionFilter;

    fn state_with_players(n: usize) -> BrowseState {
        let mut state = BrowseState::default();
        state.players = fixtures::create_mock_players(n);
        state.total_players = n;
        state
    }

    #[test]
    fn test_hidden_players_never_render() {
        let mut state = state_with_players(20);
        state.hidden.insert(3);
        state.hidden.insert(7);

        let rows = visible_rows(&state, &Modifiers::default(), true);
        assert!(rows.iter().all(|r| r.player.player_id != 3));
        assert!(rows.iter().all(|r| r.player.player_id != 7));
    }

    #[test]
    fn test_team_members_never_render() {
        let mut state = state_with_players(20);
        state.team.insert(1);

        let rows = visible_rows(&state, &Modifiers::default(), true);
        assert!(rows.iter().all(|r| r.player.player_id != 1));
    }

    #[test]
    fn test_position_filter_defense_only_yields_d() {
        let mut state = state_with_players(30);
        state.position_filter = PositionFilter::Defense;

        let rows = visible_rows(&state, &Modifiers::default(), true);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.player.position == "D"));
    }

    #[test]
    fn test_position_filter_forwards_excludes_d() {
        let mut state = state_with_players(30);
        state.position_filter = PositionFilter::Forwards;

        let rows = visible_rows(&state, &Modifiers::default(), true);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.player.position != "D"));
    }

    #[test]
    fn test_sort_direction_flip_is_exact_reversal() {
        let mut state = state_with_players(40);
        state.page_size = 40;

        state.sort_direction = SortDirection::Descending;
        let descending = visible_rows(&state, &Modifiers::default(), true);

        state.sort_direction = SortDirection::Ascending;
        let mut ascending = visible_rows(&state, &Modifiers::default(), true);
        ascending.reverse();

        let ids = |rows: &[PlayerRow]| rows.iter().map(|r| r.player.player_id).collect::<Vec<_>>();
        assert_eq!(ids(&descending), ids(&ascending));
    }

    #[test]
    fn test_sort_by_projected_uses_modifier_state() {
        let mut state = state_with_players(10);
        state.page_size = 10;
        state.sort_column = SortColumn::Projected;

        let mut modifiers = Modifiers::default();
        modifiers.goal.value = 5.0;

        let rows = visible_rows(&state, &modifiers, true);
        for pair in rows.windows(2) {
            assert!(pair[0].projected >= pair[1].projected);
        }
    }

    #[test]
    fn test_inactive_modifiers_project_zero_rows() {
        let state = state_with_players(5);
        let rows = visible_rows(&state, &Modifiers::default(), false);
        assert!(rows.iter().all(|r| r.projected == 0));
    }

    #[test]
    fn test_pagination_slices_fixed_pages() {
        // 45 players at page size 15 means exactly 3 pages; with default
        // descending points sort the third page holds the bottom 15.
        let mut state = state_with_players(45);
        assert_eq!(state.total_pages(), 3);

        // Fixture points fall with the id, so the default sort keeps the
        // players in id order and page 3 is exactly players 31..=45.
        state.current_page = 3;
        let rows = visible_rows(&state, &Modifiers::default(), true);
        let ids: Vec<i64> = rows.iter().map(|r| r.player.player_id).collect();
        assert_eq!(ids, (31..=45).collect::<Vec<i64>>());
    }

    #[test]
    fn test_last_page_may_be_short() {
        let mut state = state_with_players(20);
        state.current_page = 2;
        let rows = visible_rows(&state, &Modifiers::default(), true);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_selection_is_marked_on_rows() {
        let mut state = state_with_players(5);
        state.selected = vec![2];
        let rows = visible_rows(&state, &Modifiers::default(), true);
        for row in rows {
            assert_eq!(row.selected, row.player.player_id == 2);
        }
    }
}
