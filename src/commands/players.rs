use anyhow::{Context, Result};

use crate::browse::{visible_rows, BrowseState, PlayerRow, SortColumn};
use crate::cache;
use crate::config::Config;
use crate::formatting::{format_points_per_game, format_shooting_percent, format_time_on_ice};
use crate::modifiers::Modifiers;
use crate::positions::PositionFilter;
use crate::store::PlayerStore;

use super::pad_name;

// Layout Constants
/// Width of the player name column
const NAME_COL_WIDTH: usize = 24;

/// Width of short numeric columns (GP, G, A, Pts, SHG, GWG, Pos)
const STAT_COL_WIDTH: usize = 4;

/// Width of long numeric columns (Shots, Shot %, TOI, Pts/G, Proj)
const WIDE_COL_WIDTH: usize = 6;

/// Print one page of browsable players with their projected values.
///
/// Team members are excluded from the listing, like in the interactive
/// browse view. Projections use neutral modifiers.
pub async fn run(
    store: &dyn PlayerStore,
    config: &Config,
    page: usize,
    position: PositionFilter,
    sort: SortColumn,
    season_id: i64,
) -> Result<()> {
    let window = cache::fetch_page_cached(store, 0, config.fetch_limit as i64, season_id)
        .await
        .context("Failed to fetch players")?;
    let team_ids = store
        .fetch_team_ids()
        .await
        .context("Failed to fetch team membership")?;

    let mut state = BrowseState::new(season_id, config.page_size, config.fetch_limit);
    state.players = window.players;
    state.total_players = window.total_count;
    state.team = team_ids.into_iter().collect();
    state.position_filter = position;
    state.sort_column = sort;
    state.current_page = page.max(1);
    state.clamp_page();

    let modifiers = Modifiers::default();
    let rows = visible_rows(&state, &modifiers, true);

    print!("{}", format_players_table(&rows));
    println!(
        "\nPage {} of {} ({} players, {})",
        state.current_page,
        state.total_pages(),
        state.total_players,
        position.label()
    );
    Ok(())
}

pub fn format_players_table(rows: &[PlayerRow]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {:>wide$} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>wide$} {:>wide$} {:>wide$} {:>wide$} {:>stat$} {:>stat$}\n",
        pad_name("Name", NAME_COL_WIDTH),
        "Proj",
        "Pos",
        "GP",
        "G",
        "A",
        "Pts",
        "Pts/G",
        "Shots",
        "Shot%",
        "TOI",
        "SHG",
        "GWG",
        stat = STAT_COL_WIDTH,
        wide = WIDE_COL_WIDTH,
    ));

    for row in rows {
        let s = &row.player.stats;
        output.push_str(&format!(
            "{} {:>wide$} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>wide$} {:>wide$} {:>wide$} {:>wide$} {:>stat$} {:>stat$}\n",
            pad_name(&row.player.name, NAME_COL_WIDTH),
            row.projected,
            row.player.position,
            s.games_played,
            s.goals,
            s.assists,
            s.points,
            format_points_per_game(s.points_per_game),
            s.shots,
            format_shooting_percent(s.shooting_percent),
            format_time_on_ice(s.time_on_ice_per_game),
            s.short_handed_goals,
            s.game_winning_goals,
            stat = STAT_COL_WIDTH,
            wide = WIDE_COL_WIDTH,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::projection::projected_value;

    fn sample_rows() -> Vec<PlayerRow> {
        let modifiers = Modifiers::default();
        fixtures::create_mock_players(3)
            .into_iter()
            .map(|player| PlayerRow {
                projected: projected_value(&player.stats, &modifiers, true),
                selected: false,
                player,
            })
            .collect()
    }

    #[test]
    fn test_table_has_header_and_one_line_per_row() {
        let rows = sample_rows();
        let table = format_players_table(&rows);
        assert_eq!(table.lines().count(), 4);
        assert!(table.starts_with(pad_name("Name", NAME_COL_WIDTH).as_str()));
    }

    #[test]
    fn test_table_contains_player_names_and_positions() {
        let rows = sample_rows();
        let table = format_players_table(&rows);
        for row in &rows {
            assert!(table.contains(&row.player.name));
        }
    }

    #[test]
    fn test_empty_rows_yield_header_only() {
        let table = format_players_table(&[]);
        assert_eq!(table.lines().count(), 1);
    }
}
