use anyhow::{Context, Result};

use crate::cache;
use crate::formatting::{
    format_points_per_game, format_season, format_shooting_percent, format_time_on_ice,
};
use crate::store::PlayerStore;
use crate::types::PlayerSeason;

const SEASON_COL_WIDTH: usize = 6;
const STAT_COL_WIDTH: usize = 4;
const WIDE_COL_WIDTH: usize = 6;

/// Print every season on record for one player, oldest first.
pub async fn run(store: &dyn PlayerStore, player_id: i64) -> Result<()> {
    let seasons = cache::fetch_season_history_cached(store, player_id)
        .await
        .with_context(|| format!("Failed to fetch season history for player {}", player_id))?;

    if seasons.is_empty() {
        println!("No seasons on record for player {}", player_id);
        return Ok(());
    }

    print!("{}", format_history_table(&seasons));
    Ok(())
}

pub fn format_history_table(seasons: &[PlayerSeason]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<season$} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>wide$} {:>wide$} {:>wide$} {:>wide$} {:>stat$} {:>stat$}\n",
        "Season",
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
        season = SEASON_COL_WIDTH,
        stat = STAT_COL_WIDTH,
        wide = WIDE_COL_WIDTH,
    ));

    for season in seasons {
        let s = &season.stats;
        output.push_str(&format!(
            "{:<season$} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>wide$} {:>wide$} {:>wide$} {:>wide$} {:>stat$} {:>stat$}\n",
            format_season(season.season_id),
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
            season = SEASON_COL_WIDTH,
            stat = STAT_COL_WIDTH,
            wide = WIDE_COL_WIDTH,
        ));
    }

    output
}
