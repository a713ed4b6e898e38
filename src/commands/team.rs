use anyhow::{Context, Result};

use crate::config::Config;
use crate::formatting::{format_points_per_game, format_shooting_percent, format_time_on_ice};
use crate::store::PlayerStore;
use crate::types::Player;

use super::pad_name;

const NAME_COL_WIDTH: usize = 24;
const STAT_COL_WIDTH: usize = 4;
const WIDE_COL_WIDTH: usize = 6;

/// Print the user's team roster with stats for the configured season.
pub async fn run(store: &dyn PlayerStore, config: &Config) -> Result<()> {
    let ids = store
        .fetch_team_ids()
        .await
        .context("Failed to fetch team membership")?;
    if ids.is_empty() {
        println!("No players on your team yet.");
        return Ok(());
    }

    let players = store
        .fetch_players(&ids, config.season_id)
        .await
        .context("Failed to fetch team player stats")?;

    print!("{}", format_team_table(&players));
    println!("\n{} players on team", players.len());
    Ok(())
}

pub fn format_team_table(players: &[Player]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>wide$} {:>wide$} {:>wide$} {:>wide$} {:>stat$} {:>stat$}\n",
        pad_name("Name", NAME_COL_WIDTH),
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

    for player in players {
        let s = &player.stats;
        output.push_str(&format!(
            "{} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>stat$} {:>wide$} {:>wide$} {:>wide$} {:>wide$} {:>stat$} {:>stat$}\n",
            pad_name(&player.name, NAME_COL_WIDTH),
            player.position,
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
