/// Display formatting helpers shared by the CLI commands and the TUI tables.

/// Format average time on ice (seconds per game) as "M:SS".
pub fn format_time_on_ice(seconds_per_game: f64) -> String {
    let total = seconds_per_game.round().max(0.0) as i64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format an 8-digit season id as a two-year abbreviation.
///
/// The contract is fixed character slicing on the decimal string
/// (positions 2..4 and 6..8), not year arithmetic: 20232024 -> "23/24".
/// Ids that are not 8 digits long are shown as-is.
pub fn format_season(season_id: i64) -> String {
    let s = season_id.to_string();
    if s.len() != 8 {
        return s;
    }
    format!("{}/{}", &s[2..4], &s[6..8])
}

/// Format a shooting percentage stored as a fraction: 0.1234 -> "12.34".
pub fn format_shooting_percent(fraction: f64) -> String {
    format!("{:.2}", fraction * 100.0)
}

/// Format points per game with two decimals.
pub fn format_points_per_game(ppg: f64) -> String {
    format!("{:.2}", ppg)
}
