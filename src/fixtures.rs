//! Deterministic sample data for tests, the mock store and dev mode.

use crate::types::{Player, PlayerSeason, PlayerStats};

const NAMES: [&str; 20] = [
    "Connor Macklin",
    "Auston Mathers",
    "Leon Draisler",
    "Nathan MacKenna",
    "David Pastrik",
    "Nikita Kucherin",
    "Cale Makarov",
    "Quinn Hugson",
    "Jack Eichman",
    "Mitch Marnell",
    "Brad Marchetti",
    "Sidney Crosman",
    "Erik Karlsberg",
    "Roman Josephs",
    "Adam Foxton",
    "Matthew Tkachuck",
    "Brayden Pointe",
    "Kirill Kaprizal",
    "Jason Robertsen",
    "Victor Hedmark",
];

const POSITIONS: [&str; 4] = ["C", "L", "R", "D"];

/// Stats for one synthetic player-season. Points fall strictly as the seed
/// rises, so a list built in seed order is already in descending points
/// order with no ties.
pub fn create_mock_stats(seed: i64) -> PlayerStats {
    let points = 600 - seed;
    let goals = points / 2;
    let assists = points - goals;
    let games_played = 60 + (seed % 23);
    let shots = goals * 6 + 40;
    PlayerStats {
        games_played,
        goals,
        assists,
        points,
        points_per_game: points as f64 / games_played as f64,
        shots,
        shooting_percent: goals as f64 / shots as f64,
        time_on_ice_per_game: 900.0 + ((seed * 13) % 400) as f64,
        short_handed_goals: seed % 3,
        game_winning_goals: seed % 5,
    }
}

/// Build `count` players with ids 1..=count, descending points.
pub fn create_mock_players(count: usize) -> Vec<Player> {
    (1..=count as i64)
        .map(|id| {
            let idx = (id - 1) as usize;
            let base = NAMES[idx % NAMES.len()];
            let cycle = idx / NAMES.len();
            let name = if cycle == 0 {
                base.to_string()
            } else {
                format!("{} {}", base, cycle + 1)
            };
            Player {
                player_id: id,
                name,
                position: POSITIONS[idx % POSITIONS.len()].to_string(),
                stats: create_mock_stats(id),
            }
        })
        .collect()
}

/// Three seasons of history for one player, ascending season order.
pub fn create_mock_history(player_id: i64) -> Vec<PlayerSeason> {
    [20212022i64, 20222023, 20232024]
        .iter()
        .enumerate()
        .map(|(i, &season_id)| PlayerSeason {
            season_id,
            stats: create_mock_stats(player_id + (i as i64) * 7),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players_have_unique_ids_and_descending_points() {
        let players = create_mock_players(50);
        assert_eq!(players.len(), 50);
        for pair in players.windows(2) {
            assert!(pair[0].player_id < pair[1].player_id);
            assert!(pair[0].stats.points > pair[1].stats.points);
        }
    }

    #[test]
    fn test_names_stay_unique_past_one_cycle() {
        let players = create_mock_players(45);
        let mut names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 45);
    }

    #[test]
    fn test_history_is_ascending_by_season() {
        let history = create_mock_history(7);
        assert_eq!(history.len(), 3);
        for pair in history.windows(2) {
            assert!(pair[0].season_id < pair[1].season_id);
        }
    }
}
