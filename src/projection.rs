use crate::modifiers::{Modifier, Modifiers};
use crate::types::{PlayerStats, FULL_SEASON_GAMES};

/// Projected fantasy value for one player-season, normalized to a full
/// 82-game season.
///
/// Rounding order is part of the contract: each countable category is
/// rounded after applying its modifier, the four rounded contributions are
/// summed, the sum is prorated, and the result is rounded once more.
/// A player with zero games played is treated as a full season
/// (no proration).
pub fn projected_value(stats: &PlayerStats, modifiers: &Modifiers, active: bool) -> i64 {
    let games_prorated = if stats.games_played > 0 {
        FULL_SEASON_GAMES / stats.games_played as f64
    } else {
        1.0
    };

    let contribution = |raw: i64, modifier: &Modifier| -> f64 {
        if active && modifier.enabled {
            (raw as f64 * modifier.value).round()
        } else {
            0.0
        }
    };

    let sum = contribution(stats.goals, &modifiers.goal)
        + contribution(stats.assists, &modifiers.assist)
        + contribution(stats.short_handed_goals, &modifiers.short_handed_goal)
        + contribution(stats.game_winning_goals, &modifiers.game_winning_goal);

    (sum * games_prorated).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(games_played: i64, goals: i64, assists: i64, shg: i64, gwg: i64) -> PlayerStats {
        PlayerStats {
            games_played,
            goals,
            assists,
            short_handed_goals: shg,
            game_winning_goals: gwg,
            ..Default::default()
        }
    }

    #[test]
    fn test_inactive_always_projects_zero() {
        let mut modifiers = Modifiers::default();
        modifiers.goal.value = 99.0;
        modifiers.assist.value = 17.5;
        let s = stats(41, 30, 40, 3, 7);
        assert_eq!(projected_value(&s, &modifiers, false), 0);
    }

    #[test]
    fn test_disabled_modifier_contributes_nothing() {
        let mut modifiers = Modifiers::default();
        modifiers.goal.value = 2.0;
        modifiers.assist.enabled = false;
        modifiers.short_handed_goal.enabled = false;
        modifiers.game_winning_goal.enabled = false;

        // goal contribution = round(10 * 2) = 20, everything else 0,
        // prorated = 82 / 41 = 2 -> round(20 * 2) = 40
        let s = stats(41, 10, 5, 0, 0);
        assert_eq!(projected_value(&s, &modifiers, true), 40);
    }

    #[test]
    fn test_zero_games_played_skips_proration() {
        let modifiers = Modifiers::default();
        let s = stats(0, 10, 5, 1, 2);
        assert_eq!(projected_value(&s, &modifiers, true), 18);
    }

    #[test]
    fn test_full_season_is_not_scaled() {
        let modifiers = Modifiers::default();
        let s = stats(82, 40, 50, 2, 8);
        assert_eq!(projected_value(&s, &modifiers, true), 100);
    }

    #[test]
    fn test_per_category_rounding_happens_before_proration() {
        let mut modifiers = Modifiers::default();
        modifiers.goal.value = 0.5;
        modifiers.assist.enabled = false;
        modifiers.short_handed_goal.enabled = false;
        modifiers.game_winning_goal.enabled = false;

        // round(3 * 0.5) = 2 first, then 2 * (82/41) = 4. Rounding after
        // proration would give 3.
        let s = stats(41, 3, 0, 0, 0);
        assert_eq!(projected_value(&s, &modifiers, true), 4);
    }

    #[test]
    fn test_final_rounding_applies_once_to_the_prorated_sum() {
        let modifiers = Modifiers::default();
        // sum = 2, prorated = 82/54 ~= 1.5185 -> round(3.037) = 3
        let s = stats(54, 1, 1, 0, 0);
        assert_eq!(projected_value(&s, &modifiers, true), 3);
    }

    #[test]
    fn test_all_categories_sum() {
        let mut modifiers = Modifiers::default();
        modifiers.goal.value = 2.0;
        modifiers.assist.value = 1.0;
        modifiers.short_handed_goal.value = 3.0;
        modifiers.game_winning_goal.value = 1.5;

        // round(10*2) + round(20*1) + round(2*3) + round(3*1.5)
        //   = 20 + 20 + 6 + 5 = 51, no proration at 82 games
        let s = stats(82, 10, 20, 2, 3);
        assert_eq!(projected_value(&s, &modifiers, true), 51);
    }
}
