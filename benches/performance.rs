use criterion::{black_box, criterion_group, criterion_main, Criterion};

use puckdraft::browse::state::{BrowseState, SortColumn};
use puckdraft::browse::visible_rows;
use puckdraft::modifiers::Modifiers;
use puckdraft::projection::projected_value;
use puckdraft::types::{Player, PlayerStats};

/// Create a realistic browse window for benchmarking
fn create_sample_players(count: usize) -> Vec<Player> {
    let positions = ["C", "L", "R", "D"];
    (1..=count as i64)
        .map(|id| {
            let points = 600 - id;
            let goals = points / 2;
            let games_played = 60 + (id % 23);
            let shots = goals * 6 + 40;
            Player {
                player_id: id,
                name: format!("Player {}", id),
                position: positions[(id as usize - 1) % positions.len()].to_string(),
                stats: PlayerStats {
                    games_played,
                    goals,
                    assists: points - goals,
                    points,
                    points_per_game: points as f64 / games_played as f64,
                    shots,
                    shooting_percent: goals as f64 / shots as f64,
                    time_on_ice_per_game: 900.0 + ((id * 13) % 400) as f64,
                    short_handed_goals: id % 3,
                    game_winning_goals: id % 5,
                },
            }
        })
        .collect()
}

fn bench_projected_value(c: &mut Criterion) {
    let players = create_sample_players(500);
    let modifiers = Modifiers::default();

    c.bench_function("projected_value_500_players", |b| {
        b.iter(|| {
            for player in &players {
                black_box(projected_value(&player.stats, &modifiers, true));
            }
        })
    });
}

fn bench_visible_rows_points_sort(c: &mut Criterion) {
    let mut state = BrowseState::default();
    state.players = create_sample_players(500);
    state.total_players = 500;
    let modifiers = Modifiers::default();

    c.bench_function("visible_rows_points_500_players", |b| {
        b.iter(|| black_box(visible_rows(&state, &modifiers, true)))
    });
}

fn bench_visible_rows_projected_sort(c: &mut Criterion) {
    let mut state = BrowseState::default();
    state.players = create_sample_players(500);
    state.total_players = 500;
    state.sort_column = SortColumn::Projected;
    let mut modifiers = Modifiers::default();
    modifiers.goal.value = 2.0;

    c.bench_function("visible_rows_projected_500_players", |b| {
        b.iter(|| black_box(visible_rows(&state, &modifiers, true)))
    });
}

criterion_group!(
    benches,
    bench_projected_value,
    bench_visible_rows_points_sort,
    bench_visible_rows_projected_sort
);
criterion_main!(benches);
