//! Integration tests for the browse data flow
//!
//! These drive the full loop: store -> effect -> action -> reducer ->
//! state -> derived rows, using the mock store.

use std::sync::Arc;

use crate::browse::{
    visible_rows, Action, BrowseState, DataEffects, Runtime, SortColumn, SortDirection,
};
use crate::dev::mock_store::MockStore;
use crate::fixtures;
use crate::modifiers::Modifiers;
use crate::store::PlayerStore;
use crate::team::TeamStore;

fn create_runtime(mock: MockStore) -> (Runtime, Arc<TeamStore>) {
    let store: Arc<dyn PlayerStore> = Arc::new(mock);
    let team = Arc::new(TeamStore::new(store.clone()));
    let runtime = Runtime::new(
        BrowseState::default(),
        Arc::new(DataEffects::new(store, team.clone())),
    );
    (runtime, team)
}

/// Pump the runtime until it goes idle or the predicate holds
async fn pump_until(runtime: &mut Runtime, mut done: impl FnMut(&BrowseState) -> bool) {
    let max_wait = tokio::time::Duration::from_secs(2);
    let start = tokio::time::Instant::now();
    while !done(runtime.state()) && start.elapsed() < max_wait {
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        runtime.process_actions();
    }
    assert!(done(runtime.state()), "runtime did not reach expected state");
}

#[tokio::test]
async fn test_initial_fetch_populates_window() {
    let (mut runtime, _) = create_runtime(MockStore::new(fixtures::create_mock_players(45)));

    runtime.dispatch(Action::RefreshPlayers);
    pump_until(&mut runtime, |s| !s.loading).await;

    assert_eq!(runtime.state().players.len(), 45);
    assert_eq!(runtime.state().total_players, 45);
    assert_eq!(runtime.state().total_pages(), 3);
}

#[tokio::test]
async fn test_fetch_failure_surfaces_terminal_error() {
    let mock = MockStore::new(fixtures::create_mock_players(5)).with_failing_page_fetch();
    let (mut runtime, _) = create_runtime(mock);

    runtime.dispatch(Action::RefreshPlayers);
    pump_until(&mut runtime, |s| !s.loading).await;

    assert!(runtime.state().error.is_some());
    assert!(runtime.state().players.is_empty());
}

#[tokio::test]
async fn test_hidden_players_stay_hidden_until_unhide_all() {
    let (mut runtime, _) = create_runtime(MockStore::new(fixtures::create_mock_players(20)));
    runtime.dispatch(Action::RefreshPlayers);
    pump_until(&mut runtime, |s| !s.loading).await;

    runtime.dispatch(Action::ToggleSelect(1));
    runtime.dispatch(Action::ToggleSelect(2));
    runtime.dispatch(Action::BulkHide);

    let modifiers = Modifiers::default();
    for page in 1..=2 {
        runtime.dispatch(Action::ChangePage(if page == 1 { 0 } else { 1 }));
        let rows = visible_rows(runtime.state(), &modifiers, true);
        assert!(rows.iter().all(|r| r.player.player_id != 1 && r.player.player_id != 2));
    }

    runtime.dispatch(Action::UnhideAll);
    runtime.dispatch(Action::ChangePage(-10));
    let rows = visible_rows(runtime.state(), &modifiers, true);
    assert!(rows.iter().any(|r| r.player.player_id == 1));
}

#[tokio::test]
async fn test_bulk_add_partial_failure_keeps_confirmed_subset() {
    // The second remote insert fails: the team holds only the first
    // player, but both leave the browse list.
    let mock = MockStore::new(fixtures::create_mock_players(10)).with_failing_insert(2);
    let (mut runtime, team) = create_runtime(mock);

    runtime.dispatch(Action::RefreshPlayers);
    pump_until(&mut runtime, |s| !s.loading).await;

    runtime.dispatch(Action::ToggleSelect(1));
    runtime.dispatch(Action::ToggleSelect(2));
    runtime.dispatch(Action::BulkAddToTeam);
    pump_until(&mut runtime, |s| s.hidden.contains(&1)).await;

    let state = runtime.state();
    assert!(state.team.contains(&1));
    assert!(!state.team.contains(&2));
    assert!(state.hidden.contains(&1));
    assert!(state.hidden.contains(&2));
    assert!(state.selected.is_empty());

    // The membership service agrees with the overlay
    let members = team.members().await;
    assert!(members.contains(&1));
    assert!(!members.contains(&2));
}

#[tokio::test]
async fn test_stale_page_response_is_ignored() {
    let (mut runtime, _) = create_runtime(MockStore::new(fixtures::create_mock_players(8)));

    runtime.dispatch(Action::RefreshPlayers);
    pump_until(&mut runtime, |s| !s.loading).await;
    assert_eq!(runtime.state().players.len(), 8);

    // A response from a request generation that was superseded
    let stale = crate::types::PlayerPage {
        players: fixtures::create_mock_players(1),
        total_count: 1,
    };
    runtime.dispatch(Action::PlayersLoaded(0, Ok(stale)));

    assert_eq!(runtime.state().players.len(), 8);
}

#[tokio::test]
async fn test_sort_toggle_round_trip_through_runtime() {
    let (mut runtime, _) = create_runtime(MockStore::new(fixtures::create_mock_players(30)));
    runtime.dispatch(Action::RefreshPlayers);
    pump_until(&mut runtime, |s| !s.loading).await;

    let modifiers = Modifiers::default();
    let before: Vec<i64> = visible_rows(runtime.state(), &modifiers, true)
        .iter()
        .map(|r| r.player.player_id)
        .collect();

    runtime.dispatch(Action::SetSortColumn(SortColumn::Points));
    assert_eq!(runtime.state().sort_direction, SortDirection::Ascending);

    runtime.dispatch(Action::SetSortColumn(SortColumn::Points));
    assert_eq!(runtime.state().sort_direction, SortDirection::Descending);

    let after: Vec<i64> = visible_rows(runtime.state(), &modifiers, true)
        .iter()
        .map(|r| r.player.player_id)
        .collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_detail_flow_loads_history_ascending() {
    let (mut runtime, _) = create_runtime(MockStore::new(fixtures::create_mock_players(5)));
    runtime.dispatch(Action::RefreshPlayers);
    pump_until(&mut runtime, |s| !s.loading).await;

    runtime.dispatch(Action::OpenPlayerDetail(3));
    pump_until(&mut runtime, |s| {
        s.detail.as_ref().is_some_and(|d| !d.loading)
    })
    .await;

    let detail = runtime.state().detail.as_ref().unwrap();
    assert!(detail.error.is_none());
    assert!(!detail.seasons.is_empty());
    let seasons: Vec<i64> = detail.seasons.iter().map(|s| s.season_id).collect();
    let mut sorted = seasons.clone();
    sorted.sort_unstable();
    assert_eq!(seasons, sorted);

    runtime.dispatch(Action::ClosePlayerDetail);
    assert!(runtime.state().detail.is_none());
}
