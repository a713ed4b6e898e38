use std::sync::Arc;

use crate::cache;
use crate::store::PlayerStore;
use crate::team::TeamStore;

use super::action::Action;
use super::effect::Effect;

/// Effect handler for data-store operations
///
/// Each method returns an `Effect::Async` that performs the store call and
/// resolves to the matching completion action. The handler owns shared
/// handles to the store and the team membership service; the reducer never
/// sees either.
pub struct DataEffects {
    store: Arc<dyn PlayerStore>,
    team: Arc<TeamStore>,
}

impl DataEffects {
    pub fn new(store: Arc<dyn PlayerStore>, team: Arc<TeamStore>) -> Self {
        Self { store, team }
    }

    /// Fetch the browse window, bypassing the page cache so a refresh
    /// always observes current store state.
    pub fn fetch_players(&self, token: u64, offset: i64, limit: i64, season_id: i64) -> Effect {
        let store = self.store.clone();
        Effect::Async(Box::pin(async move {
            let result = cache::refresh_page(&*store, offset, limit, season_id).await;
            Action::PlayersLoaded(token, result.map_err(|e| e.to_string()))
        }))
    }

    /// Reload team membership and hand the ids to the reducer overlay
    pub fn fetch_team(&self) -> Effect {
        let team = self.team.clone();
        Effect::Async(Box::pin(async move {
            let result = match team.load().await {
                Ok(()) => Ok(team.members().await.into_iter().collect()),
                Err(e) => Err(e.to_string()),
            };
            Action::TeamLoaded(result)
        }))
    }

    /// Fetch one player's season history (cached; history is stable data)
    pub fn fetch_history(&self, player_id: i64) -> Effect {
        let store = self.store.clone();
        Effect::Async(Box::pin(async move {
            let result = cache::fetch_season_history_cached(&*store, player_id).await;
            Action::HistoryLoaded(player_id, result.map_err(|e| e.to_string()))
        }))
    }

    /// Add the given players to the team, awaiting each insert in order.
    ///
    /// Strictly sequential so remote effect order matches selection order;
    /// a failure mid-batch leaves earlier confirmations in place. Failures
    /// are logged by the team store and reflected in `added`.
    pub fn add_selected_to_team(&self, ids: Vec<i64>) -> Effect {
        let team = self.team.clone();
        Effect::Async(Box::pin(async move {
            let mut added = Vec::new();
            for id in &ids {
                if let Ok(true) = team.add_player(*id).await {
                    added.push(*id);
                }
            }
            Action::BulkAddCompleted {
                requested: ids,
                added,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_store::MockStore;
    use crate::fixtures;

    fn create_test_effects() -> DataEffects {
        let store: Arc<dyn PlayerStore> =
            Arc::new(MockStore::new(fixtures::create_mock_players(10)));
        let team = Arc::new(TeamStore::new(store.clone()));
        DataEffects::new(store, team)
    }

    #[test]
    fn test_fetch_players_returns_async_effect() {
        let effects = create_test_effects();
        let effect = effects.fetch_players(1, 0, 500, 20232024);
        assert!(matches!(effect, Effect::Async(_)));
    }

    #[test]
    fn test_fetch_team_returns_async_effect() {
        let effects = create_test_effects();
        assert!(matches!(effects.fetch_team(), Effect::Async(_)));
    }

    #[test]
    fn test_fetch_history_returns_async_effect() {
        let effects = create_test_effects();
        assert!(matches!(effects.fetch_history(1), Effect::Async(_)));
    }

    #[tokio::test]
    async fn test_add_selected_resolves_to_completion_action() {
        let effects = create_test_effects();
        let effect = effects.add_selected_to_team(vec![1, 2]);
        let Effect::Async(future) = effect else {
            panic!("Expected Async effect");
        };
        match future.await {
            Action::BulkAddCompleted { requested, added } => {
                assert_eq!(requested, vec![1, 2]);
                assert_eq!(added, vec![1, 2]);
            }
            other => panic!("Expected BulkAddCompleted, got {:?}", other),
        }
    }
}
