use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::trace;

use super::action::Action;
use super::effect::Effect;
use super::effects::DataEffects;
use super::reducer::reduce;
use super::state::BrowseState;

/// Browse engine runtime - owns the state and the action/effect plumbing
///
/// Responsibilities:
/// - Dispatch actions through the pure reducer
/// - Resolve named fetch effects against [`DataEffects`]
/// - Execute async effects on a background task and feed the resulting
///   actions back through the action channel
pub struct Runtime {
    state: BrowseState,

    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    effect_tx: mpsc::UnboundedSender<Effect>,

    data_effects: Arc<DataEffects>,
}

impl Runtime {
    pub fn new(initial_state: BrowseState, data_effects: Arc<DataEffects>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (effect_tx, mut effect_rx) = mpsc::unbounded_channel();

        // Spawn the effect executor task
        let action_tx_clone = action_tx.clone();
        tokio::spawn(async move {
            Self::run_effect_executor(&mut effect_rx, action_tx_clone).await;
        });

        Self {
            state: initial_state,
            action_tx,
            action_rx,
            effect_tx,
            data_effects,
        }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    /// Run one action through the reducer and execute the returned effect.
    ///
    /// Uses mem::take to move the state through the pure reducer without
    /// cloning it.
    pub fn dispatch(&mut self, action: Action) {
        trace!(?action, "Dispatching");
        let state = std::mem::take(&mut self.state);
        let (new_state, effect) = reduce(state, action);
        self.state = new_state;
        self.execute_effect(effect);
    }

    /// Resolve named fetch effects, queue the rest for the async executor
    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::FetchPlayers {
                token,
                offset,
                limit,
                season_id,
            } => {
                let fetch = self.data_effects.fetch_players(token, offset, limit, season_id);
                let _ = self.effect_tx.send(fetch);
            }
            Effect::FetchTeam => {
                let _ = self.effect_tx.send(self.data_effects.fetch_team());
            }
            Effect::FetchHistory(player_id) => {
                let _ = self.effect_tx.send(self.data_effects.fetch_history(player_id));
            }
            Effect::AddSelectedToTeam(ids) => {
                let _ = self.effect_tx.send(self.data_effects.add_selected_to_team(ids));
            }
            Effect::Batch(effects) => {
                for e in effects {
                    self.execute_effect(e);
                }
            }
            Effect::Action(_) | Effect::Async(_) => {
                let _ = self.effect_tx.send(effect);
            }
        }
    }

    /// Drain the action queue, dispatching everything that has arrived from
    /// completed effects. Returns the number of actions processed.
    pub fn process_actions(&mut self) -> usize {
        let mut count = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            count += 1;
        }
        count
    }

    /// Sender for dispatching actions from outside the event loop
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    async fn run_effect_executor(
        effect_rx: &mut mpsc::UnboundedReceiver<Effect>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) {
        while let Some(effect) = effect_rx.recv().await {
            Self::process_effect_async(effect, &action_tx);
        }
    }

    fn process_effect_async(effect: Effect, action_tx: &mpsc::UnboundedSender<Action>) {
        match effect {
            Effect::None => {}
            Effect::Action(action) => {
                let _ = action_tx.send(action);
            }
            Effect::Batch(effects) => {
                for e in effects {
                    Self::process_effect_async(e, action_tx);
                }
            }
            Effect::Async(future) => {
                let action_tx = action_tx.clone();
                tokio::spawn(async move {
                    let action = future.await;
                    let _ = action_tx.send(action);
                });
            }
            // Named fetch effects are resolved by execute_effect() before
            // they are queued and should never reach the executor.
            Effect::FetchPlayers { .. }
            | Effect::FetchTeam
            | Effect::FetchHistory(_)
            | Effect::AddSelectedToTeam(_) => {
                tracing::warn!("Fetch effect reached async executor unresolved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_store::MockStore;
    use crate::fixtures;
    use crate::store::PlayerStore;
    use crate::team::TeamStore;

    fn create_test_runtime() -> Runtime {
        let store: Arc<dyn PlayerStore> =
            Arc::new(MockStore::new(fixtures::create_mock_players(20)));
        let team = Arc::new(TeamStore::new(store.clone()));
        Runtime::new(BrowseState::default(), Arc::new(DataEffects::new(store, team)))
    }

    #[tokio::test]
    async fn test_runtime_initial_state() {
        let runtime = create_test_runtime();
        assert_eq!(runtime.state().current_page, 1);
        assert!(runtime.state().players.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_updates_state() {
        let mut runtime = create_test_runtime();
        runtime.dispatch(Action::RefreshPlayers);
        assert!(runtime.state().loading);
        assert_eq!(runtime.state().request_seq, 1);
    }

    #[tokio::test]
    async fn test_action_queue_processing() {
        let mut runtime = create_test_runtime();

        let tx = runtime.action_sender();
        tx.send(Action::UnhideAll).unwrap();
        tx.send(Action::ChangePage(1)).unwrap();

        let count = runtime.process_actions();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_async_effect_round_trip() {
        let mut runtime = create_test_runtime();
        runtime.dispatch(Action::RefreshPlayers);

        // Poll until the mock fetch resolves and the loaded action lands
        let max_wait = tokio::time::Duration::from_secs(2);
        let start = tokio::time::Instant::now();
        while runtime.state().loading && start.elapsed() < max_wait {
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
            runtime.process_actions();
        }

        assert!(!runtime.state().loading, "fetch should have completed");
        assert_eq!(runtime.state().players.len(), 20);
    }
}
