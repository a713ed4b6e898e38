use std::future::Future;
use std::pin::Pin;

use super::action::Action;

/// Side effects returned by the reducer.
///
/// The reducer itself is pure; anything that touches the data store is
/// described here and executed by the [`Runtime`]. Named fetch variants are
/// resolved against [`DataEffects`]; `Async` carries an already-built
/// future that resolves to the completion action.
///
/// [`Runtime`]: super::runtime::Runtime
/// [`DataEffects`]: super::effects::DataEffects
pub enum Effect {
    None,
    /// Dispatch another action immediately
    Action(Action),
    Batch(Vec<Effect>),
    Async(Pin<Box<dyn Future<Output = Action> + Send>>),

    /// Fetch the browse window. The token is matched against the latest
    /// issued request when the response arrives; stale responses are dropped.
    FetchPlayers {
        token: u64,
        offset: i64,
        limit: i64,
        season_id: i64,
    },
    /// Reload team membership from the remote store
    FetchTeam,
    /// Fetch the multi-season history for one player
    FetchHistory(i64),
    /// Sequentially add the given players to the team, in order
    AddSelectedToTeam(Vec<i64>),
}
