use tracing::{debug, trace, warn};

use super::action::Action;
use super::effect::Effect;
use super::state::{BrowseState, DetailState, SortDirection};

/// Pure state reducer for the browse engine
///
/// Takes current state and an action, returns new state and an effect.
/// No I/O and no async happens here; every store interaction is returned
/// as an [`Effect`] and executed by the runtime.
pub fn reduce(mut state: BrowseState, action: Action) -> (BrowseState, Effect) {
    match action {
        Action::ToggleSelect(player_id) => {
            // Selection must stay a subset of renderable ids
            if !state.is_renderable(player_id) {
                trace!(player_id, "Ignoring select on non-renderable player");
                return (state, Effect::None);
            }
            if let Some(pos) = state.selected.iter().position(|id| *id == player_id) {
                state.selected.remove(pos);
            } else {
                state.selected.push(player_id);
            }
            (state, Effect::None)
        }

        Action::BulkHide => {
            if state.selected.is_empty() {
                return (state, Effect::None);
            }
            debug!(count = state.selected.len(), "Hiding selected players");
            let selected = std::mem::take(&mut state.selected);
            state.hidden.extend(selected);
            (state, Effect::None)
        }

        Action::UnhideAll => {
            debug!(count = state.hidden.len(), "Unhiding all players");
            state.hidden.clear();
            (state, Effect::None)
        }

        Action::BulkAddToTeam => {
            if state.selected.is_empty() {
                return (state, Effect::None);
            }
            // Selection is captured here; the completion action applies the
            // hide and clears it, so "originally selected" survives any
            // selection changes made while the adds are in flight.
            let ids = state.selected.clone();
            debug!(count = ids.len(), "Adding selected players to team");
            state.notice = None;
            (state, Effect::AddSelectedToTeam(ids))
        }

        Action::BulkAddCompleted { requested, added } => {
            debug!(
                requested = requested.len(),
                added = added.len(),
                "Bulk team add completed"
            );
            state.team.extend(added.iter().copied());
            // Every requested player leaves the browse list, even the ones
            // whose remote insert failed; add-to-team means "stop browsing
            // this player", not "confirmed on team".
            state.hidden.extend(requested.iter().copied());
            state.selected.retain(|id| !requested.contains(id));
            let failed = requested.len() - added.len();
            if failed > 0 {
                state.notice = Some(format!(
                    "{} of {} players could not be added to the team",
                    failed,
                    requested.len()
                ));
            }
            (state, Effect::None)
        }

        Action::ChangePage(delta) => {
            let total = state.total_pages() as i64;
            let target = (state.current_page as i64 + delta).clamp(1, total);
            trace!(from = state.current_page, to = target, "Changing page");
            state.current_page = target as usize;
            (state, Effect::None)
        }

        Action::SetSortColumn(column) => {
            if state.sort_column == column {
                state.sort_direction = state.sort_direction.toggled();
            } else {
                state.sort_column = column;
                state.sort_direction = SortDirection::Descending;
            }
            (state, Effect::None)
        }

        Action::SetPositionFilter(filter) => {
            state.position_filter = filter;
            (state, Effect::None)
        }

        Action::RefreshPlayers => {
            state.request_seq += 1;
            state.loading = true;
            state.error = None;
            state.notice = None;
            debug!(token = state.request_seq, "Refreshing player window");
            let effect = Effect::FetchPlayers {
                token: state.request_seq,
                offset: 0,
                limit: state.fetch_limit as i64,
                season_id: state.season_id,
            };
            (state, effect)
        }

        Action::PlayersLoaded(token, result) => {
            if token != state.request_seq {
                trace!(
                    token,
                    latest = state.request_seq,
                    "Dropping stale player response"
                );
                return (state, Effect::None);
            }
            match result {
                Ok(page) => {
                    debug!(
                        players = page.players.len(),
                        total = page.total_count,
                        "Player window loaded"
                    );
                    state.players = page.players;
                    state.total_players = page.total_count;
                    state.loading = false;
                    state.error = None;
                    state.clamp_page();
                    state.prune_selection();
                }
                Err(e) => {
                    state.loading = false;
                    state.error = Some(e);
                }
            }
            (state, Effect::None)
        }

        Action::RefreshTeam => (state, Effect::FetchTeam),

        Action::TeamLoaded(Ok(ids)) => {
            state.team = ids.into_iter().collect();
            state.prune_selection();
            (state, Effect::None)
        }

        Action::TeamLoaded(Err(e)) => {
            // Team overlay failures are logged, not surfaced; the browse
            // list stays usable with the previous overlay.
            warn!(error = %e, "Failed to load team membership");
            (state, Effect::None)
        }

        Action::OpenPlayerDetail(player_id) => {
            // A tap is only a drill-down when nothing is selected;
            // otherwise it is part of a selection gesture.
            if !state.selected.is_empty() {
                return (state, Effect::None);
            }
            state.detail = Some(DetailState {
                player_id,
                loading: true,
                ..Default::default()
            });
            (state, Effect::FetchHistory(player_id))
        }

        Action::ClosePlayerDetail => {
            state.detail = None;
            (state, Effect::None)
        }

        Action::HistoryLoaded(player_id, result) => {
            match state.detail.as_mut() {
                Some(detail) if detail.player_id == player_id => {
                    detail.loading = false;
                    match result {
                        Ok(mut seasons) => {
                            // Stores return ascending season order; hold the
                            // contract even if one does not.
                            seasons.sort_by_key(|s| s.season_id);
                            detail.seasons = seasons;
                        }
                        Err(e) => detail.error = Some(e),
                    }
                }
                _ => {
                    trace!(player_id, "Dropping history for closed detail view");
                }
            }
            (state, Effect::None)
        }
    }
}
