mod modifiers;
mod players;
mod status_bar;
mod tab_bar;
mod team;
pub mod theme;

use std::io;
use std::sync::Arc;
use std::time::SystemTime;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::browse::{Action, BrowseState, DataEffects, Runtime};
use crate::config::Config;
use crate::modifiers::ModifierStore;
use crate::store::PlayerStore;
use crate::team::TeamStore;

const EVENT_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Players,
    Team,
    Modifiers,
}

impl Tab {
    pub fn all() -> [Self; 3] {
        [Self::Players, Self::Team, Self::Modifiers]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Players => "Players",
            Self::Team => "My Team",
            Self::Modifiers => "Modifiers",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Players => Self::Team,
            Self::Team => Self::Modifiers,
            Self::Modifiers => Self::Players,
        }
    }
}

/// Run the interactive browser until the user quits.
pub async fn run(
    store: Arc<dyn PlayerStore>,
    team_store: Arc<TeamStore>,
    config: Config,
) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, store, team_store, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: Arc<dyn PlayerStore>,
    team_store: Arc<TeamStore>,
    config: Config,
) -> Result<(), io::Error> {
    let data_effects = Arc::new(DataEffects::new(store.clone(), team_store.clone()));
    let initial_state = BrowseState::new(config.season_id, config.page_size, config.fetch_limit);
    let mut runtime = Runtime::new(initial_state, data_effects);

    let mut modifier_store = ModifierStore::new();
    let mut players_view = players::PlayersView::new();
    let mut team_view = team::TeamView::new();
    let mut modifiers_view = modifiers::ModifiersView::new();
    let mut current_tab = Tab::Players;
    let mut last_refresh: Option<SystemTime> = None;
    let mut was_loading = false;

    // Kick off the initial loads; completions arrive through the runtime
    runtime.dispatch(Action::RefreshTeam);
    runtime.dispatch(Action::RefreshPlayers);

    loop {
        runtime.process_actions();

        let loading = runtime.state().loading;
        if was_loading && !loading && runtime.state().error.is_none() {
            last_refresh = Some(SystemTime::now());
        }
        was_loading = loading;

        let error_message = runtime
            .state()
            .error
            .clone()
            .or_else(|| runtime.state().notice.clone())
            .or_else(|| team_view.error.clone());

        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2), // Tab bar
                    Constraint::Min(0),    // Content
                    Constraint::Length(1), // Status bar
                ])
                .split(size);

            tab_bar::render_tab_bar(f, chunks[0], current_tab, &config.theme);

            match current_tab {
                Tab::Players => players_view.render(
                    f,
                    chunks[1],
                    runtime.state(),
                    &modifier_store,
                    &config.theme,
                ),
                Tab::Team => team_view.render(f, chunks[1], &config.theme),
                Tab::Modifiers => modifiers_view.render(f, chunks[1], &modifier_store, &config.theme),
            }

            status_bar::render_status_bar(
                f,
                chunks[2],
                error_message.as_deref(),
                last_refresh,
                &config.time_format,
            );
        })?;

        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        // While a modifier value is being edited the form gets every key,
        // so digits do not switch tabs and 'q' does not quit
        if current_tab == Tab::Modifiers && modifiers_view.is_editing() {
            modifiers_view.handle_key(key, &mut modifier_store);
            continue;
        }

        match key.code {
            KeyCode::Char('q') => break,
            KeyCode::Char('1') => current_tab = Tab::Players,
            KeyCode::Char('2') => {
                current_tab = Tab::Team;
                team_view.refresh(&*store, &team_store, config.season_id).await;
                runtime.dispatch(Action::RefreshTeam);
            }
            KeyCode::Char('3') => current_tab = Tab::Modifiers,
            KeyCode::Tab => {
                current_tab = current_tab.next();
                if current_tab == Tab::Team {
                    team_view.refresh(&*store, &team_store, config.season_id).await;
                    runtime.dispatch(Action::RefreshTeam);
                }
            }
            _ => match current_tab {
                Tab::Players => {
                    for action in players_view.handle_key(key, runtime.state(), &modifier_store) {
                        runtime.dispatch(action);
                    }
                }
                Tab::Team => match team_view.handle_key(key) {
                    team::TeamKeyResult::RemoveSelected => {
                        team_view.remove_selected(&team_store).await;
                        team_view.refresh(&*store, &team_store, config.season_id).await;
                        runtime.dispatch(Action::RefreshTeam);
                    }
                    team::TeamKeyResult::Refresh => {
                        team_view.refresh(&*store, &team_store, config.season_id).await;
                        runtime.dispatch(Action::RefreshTeam);
                    }
                    team::TeamKeyResult::Handled | team::TeamKeyResult::NotHandled => {}
                },
                Tab::Modifiers => modifiers_view.handle_key(key, &mut modifier_store),
            },
        }
    }

    Ok(())
}
