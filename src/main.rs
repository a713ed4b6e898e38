use clap::{Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use puckdraft::browse::SortColumn;
use puckdraft::commands;
use puckdraft::config;
use puckdraft::positions::PositionFilter;
use puckdraft::store::{PgStore, PlayerStore};
use puckdraft::team::TeamStore;
use puckdraft::tui;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

/// Environment variable overriding the configured database URL
const DATABASE_URL_ENV: &str = "PUCKDRAFT_DATABASE_URL";

#[derive(Parser)]
#[command(name = "puckdraft")]
#[command(
    about = "Fantasy hockey player browser",
    long_about = "Fantasy hockey player browser\n\nIf no command is specified, the program starts in interactive mode."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PositionArg {
    /// All players
    #[value(name = "a")]
    All,
    /// Forwards only
    #[value(name = "f")]
    Forwards,
    /// Defensemen only
    #[value(name = "d")]
    Defense,
}

impl PositionArg {
    fn to_position_filter(self) -> PositionFilter {
        match self {
            PositionArg::All => PositionFilter::AllPlayers,
            PositionArg::Forwards => PositionFilter::Forwards,
            PositionArg::Defense => PositionFilter::Defense,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    /// Sort by raw points
    Points,
    /// Sort by projected value
    Projected,
}

impl SortArg {
    fn to_sort_column(self) -> SortColumn {
        match self {
            SortArg::Points => SortColumn::Points,
            SortArg::Projected => SortColumn::Projected,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List browsable players with projected values
    Players {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Position filter: a=all, f=forwards, d=defense
        #[arg(long, default_value = "a")]
        position: PositionArg,

        /// Sort column
        #[arg(long, default_value = "points")]
        sort: SortArg,

        /// Season id, e.g. 20232024 (defaults to the configured season)
        #[arg(short, long)]
        season: Option<String>,
    },
    /// Show the players on your team
    Team,
    /// Show every season on record for one player
    History {
        /// Player id
        player_id: i64,
    },
    /// Display current configuration
    Config,
}

fn create_store(config: &config::Config) -> Arc<dyn PlayerStore> {
    let url = std::env::var(DATABASE_URL_ENV).unwrap_or_else(|_| config.database_url.clone());
    if url.is_empty() {
        let msg = format!(
            "No database configured. Set database_url in the config file or {}.",
            DATABASE_URL_ENV
        );
        tracing::error!("{}", msg);
        eprintln!("{}", msg);
        std::process::exit(1);
    }
    match PgPoolOptions::new().max_connections(5).connect_lazy(&url) {
        Ok(pool) => Arc::new(PgStore::new(pool)),
        Err(e) => {
            let msg = format!("Failed to create database pool: {}", e);
            tracing::error!("{}", msg);
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    }
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!(
        "Configuration File: {} (Exists: {})",
        path_str,
        if exists { "yes" } else { "no" }
    );
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!(
        "database_url: {}",
        if cfg.database_url.is_empty() {
            "(unset)"
        } else {
            "(configured)"
        }
    );
    println!("season_id: {}", cfg.season_id);
    println!("page_size: {}", cfg.page_size);
    println!("fetch_limit: {}", cfg.fetch_limit);
    println!("time_format: {}", cfg.time_format);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!(
        "unfocused_selection_fg: {:?}{}",
        cfg.theme.unfocused_selection_fg(),
        if cfg.theme.unfocused_selection_fg.is_none() {
            " (auto: 50% darker)"
        } else {
            ""
        }
    );
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Run TUI mode hosting the browse engine
async fn run_tui_mode(config: config::Config) -> Result<(), std::io::Error> {
    let store = create_store(&config);
    let team = Arc::new(TeamStore::new(store.clone()));
    tui::run(store, team, config).await
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(
    store: &dyn PlayerStore,
    config: &config::Config,
    command: Commands,
) -> anyhow::Result<()> {
    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Players {
            page,
            position,
            sort,
            season,
        } => {
            let season_id = commands::parse_season(season, config.season_id)?;
            commands::players::run(
                store,
                config,
                page,
                position.to_position_filter(),
                sort.to_sort_column(),
                season_id,
            )
            .await
        }
        Commands::Team => commands::team::run(store, config).await,
        Commands::History { player_id } => commands::history::run(store, player_id).await,
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // If no subcommand, run TUI
    if cli.command.is_none() {
        if let Err(e) = run_tui_mode(config).await {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let command = cli.command.unwrap();

    // Handle Config command separately (doesn't need a store)
    if let Commands::Config = command {
        handle_config_command();
        return;
    }

    let store = create_store(&config);
    if let Err(e) = execute_command(&*store, &config, command).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
