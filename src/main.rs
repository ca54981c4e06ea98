use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four_analyzer::config::{AppConfig, LoggingConfig};
use connect_four_analyzer::coordinator::{MoveCoordinator, PlayMode};
use connect_four_analyzer::engine::EngineHandle;
use connect_four_analyzer::ui::App;

/// Play Connect Four with a perfect solver evaluating every position.
#[derive(Parser)]
#[command(name = "connect_four_analyzer", about = "Connect Four board with a background solver")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the play mode at startup
    #[arg(long, value_enum)]
    mode: Option<PlayMode>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    // Load configuration
    let config_found = cli.config.exists();
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(mode) = cli.mode {
        app_config.ui.mode = mode;
    }

    init_logging(&app_config.logging)?;
    if config_found {
        info!("loaded config from {}", cli.config.display());
    } else {
        warn!("config file '{}' not found, using defaults", cli.config.display());
    }

    let (engine, replies) = EngineHandle::spawn(&app_config.engine).context("starting engine")?;
    let game = MoveCoordinator::new(engine, app_config.ui.mode);
    let mut app = App::new(game, replies, Duration::from_millis(app_config.ui.tick_ms));

    run_tui(&mut app).context("running terminal UI")?;
    info!("exiting");
    Ok(())
}

/// The TUI owns the terminal, so log records go to a file.
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file = File::create(&config.file)
        .with_context(|| format!("creating log file {}", config.file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("initialising logger")?;
    Ok(())
}

fn run_tui(app: &mut App<EngineHandle>) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
