//! Terminal binary for the weekgrid dashboard.
//!
//! This binary is a thin wrapper: it resolves config and database paths,
//! brackets the terminal in raw mode, and delegates every interaction to
//! the library.

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use weekgrid::app::App;
use weekgrid::config::AppConfig;
use weekgrid::error::Result;
use weekgrid::store::SqliteStatusStore;
use weekgrid::sync::WeekSynchronizer;
use weekgrid::ui;
use weekgrid::week::WeekStart;
use weekgrid::{paths, VERSION};

/// A weekly task-checklist dashboard.
#[derive(Debug, Parser)]
#[command(name = "weekgrid", version = VERSION)]
struct Args {
    /// Path to the status database (defaults to ~/.weekgrid/tasks.sqlite3).
    #[arg(long)]
    db: Option<PathBuf>,

    /// Path to the config file (defaults to ~/.weekgrid/config.yaml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the current week's records as JSON instead of opening the UI.
    #[arg(long)]
    export: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let db_path = resolve_db_path(args, &config);

    let store = SqliteStatusStore::new(db_path)?;
    let mut sync = WeekSynchronizer::with_cache_ttl(store, config.cache_ttl());

    if args.export {
        return export_week(&mut sync, &config.tasks);
    }

    let app = App::new(sync, config.tasks);
    run_tui(app)
}

/// Load config from the flag path or the default location.
fn load_config(args: &Args) -> Result<AppConfig> {
    let path = args.config.clone().or_else(paths::default_config_path);
    let loaded = match path {
        Some(path) => AppConfig::load_from(&path)?,
        None => None,
    };
    Ok(loaded.unwrap_or_default())
}

/// Database path precedence: `--db` flag, then config, then default.
fn resolve_db_path(args: &Args, config: &AppConfig) -> PathBuf {
    args.db
        .clone()
        .or_else(|| config.database.clone())
        .or_else(paths::default_db_path)
        .unwrap_or_else(|| PathBuf::from("weekgrid.sqlite3"))
}

/// Initialize and print the current week as JSON (scripting surface).
fn export_week(sync: &mut WeekSynchronizer<SqliteStatusStore>, tasks: &[String]) -> Result<()> {
    let week = WeekStart::current();
    let report = sync.ensure_week_initialized(tasks, week);
    let outcome = sync.fetch_week(week);

    for warning in report.warnings.iter().chain(&outcome.warnings) {
        eprintln!("Warning: {warning}");
    }

    println!("{}", serde_json::to_string_pretty(&outcome.records)?);
    Ok(())
}

/// Run the interactive dashboard until the user quits.
fn run_tui(mut app: App<SqliteStatusStore>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<SqliteStatusStore>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if let Some(action) = ui::map_key(key.code) {
                if !app.handle(action) {
                    return Ok(());
                }
            }
        }
    }
}
