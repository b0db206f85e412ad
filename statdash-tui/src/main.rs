//! statdash TUI: four-panel terminal dashboard over the yearly statistics store.
//!
//! Panels:
//! 1. Chart: stacked composition or trend lines, with highlight markers
//! 2. Table: filtered rows in millions
//! 3. Summary: mean publishers, studies and memorial attendance
//! 4. Help: keyboard shortcuts
//!
//! Usage: `statdash-tui [config.toml]`. Without an argument `./statdash.toml`
//! is used when present, otherwise built-in defaults.

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use statdash_core::DashboardConfig;
use statdash_tui::{input, persistence, ui, AppState};

const DEFAULT_CONFIG: &str = "statdash.toml";

fn main() -> Result<()> {
    // Restore the terminal before the panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let _guard = init_tracing()?;

    let config = load_config(std::env::args().nth(1).map(PathBuf::from))?;
    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("statdash")
        .join("state.json");

    let mut app = AppState::new(config, PathBuf::from("."));
    if let Some(persisted) = persistence::load(&state_path) {
        persistence::apply(&mut app, persisted);
    }
    app.reload();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        tracing::warn!(error = %e, "failed to save view state");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Log to a daily file; the terminal belongs to the UI.
fn init_tracing() -> Result<WorkerGuard> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("statdash")
        .join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "statdash-tui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(non_blocking)
        .try_init()
        .map_err(|e| anyhow::anyhow!("init tracing: {e}"))?;
    Ok(guard)
}

fn load_config(arg: Option<PathBuf>) -> Result<DashboardConfig> {
    let path = match arg {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).is_file() => PathBuf::from(DEFAULT_CONFIG),
        None => return Ok(DashboardConfig::default()),
    };
    info!(path = %path.display(), "loading config");
    DashboardConfig::from_file(&path).with_context(|| format!("load {}", path.display()))
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll keeps the loop responsive without spinning.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
