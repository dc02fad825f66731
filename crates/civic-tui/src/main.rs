//! civic-tui - Terminal admin dashboard for municipal issues

use anyhow::Result;
use civic_core::{Config, Dashboard, Event as DashboardEvent, View};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

mod app;
mod ui;

use app::{App, KeyAction};

#[derive(Parser)]
#[command(name = "civic-tui")]
#[command(about = "Terminal admin dashboard for municipal issues")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $CIVIC_CONFIG, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// View to open on start (overview, issues, reports, categories, or a category id)
    #[arg(long, default_value = "overview")]
    view: View,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::discover(cli.config.as_deref())?;
    let mut dashboard = Dashboard::open(&config)?;
    dashboard.dispatch(DashboardEvent::Navigate(cli.view))?;

    run_tui(App::new(dashboard, &config))
}

/// Log to a file in the cache dir; the terminal belongs to the UI
fn init_tracing() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("civic")) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("civic-tui.log")) else {
        return;
    };

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("{:?}", err);
        eprintln!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();
    const TICK_RATE: Duration = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = parse_key_action(key);
            if app.handle_key_action(action) {
                return Ok(());
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

/// Map raw keys to actions. Letters stay as `Char` so text fields can take
/// them; vim-style motions are resolved per mode.
fn parse_key_action(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageUp,
        KeyCode::Up => KeyAction::Up,
        KeyCode::Down => KeyAction::Down,
        KeyCode::Left => KeyAction::Left,
        KeyCode::Right => KeyAction::Right,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::Enter => KeyAction::Enter,
        KeyCode::Tab => KeyAction::Tab,
        KeyCode::BackTab => KeyAction::BackTab,
        KeyCode::Esc => KeyAction::Escape,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Char(c) => KeyAction::Char(c),
        _ => KeyAction::Noop,
    }
}
