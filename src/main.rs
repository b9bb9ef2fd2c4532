//! StudentHub TUI - a terminal client for the student registration and
//! daily-work submission portal.
//!
//! Students sign in, upload daily work, and submit feedback; admins
//! review submissions and manage accounts. The backend is reached over
//! HTTP; this client keeps no server data on disk beyond the bearer
//! token pair.

mod api;
mod app;
mod auth;
mod config;
mod models;
mod ui;
mod utils;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use auth::{Session, SignInOutcome, TokenStore};
use config::Config;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds). The inactivity
/// deadline is checked once per poll cycle.
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name in the data directory.
const LOG_FILE: &str = "studenthub.log";

/// Initialize the tracing subscriber, writing to a file in the data
/// directory - the terminal belongs to the TUI.
/// Use RUST_LOG env var to control log level (e.g. RUST_LOG=debug).
fn init_tracing() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let data_dir = Config::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    let appender = tracing_appender::rolling::never(&data_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--login" {
        return login_cli().await;
    }

    let _guard = init_tracing()?;
    info!("StudentHub client starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app, show the restoring indicator, then run the boot-time
    // session restore before accepting input
    let mut app = App::new()?;
    terminal.draw(|f| render(f, &app))?;
    app.complete_restore().await;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("StudentHub client shutting down");
    Ok(())
}

/// Headless sign-in for scripting: prompts for credentials, persists the
/// token pair, and exits.
async fn login_cli() -> Result<()> {
    let config = Config::load()?;
    let mut api = api::ApiClient::new(&config.api_base_url())?;
    let tokens = TokenStore::new(Config::data_dir()?);
    let mut session = Session::new(tokens);

    eprintln!("=== StudentHub Login ===");
    eprint!("Email or username: ");
    io::stderr().flush()?;
    let mut identifier = String::new();
    io::stdin().read_line(&mut identifier)?;
    let identifier = identifier.trim().to_string();

    let password = rpassword::prompt_password("Password: ")?;

    match session.sign_in(&mut api, &identifier, &password).await {
        SignInOutcome::Success { role } => {
            let mut config = config;
            config.last_identifier = Some(identifier);
            let _ = config.save();
            println!("Login successful ({})", role);
            Ok(())
        }
        SignInOutcome::Failure { message } => {
            eprintln!("Login failed: {}", message);
            std::process::exit(1);
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so the inactivity deadline is
        // enforced even while idle
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => {
                    // Ctrl+C to quit
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    app.record_activity(now);
                    if handle_input(app, key).await? {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    if is_qualifying_activity(mouse.kind) {
                        app.record_activity(now);
                    }
                }
                _ => {}
            }
        }

        // Enforce the inactivity deadline
        app.tick(Instant::now());
    }
}

/// Pointer interaction that counts as user activity: button presses and
/// scrolling. Cursor motion alone does not reset the deadline.
fn is_qualifying_activity(kind: MouseEventKind) -> bool {
    matches!(
        kind,
        MouseEventKind::Down(_)
            | MouseEventKind::ScrollUp
            | MouseEventKind::ScrollDown
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight
    )
}
