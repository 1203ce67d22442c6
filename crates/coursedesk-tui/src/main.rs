//! coursedesk - a terminal client for the course catalog.
//!
//! Sign in, sign up and browse from the terminal. The session survives
//! restarts; protected screens redirect to sign-in until there is one.

mod app;
mod ui;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use coursedesk_core::auth::SessionStore;
use coursedesk_core::flows::{self, SignInField, SignInForm, Transition};
use coursedesk_core::router::paths;
use coursedesk_core::{ApiClient, Config};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written while the TUI owns the terminal
const LOG_FILE: &str = "coursedesk.log";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Logging for one-shot commands goes to stderr
fn init_tracing_stderr() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Logging for the TUI goes to a file so it cannot corrupt the screen
fn init_tracing_file(dir: &Path) -> WorkerGuard {
    let _ = std::fs::create_dir_all(dir);
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    guard
}

fn log_dir() -> PathBuf {
    Config::load()
        .and_then(|c| c.cache_dir())
        .unwrap_or_else(|_| PathBuf::from("./cache"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if let Some(command) = args.get(1) {
        init_tracing_stderr();
        return match command.as_str() {
            "--whoami" => whoami(),
            "--signout" => signout(),
            "--signin" => signin().await,
            other => bail!("Unknown option: {} (expected --whoami, --signin or --signout)", other),
        };
    }

    let _log_guard = init_tracing_file(&log_dir());
    info!("coursedesk starting");

    // Create app before taking over the terminal so config errors print normally
    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

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

    info!("coursedesk shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

// ============================================================================
// One-shot commands
// ============================================================================

fn open_store(config: &Config) -> Result<SessionStore> {
    let mut store = SessionStore::from_box(config.session_slot()?);
    store.restore();
    Ok(store)
}

/// Print the restored session
fn whoami() -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config)?;

    match store.session().user() {
        Some(user) => {
            println!("{} <{}>", user.full_name(), user.email_address);
            if let Some(minutes) = store.session().minutes_signed_in() {
                println!("Signed in {}m ago", minutes);
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

fn signout() -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;
    flows::sign_out(&mut store);
    println!("Signed out");
    Ok(())
}

/// Sign in from the command line without starting the TUI
async fn signin() -> Result<()> {
    let mut config = Config::load()?;
    let api = ApiClient::new(config.api_base_url())?;
    let mut store = open_store(&config)?;

    let email = prompt_email(config.last_email.as_deref())?;
    let password = rpassword::prompt_password("Password: ")?;

    let mut form = SignInForm::new(paths::HOME);
    form.edit(SignInField::EmailAddress, email);
    form.edit(SignInField::Password, password);

    match form.submit(&api, &mut store).await {
        Transition::Success { .. } => {
            if let Some(user) = store.session().user() {
                println!("Signed in as {}", user.full_name());
                config.last_email = Some(user.email_address.clone());
                config.save()?;
            }
            Ok(())
        }
        Transition::Rejected => {
            for error in form.state().errors() {
                eprintln!("{}", error);
            }
            bail!("Sign in rejected")
        }
        Transition::HardFailure { navigate_to } if navigate_to == paths::NOT_FOUND => {
            bail!("Sign in endpoint not found at {}", api.base_url())
        }
        _ => bail!("Sign in failed; see log output for details"),
    }
}

fn prompt_email(last: Option<&str>) -> Result<String> {
    match last {
        Some(last) => print!("Email Address [{}]: ", last),
        None => print!("Email Address: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    Ok(match last {
        Some(last) if input.is_empty() => last.to_string(),
        _ => input.to_string(),
    })
}
