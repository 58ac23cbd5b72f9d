// --- File: crates/services/turnero_tui/src/main.rs ---
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use turnero_client::TurnosApi;
use turnero_config::load_config;

mod app;
#[cfg(test)]
mod app_test;
mod view;

use app::{ApiEvent, App};
use view::ui;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    // The TUI owns the terminal, so logs go to a rolling file.
    std::fs::create_dir_all(&config.log.directory)?;
    let file_appender = tracing_appender::rolling::daily(&config.log.directory, "turnero.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init();

    tracing::info!(backend = %config.backend.base_url, "Starting turnero");

    let api = Arc::new(TurnosApi::new(&config.backend)?);
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut app = App::new(api, events_tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, events_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("Turnero stopped");
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut events: mpsc::UnboundedReceiver<ApiEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    app.handle_key(key);
                }
            }
        }

        // Apply completed backend calls (non-blocking).
        while let Ok(event) = events.try_recv() {
            app.handle_api_event(event);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
