//! Terminal UI for noughts.

mod app;
mod input;
mod ui;

use crate::config::GameConfig;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use noughts_core::Session;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

/// Runs the TUI until the user quits.
#[instrument(skip_all, fields(mode = %config.mode(), difficulty = %config.difficulty()))]
pub fn run_tui(config: &GameConfig) -> Result<()> {
    info!("Starting noughts TUI");

    let session = match config.seed() {
        Some(seed) => Session::with_seed(*config.mode(), *config.difficulty(), *seed),
        None => Session::new(*config.mode(), *config.difficulty()),
    };
    let mut app = App::new(session, Duration::from_millis(*config.computer_delay_ms()));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(
        x = app.session().scores().x,
        o = app.session().scores().o,
        draws = app.session().scores().draws,
        "TUI closed"
    );
    res
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        if app.should_quit() {
            return Ok(());
        }

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code, Instant::now());
        }

        app.tick(Instant::now());
    }
}
