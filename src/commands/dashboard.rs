//! Dashboard command implementation
//!
//! This module implements the `dashboard` subcommand which displays the
//! hits table and both summary charts in the terminal. Data is fetched once
//! when the view is activated and again only when the user asks to reload.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, time::Duration};
use tracing::info;

use hit_dashboard::{
    config::Config,
    dashboard::{DashboardApp, KeyAction},
    hits::HitsFetcher,
};

use super::resolve_hits_url;

/// Execute the dashboard command
///
/// # Arguments
/// * `url` - Optional hits endpoint URL (taken from config if None)
/// * `cfg` - Loaded configuration
pub async fn execute(url: Option<String>, cfg: &Config) -> Result<()> {
    let hits_url = resolve_hits_url(url, cfg);
    let fetcher = HitsFetcher::new(hits_url.clone(), cfg.source.timeout())?;

    info!(url = %hits_url, "Starting dashboard");
    run_dashboard(DashboardApp::new(hits_url), &fetcher).await
}

/// Run the dashboard event loop
async fn run_dashboard(mut app: DashboardApp, fetcher: &HitsFetcher) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut app, fetcher).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut DashboardApp,
    fetcher: &HitsFetcher,
) -> Result<()> {
    // View activation
    if reload(terminal, app, fetcher).await? {
        return Ok(());
    }

    loop {
        terminal.draw(|f| app.render(f))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        match app.handle_key(key) {
            KeyAction::Quit => return Ok(()),
            KeyAction::Reload => {
                if reload(terminal, app, fetcher).await? {
                    return Ok(());
                }
            }
            KeyAction::None => {}
        }
    }
}

/// Show the loading marker over the current data, then fetch
///
/// Quit keys are still honored while the request is in flight; dropping
/// the fetch leaves the current data untouched. Returns `true` when the
/// user asked to quit.
async fn reload<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut DashboardApp,
    fetcher: &HitsFetcher,
) -> Result<bool> {
    app.loading = true;
    terminal.draw(|f| app.render(f))?;

    let quit = tokio::select! {
        _ = app.state.refresh(fetcher) => false,
        watched = wait_for_quit() => {
            watched?;
            info!("Quit requested while fetching");
            true
        }
    };

    app.loading = false;
    Ok(quit)
}

/// Resolve once a quit key is pressed, discarding other input
async fn wait_for_quit() -> Result<()> {
    loop {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && KeyAction::from_key(key) == KeyAction::Quit {
                    return Ok(());
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
