use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    panic::AssertUnwindSafe,
    time::{Duration, Instant},
};
use cli_log::*;
use clap::Parser;

use coinwatch::config::{MAX_PER_PAGE, TICK_RATE_MS, UI_UPDATE_RATE_MS};
use coinwatch::{render_ui, App, Cli, MarketClient, Watchlist};

#[tokio::main]
async fn main() -> Result<()> {
    init_cli_log!();
    info!("Starting coinwatch...");

    let cli = Cli::parse();

    // Gracefully handle panics and restore the terminal
    let result = AssertUnwindSafe(run_tui_app(cli)).await;

    // Restore terminal state
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).ok();

    if let Err(panic) = result {
        eprintln!("\n\nApplication panicked: {panic:?}\n\n");
        return Err(anyhow::anyhow!("Application panicked"));
    }

    Ok(())
}

async fn run_tui_app(cli: Cli) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let client = MarketClient::new()?;
    let watchlist = Watchlist::load();
    let per_page = cli.per_page.min(MAX_PER_PAGE);
    let mut app = App::new(
        client,
        cli.currency.to_lowercase(),
        per_page,
        Duration::from_secs(cli.refresh),
        watchlist,
    );

    // Load initial data
    app.refresh_coins();

    // Main loop
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal before returning
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        info!("App error: {err:?}");
    }

    res
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(TICK_RATE_MS);
    let ui_update_rate = Duration::from_millis(UI_UPDATE_RATE_MS);
    let mut last_ui_update = Instant::now();

    loop {
        if crossterm::event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code);
                if !app.is_running() {
                    return Ok(()); // Exit requested
                }
            }
        }

        // Pull in whatever the background fetches delivered
        app.apply_fetch_results();

        // Periodic refresh of the coin list
        if app.should_refresh_coins() {
            debug!("Auto-refreshing coin list");
            app.refresh_coins();
        }

        // Force UI update at least once per second for the loading spinner
        let force_redraw = last_ui_update.elapsed() >= ui_update_rate;

        if app.needs_redraw || force_redraw {
            terminal.draw(|f| render_ui(f, app))?;
            app.needs_redraw = false;
            if force_redraw {
                last_ui_update = Instant::now();
            }
        }
    }
}
