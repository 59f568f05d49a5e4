use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use typedeck_core::{AppConfig, Deck};
use typedeck_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    ui, Theme,
};

pub fn run(config: &AppConfig, deck_path: &Path) -> Result<()> {
    let deck = Deck::load(deck_path)?;
    let title = deck.title.clone().unwrap_or_else(|| "typedeck".to_string());
    tracing::debug!("playing {} ({} blocks)", deck_path.display(), deck.blocks.len());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(&title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Build the page; the wall clock is read once, here, for the
    // last-login substitution
    let mut app = App::new(config, deck, Local::now().naive_local());

    let size = terminal.size()?;
    let now = Instant::now();
    app.on_resize(size.width, size.height, now);
    app.activate(now);

    let theme = Theme::default();
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    let result = event_loop(&mut terminal, &mut app, &event_handler, &theme);

    // Teardown cancels any pending animation steps before the page goes away
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    theme: &Theme,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app, theme))?;

        match event_handler.next()? {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, app);
                app.apply(action, Instant::now());
            }
            Some(AppEvent::Resize(width, height)) => {
                app.on_resize(width, height, Instant::now());
            }
            Some(AppEvent::Tick) | None => {
                app.on_tick(Instant::now());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
