//! TUI Application module

mod events;
mod state;
mod ui;

pub use events::{dispatch, handle_key};
pub use state::{Action, AppContext, AppState, Mode, Popup, PopupKind, Session};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use tracing::info;

use crate::i18n::Language;
use crate::theme::Theme;

/// Run the TUI application until the user exits
pub fn run(ctx: AppContext, language: Language) -> Result<()> {
    let theme = Theme::load(&ctx.config);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let state = AppState::new(ctx, Session::new(language), theme);

    let result = run_app(&mut terminal, state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state: AppState,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, &state))?;

        // Blocks until the next event; organizing runs inside handle_key
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            events::handle_key(&mut state, key);
        }

        if state.should_quit {
            break;
        }

        // Rules or language changed: reload everything from disk
        if let Some(session) = state.restart.take() {
            info!("Rebuilding session (language {})", session.language);
            let theme = state.theme;
            state = AppState::new(state.ctx, session, theme);
        }
    }

    Ok(())
}
