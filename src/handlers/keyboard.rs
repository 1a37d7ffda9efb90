//! Keyboard Input Handler
//!
//! Dialogs get first look at every key, then search input, then the
//! application keys (quit, screen switching). Whatever is left goes to the
//! active collection screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

use crate::App;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Windows terminals report releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.model.ui.should_quit = true;
        return;
    }

    // Handle delete confirmation prompt
    if app.model.ui.confirm_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.model.ui.confirm_delete = None;
            }
            // Ignore other keys while prompt is showing
            _ => {}
        }
        return;
    }

    // Detail popup: scroll or close
    let vim = app.model.ui.vim_mode;
    if let Some(popup) = app.model.ui.detail_popup.as_mut() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('v') => {
                app.model.ui.detail_popup = None;
            }
            KeyCode::Down => popup.scroll_offset = popup.scroll_offset.saturating_add(1),
            KeyCode::Up => popup.scroll_offset = popup.scroll_offset.saturating_sub(1),
            KeyCode::Char('j') if vim => popup.scroll_offset = popup.scroll_offset.saturating_add(1),
            KeyCode::Char('k') if vim => popup.scroll_offset = popup.scroll_offset.saturating_sub(1),
            _ => {}
        }
        return;
    }

    let now = Instant::now();
    let screen_count = app.screens.len();

    // Search input owns every key until Enter/Esc
    if app.active_screen().is_some_and(|s| s.search_active()) {
        if let Some(screen) = app.active_screen_mut() {
            screen.handle_key(key, now);
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.model.ui.should_quit = true;
        }
        KeyCode::Tab => app.cycle_screen(true),
        KeyCode::BackTab => app.cycle_screen(false),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            if index < screen_count {
                app.switch_to(index);
            }
        }
        _ => {
            if let Some(screen) = app.active_screen_mut() {
                screen.handle_key(key, now);
            }
        }
    }
}
