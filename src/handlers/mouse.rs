//! Mouse Input Handler

use crossterm::event::MouseEvent;
use std::time::Instant;

use crate::App;

/// Forward clicks to the active screen unless a dialog is open
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.model.has_modal() {
        return;
    }
    if let Some(screen) = app.active_screen_mut() {
        screen.handle_mouse(mouse, Instant::now());
    }
}
