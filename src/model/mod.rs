//! Application Model
//!
//! Plain, cloneable state outside the collection screens:
//!
//! - **UiModel**: preferences, dialogs, toast
//! - **active_screen**: index of the screen on display
//!
//! The screens own their own query and fetch state.

pub mod types;
pub mod ui;

pub use types::*;
pub use ui::UiModel;

/// Root application model
#[derive(Clone, Debug)]
pub struct Model {
    /// UI preferences and popups
    pub ui: UiModel,

    /// Index into the application's screens
    pub active_screen: usize,
}

impl Model {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            ui: UiModel::new(vim_mode),
            active_screen: 0,
        }
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    /// Move to the next or previous screen, wrapping at the ends
    pub fn cycle_screen(&mut self, screen_count: usize, forward: bool) {
        self.active_screen = crate::logic::ui::cycle_screen(self.active_screen, screen_count, forward);
    }

    /// Jump to screen `index` if it exists
    pub fn select_screen(&mut self, index: usize, screen_count: usize) -> bool {
        if index < screen_count {
            self.active_screen = index;
            return true;
        }
        false
    }
}
