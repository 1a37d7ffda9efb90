//! UI Model
//!
//! Preferences, dialogs, popups and the toast.

use std::time::Instant;

use super::types::{ConfirmDelete, DetailPopup};

/// UI preferences and popups
#[derive(Clone, Debug)]
pub struct UiModel {
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// Confirmation dialog for deleting a record
    pub confirm_delete: Option<ConfirmDelete>,

    /// Record detail popup
    pub detail_popup: Option<DetailPopup>,

    /// Toast message (text, timestamp, is_error)
    pub toast_message: Option<(String, Instant, bool)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            vim_mode,
            confirm_delete: None,
            detail_popup: None,
            toast_message: None,
            should_quit: false,
        }
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.confirm_delete.is_some() || self.detail_popup.is_some()
    }

    pub fn close_all_modals(&mut self) {
        self.confirm_delete = None;
        self.detail_popup = None;
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now(), false));
    }

    /// Error toasts stay up longer
    pub fn show_error_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now(), true));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp, is_error)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis(), *is_error)
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
