//! PTW Admin TUI Library
//!
//! Terminal front-end for the Permit to Work / e-Safety backend. The heart of
//! the crate is the paginated collection viewer in [`viewer`]; everything else
//! wires it to the backend's REST collections.

pub mod api;
pub mod app;
pub mod config;
pub mod handlers;
pub mod logic;
pub mod model;
pub mod records;
pub mod resources;
pub mod services;
pub mod ui;
pub mod utils;
pub mod viewer;

pub use app::App;

use std::sync::atomic::{AtomicBool, Ordering};

// Global flag for debug mode
static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable the debug log
pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

/// Append a line to the debug log (no-op unless debug mode is enabled)
pub fn log_debug(msg: &str) {
    if !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }

    use std::fs::OpenOptions;
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(utils::get_debug_log_path())
    {
        let _ = writeln!(file, "{}", msg);
    }
}
