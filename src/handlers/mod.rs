//! Event Handlers
//!
//! - api: results from the background mutation worker
//! - keyboard: user keyboard input
//! - mouse: clicks on table controls
//!
//! Handlers are functions that take &mut App and process one event.

pub mod api;
pub mod keyboard;
pub mod mouse;

pub use api::handle_api_response;
pub use keyboard::handle_key;
pub use mouse::handle_mouse;
