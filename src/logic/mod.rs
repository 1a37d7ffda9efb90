//! Business Logic
//!
//! Pure functions that can be unit tested without a terminal or a backend:
//! - errors: Error classification and user-facing messages
//! - formatting: Timestamps, status codes and raw field values
//! - gesture: De-duplication of row action gestures
//! - navigation: Row selection inside a page
//! - pagination: Page counts, sequence numbers and footer text
//! - ui: Toast timing and screen cycling

pub mod errors;
pub mod formatting;
pub mod gesture;
pub mod navigation;
pub mod pagination;
pub mod ui;
