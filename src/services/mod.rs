//! External Services
//!
//! - api: background worker for backend mutations

pub mod api;

pub use api::{spawn_api_service, ApiRequest, ApiResponse};
