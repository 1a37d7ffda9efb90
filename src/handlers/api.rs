//! API Response Handler
//!
//! Handles results from the background mutation worker.

use crate::logic::errors;
use crate::services::api::ApiResponse;
use crate::App;

/// Handle API response from background service
///
/// A successful delete refetches every loaded screen over the same
/// collection; a failed one leaves the screens alone and shows why.
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::DeleteResult {
            resource,
            id,
            label,
            result,
        } => match result {
            Ok(()) => {
                crate::log_debug(&format!("DEBUG [DeleteResult]: {} id={} deleted", resource, id));
                app.model.ui.show_toast(format!("Deleted {}", label));
                app.refresh_endpoint(resource);
            }
            Err(error) => {
                let message = errors::format_error_message(&error);
                crate::log_debug(&format!(
                    "DEBUG [DeleteResult]: {} id={} failed ({:?}): {}",
                    resource,
                    id,
                    errors::classify_error(&error),
                    message
                ));
                app.model
                    .ui
                    .show_error_toast(format!("Failed to delete {}: {}", label, message));
            }
        },
    }
}
