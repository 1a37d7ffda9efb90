use anyhow::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401/403
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

/// Non-success HTTP response from the backend
///
/// `message` is the backend's own `{"message": ...}` text when it sent one,
/// otherwise the canonical reason phrase for the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStatusError {
    pub status: u16,
    pub message: String,
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for HttpStatusError {}

/// A failed fetch, reduced to what the table needs to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: ErrorType,
    pub message: String,
}

impl FetchError {
    pub fn from_error(error: &Error) -> Self {
        Self {
            kind: classify_error(error),
            message: format_error_message(error),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn classify_status(status: u16) -> ErrorType {
    match status {
        401 | 403 => ErrorType::Unauthorized,
        404 => ErrorType::NotFound,
        500..=599 => ErrorType::ServerError,
        _ => ErrorType::Other,
    }
}

/// Classify an error based on its type and error chain
pub fn classify_error(error: &Error) -> ErrorType {
    // Status codes first: the backend's message text may mention anything
    for cause in error.chain() {
        if let Some(status_err) = cause.downcast_ref::<HttpStatusError>() {
            return classify_status(status_err.status);
        }
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_timeout() {
                return ErrorType::Timeout;
            }
            if let Some(status) = reqwest_err.status() {
                return classify_status(status.as_u16());
            }
        }
    }

    let error_msg = format!("{:#}", error).to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

/// Format error message for display - show raw error details
pub fn format_error_message(error: &Error) -> String {
    // Walk the error chain to find reqwest::Error (most informative for network errors)
    let mut current: Option<&dyn std::error::Error> = Some(error.as_ref());

    while let Some(err) = current {
        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
        current = err.source();
    }

    // If no reqwest error found, walk the chain to get the deepest (root cause) error
    let mut source = error.source();
    let mut deepest = error.to_string();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    deepest
}

/// One-line remedy shown under the error message in the table
pub fn hint_for(kind: ErrorType) -> Option<&'static str> {
    match kind {
        ErrorType::ConnectionRefused => Some("Is the PTW backend running at base_url?"),
        ErrorType::Timeout => Some("The backend is slow to respond; raise request_timeout_secs?"),
        ErrorType::Unauthorized => Some("Check api_token in the config file"),
        ErrorType::NotFound => Some("This collection is not available on the backend"),
        ErrorType::ServerError => Some("The backend reported an internal error"),
        ErrorType::NetworkError => Some("Check network connectivity"),
        ErrorType::Other => None,
    }
}
