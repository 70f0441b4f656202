// Normalized API errors
//
// Every failure leaving the HTTP layer is one of these variants. Callers can
// always read a message and a status; nothing transport-level leaks through.

use thiserror::Error;

/// Fixed message for connectivity failures, matching what users see inline.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to connect to server. Please check your connection.";

/// Fallback when a failed response carries no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response received at all - the backend is unreachable.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network {
        /// Underlying transport detail, kept for logs only.
        detail: String,
    },

    /// The backend rejected the credential (HTTP 401). By the time this
    /// surfaces, the session store has already been cleared.
    #[error("authentication expired: {message}")]
    AuthExpired { message: String },

    /// Any other failed response, with the message extracted from the body.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        data: Option<serde_json::Value>,
    },
}

impl ApiError {
    /// HTTP status of the failure; 0 when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Network { .. } => 0,
            ApiError::AuthExpired { .. } => 401,
            ApiError::Api { status, .. } => *status,
        }
    }

    /// Human-readable message suitable for inline display.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { .. } => NETWORK_ERROR_MESSAGE,
            ApiError::AuthExpired { message } => message,
            ApiError::Api { message, .. } => message,
        }
    }

    /// Response body, when one was received and readable.
    pub fn data(&self) -> Option<&serde_json::Value> {
        match self {
            ApiError::Api { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired { .. })
    }
}

/// Extract a display message from a failed response body.
///
/// Priority: string body, then `message` field, then `error` field, then the
/// generic fallback.
pub(crate) fn extract_message(body: Option<&serde_json::Value>) -> String {
    if let Some(value) = body {
        if let Some(s) = value.as_str() {
            if !s.is_empty() {
                return s.to_string();
            }
        }
        for key in ["message", "error"] {
            if let Some(s) = value.get(key).and_then(|v| v.as_str()) {
                if !s.is_empty() {
                    return s.to_string();
                }
            }
        }
    }
    GENERIC_ERROR_MESSAGE.to_string()
}
