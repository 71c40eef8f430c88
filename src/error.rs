//! API error taxonomy
//!
//! Every remote call resolves into one of four failure classes: transport
//! (the request never produced a usable HTTP response), service (the API
//! answered with a GraphQL error), validation (caught locally before any
//! request is issued), and not-found (the query succeeded but the entity
//! does not exist).

use std::fmt;

/// Errors surfaced by the content API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network or HTTP-level failure (DNS, refused connection, non-2xx status)
    Transport(String),
    /// The API answered with a service-level error message
    Service(String),
    /// Client-side validation rejected the operation before any request
    Validation(String),
    /// The requested entity (post, category) does not exist
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "network error: {}", msg),
            ApiError::Service(msg) => write!(f, "{}", msg),
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::NotFound(what) => write!(f, "not found: {}", what),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Status-carrying errors come from error_for_status; everything else
        // (connect, timeout, body decode) is a transport failure.
        if let Some(status) = err.status() {
            ApiError::Transport(format!("HTTP {}", status))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_displays_message_verbatim() {
        let err = ApiError::Service("incorrect password".to_string());
        assert_eq!(err.to_string(), "incorrect password");
    }

    #[test]
    fn test_transport_error_is_prefixed() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
