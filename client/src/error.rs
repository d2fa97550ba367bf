//! Client error handling
//!
//! Store operations never fail from the caller's point of view, so the only
//! errors that reach callers come from the remote analysis flow.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the analysis API client and the analyze flow
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Analysis request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Analysis service returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Invalid analysis response: {0}")]
    Decode(String),

    #[error("Profile incomplete; complete onboarding before analyzing")]
    ProfileIncomplete,

    #[error("Failed to read image: {0}")]
    Image(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err)
        }
    }
}

impl ClientError {
    /// Map a non-success status and its body message to an error
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ClientError::BadRequest(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
            StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimited(message),
            _ => ClientError::Api { status, message },
        }
    }

    /// Whether resubmitting the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Timeout | ClientError::Network(_) | ClientError::RateLimited(_) => true,
            ClientError::Api { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, "bad_request")]
    #[case(StatusCode::UNAUTHORIZED, "unauthorized")]
    #[case(StatusCode::FORBIDDEN, "unauthorized")]
    #[case(StatusCode::TOO_MANY_REQUESTS, "rate_limited")]
    #[case(StatusCode::NOT_FOUND, "api")]
    #[case(StatusCode::BAD_GATEWAY, "api")]
    fn test_status_mapping(#[case] status: StatusCode, #[case] expected: &str) {
        let kind = match ClientError::from_status(status, "detail".into()) {
            ClientError::BadRequest(_) => "bad_request",
            ClientError::Unauthorized(_) => "unauthorized",
            ClientError::RateLimited(_) => "rate_limited",
            ClientError::Api { status: got, .. } => {
                assert_eq!(got, status);
                "api"
            }
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(kind, expected);
    }

    #[test]
    fn test_retryable() {
        assert!(ClientError::Timeout.is_retryable());
        assert!(ClientError::from_status(StatusCode::SERVICE_UNAVAILABLE, String::new()).is_retryable());
        assert!(!ClientError::from_status(StatusCode::BAD_REQUEST, String::new()).is_retryable());
        assert!(!ClientError::ProfileIncomplete.is_retryable());
    }
}
