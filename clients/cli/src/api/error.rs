//! Error handling for the status API client

use crate::logging::LogLevel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to decode the JSON body returned by the server
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http { status, message }
    }

    /// Classify the error to pick the level it is reported at
    pub fn log_level(&self) -> LogLevel {
        match self {
            // Rate limiting - low priority
            ApiError::Http { status, .. } if *status == 429 => LogLevel::Debug,

            // Authentication errors - the dashboard cannot recover on its own
            ApiError::Http { status, .. } if *status == 401 || *status == 403 => LogLevel::Error,

            // A body we cannot read will not fix itself on the next tick
            ApiError::Decode(_) => LogLevel::Error,

            // Server errors and network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_log_level_classification() {
        assert_eq!(http(429).log_level(), LogLevel::Debug);
        assert_eq!(http(401).log_level(), LogLevel::Error);
        assert_eq!(http(403).log_level(), LogLevel::Error);
        assert_eq!(http(500).log_level(), LogLevel::Warn);
        assert_eq!(http(503).log_level(), LogLevel::Warn);

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ApiError::from(decode).log_level(), LogLevel::Error);
    }

    #[test]
    fn test_http_error_message() {
        let err = ApiError::Http {
            status: 500,
            message: "database is locked".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error with status 500: database is locked"
        );
    }
}
