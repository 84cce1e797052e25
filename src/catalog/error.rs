//! HTTP-level error wrapper for the catalog client.
//!
//! Keeps the response status and `Retry-After` hint around long enough to
//! decide which [`HerodexError`] a failed request maps to.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::HerodexError;

/// Rate limit wait used when the server does not send `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    /// Retry-After header value in seconds, if available
    pub retry_after: Option<u64>,
    /// Human-readable error message
    pub message: String,
}

/// Error body returned by the catalog (`{"code": 409, "status": "..."}`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build from a non-success status and the raw response body
    pub fn from_response(status: StatusCode, retry_after: Option<u64>, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.status.or(b.message))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string()
            });

        Self {
            status,
            retry_after,
            message: format!("HTTP {}: {}", status.as_u16(), detail),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    pub fn retry_after(&self) -> Option<Duration> {
        if !self.is_rate_limited() {
            return None;
        }
        Some(Duration::from_secs(
            self.retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        ))
    }

    pub fn to_herodex_error(&self) -> HerodexError {
        if let Some(wait) = self.retry_after() {
            return HerodexError::RateLimited(wait.as_secs());
        }
        match self.status {
            StatusCode::UNAUTHORIZED | StatusCode::CONFLICT
                if self.message.to_lowercase().contains("key")
                    || self.message.to_lowercase().contains("hash") =>
            {
                HerodexError::Auth(format!("catalog rejected credentials: {}", self.message))
            }
            _ => HerodexError::Api(format!("catalog API error: {}", self.message)),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ApiError> for HerodexError {
    fn from(error: ApiError) -> Self {
        error.to_herodex_error()
    }
}
