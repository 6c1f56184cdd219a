//! Normalized error taxonomy for the ChainIntel API client.

use chrono::{SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Construction-time configuration failures.
///
/// These abort client construction; they never occur at call time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key is required and cannot be empty")]
    MissingApiKey,

    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Normalized failure value produced for every failed API call.
///
/// `code` belongs to a closed taxonomy:
/// - `HTTP_<status>` when the remote responded with a non-success status
/// - `NETWORK_ERROR` when the request was sent but no response arrived
/// - `REQUEST_ERROR` when the request never left the process
#[derive(Debug, Clone, Error, Serialize)]
#[error("{code}: {message}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// RFC 3339 timestamp stamped at normalization time.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiError {
    pub(crate) fn http(status: StatusCode, body: Value, request_id: Option<String>) -> Self {
        Self {
            code: format!("HTTP_{}", status.as_u16()),
            message: status_message(status, &body),
            details: Some(body),
            timestamp: now_rfc3339(),
            request_id,
        }
    }

    pub(crate) fn network() -> Self {
        Self {
            code: "NETWORK_ERROR".to_string(),
            message: "Network error: Unable to reach the ChainIntel API. Please check your \
                      internet connection."
                .to_string(),
            details: None,
            timestamp: now_rfc3339(),
            request_id: None,
        }
    }

    pub(crate) fn request(message: impl AsRef<str>) -> Self {
        Self {
            code: "REQUEST_ERROR".to_string(),
            message: format!("Request setup error: {}", message.as_ref()),
            details: None,
            timestamp: now_rfc3339(),
            request_id: None,
        }
    }

    /// Whether a caller may retry the failed call.
    ///
    /// Network failures, rate limiting, and transient upstream errors are
    /// retryable; all other codes are terminal.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.code.as_str(),
            "NETWORK_ERROR" | "HTTP_429" | "HTTP_500" | "HTTP_502" | "HTTP_503" | "HTTP_504"
        )
    }
}

fn status_message(status: StatusCode, body: &Value) -> String {
    match status.as_u16() {
        401 => "Authentication failed. Please check your API key is valid and has not expired."
            .to_string(),
        403 => "Access forbidden. Your API key may not have permission for this operation."
            .to_string(),
        404 => "Resource not found. Please check the endpoint URL and parameters.".to_string(),
        429 => "Rate limit exceeded. Please wait before making more requests.".to_string(),
        500 => "ChainIntel API server error. Please try again later.".to_string(),
        502 | 503 | 504 => {
            "ChainIntel API temporarily unavailable. Please try again later.".to_string()
        }
        s => body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {s} error occurred")),
    }
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Result type alias for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http_error(status: u16, body: Value) -> ApiError {
        ApiError::http(
            StatusCode::from_u16(status).expect("valid status"),
            body,
            None,
        )
    }

    #[test]
    fn retryable_codes_are_classified() {
        for status in [429, 500, 502, 503, 504] {
            assert!(http_error(status, Value::Null).is_retryable(), "{status}");
        }
        assert!(ApiError::network().is_retryable());

        for status in [400, 401, 403, 404] {
            assert!(!http_error(status, Value::Null).is_retryable(), "{status}");
        }
        assert!(!ApiError::request("bad setup").is_retryable());
    }

    #[test]
    fn status_codes_map_to_fixed_messages() {
        assert!(http_error(401, Value::Null)
            .message
            .contains("Authentication failed"));
        assert!(http_error(403, Value::Null)
            .message
            .contains("Access forbidden"));
        assert!(http_error(404, Value::Null)
            .message
            .contains("Resource not found"));
        assert!(http_error(429, Value::Null)
            .message
            .contains("Rate limit exceeded"));
        assert!(http_error(500, Value::Null).message.contains("server error"));
        for status in [502, 503, 504] {
            assert!(
                http_error(status, Value::Null)
                    .message
                    .contains("temporarily unavailable"),
                "{status}"
            );
        }
    }

    #[test]
    fn unknown_status_prefers_body_message_then_error_then_fallback() {
        let e = http_error(418, json!({"message": "teapot refused"}));
        assert_eq!(e.code, "HTTP_418");
        assert_eq!(e.message, "teapot refused");

        let e = http_error(418, json!({"error": "short and stout"}));
        assert_eq!(e.message, "short and stout");

        let e = http_error(418, json!({}));
        assert_eq!(e.message, "HTTP 418 error occurred");
    }

    #[test]
    fn timestamps_are_parseable_rfc3339() {
        let e = ApiError::network();
        assert!(chrono::DateTime::parse_from_rfc3339(&e.timestamp).is_ok());
    }

    #[test]
    fn serializes_with_camel_case_and_optional_fields_omitted() {
        let e = ApiError::network();
        let v = serde_json::to_value(&e).expect("serializes");
        assert_eq!(v["code"], "NETWORK_ERROR");
        assert!(v.get("details").is_none());
        assert!(v.get("requestId").is_none());

        let e = ApiError::http(
            StatusCode::UNAUTHORIZED,
            json!({"reason": "expired"}),
            Some("req-1".to_string()),
        );
        let v = serde_json::to_value(&e).expect("serializes");
        assert_eq!(v["requestId"], "req-1");
        assert_eq!(v["details"]["reason"], "expired");
    }
}
