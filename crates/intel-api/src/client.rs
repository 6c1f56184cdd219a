//! Authenticated HTTP client with uniform error normalization.
//!
//! Every request carries a bearer token from the configuration; every
//! outcome passes through the same normalization path regardless of verb:
//! successes become [`ApiResponse`], failures become [`ApiError`]. No other
//! failure shape crosses this boundary.

use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("chainintel-mcp/", env!("CARGO_PKG_VERSION"));

const REQUEST_ID_HEADER: &str = "x-request-id";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate-limit metadata from response headers.
///
/// Attached to a success only when both headers are present and parse as
/// integers. Absence means "unknown", not "unlimited".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub remaining: u64,
    pub reset_epoch_seconds: u64,
}

/// Successful response payload.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub data: Value,
    pub rate_limit: Option<RateLimitInfo>,
}

/// Long-lived authenticated client for the ChainIntel API.
///
/// Owns a single `reqwest::Client` (and its connection pool); safe to share
/// across concurrent tool calls. Holds no per-call state.
pub struct IntelClient {
    http: Client,
    config: ApiConfig,
}

impl IntelClient {
    /// Build a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be encoded as a header value
    /// or the underlying HTTP client fails to build.
    pub fn new(config: ApiConfig) -> std::result::Result<Self, ConfigError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key()))
            .map_err(|e| ConfigError::Client(format!("API key is not a valid header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Masked API key for logs and liveness output; never the raw key.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        self.config.masked_api_key()
    }

    /// Perform a GET request.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] for any failure.
    pub async fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<ApiResponse> {
        self.execute(Method::GET, endpoint, params, None).await
    }

    /// Perform a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] for any failure.
    pub async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        params: &[(String, String)],
    ) -> Result<ApiResponse> {
        self.execute(Method::POST, endpoint, params, Some(body)).await
    }

    /// Perform a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] for any failure.
    pub async fn put(&self, endpoint: &str, body: &Value) -> Result<ApiResponse> {
        self.execute(Method::PUT, endpoint, &[], Some(body)).await
    }

    /// Perform a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] for any failure.
    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse> {
        self.execute(Method::DELETE, endpoint, &[], None).await
    }

    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = self.endpoint_url(endpoint);
        debug!(method = %method, url = %url, "api request");

        let mut request = self.http.request(method, &url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => return Err(normalize_transport_error(&e)),
        };

        let status = response.status();
        debug!(status = status.as_u16(), url = %url, "api response");

        if status.is_success() {
            let rate_limit = extract_rate_limit(response.headers());
            let data = read_body(response).await;
            Ok(ApiResponse { data, rate_limit })
        } else {
            let request_id = response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = read_body(response).await;
            warn!(status = status.as_u16(), url = %url, "api error response");
            Err(ApiError::http(status, body, request_id))
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.config.base_url().trim_end_matches('/');
        if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        }
    }
}

/// Classify a transport-level failure into the closed taxonomy.
///
/// Builder failures mean the request never left the process; everything
/// else after `send` is connectivity.
fn normalize_transport_error(e: &reqwest::Error) -> ApiError {
    let detail = sanitize_reqwest_error(e);
    if e.is_builder() {
        warn!(error = %detail, "api request setup error");
        ApiError::request(detail)
    } else {
        warn!(error = %detail, "api network error");
        ApiError::network()
    }
}

fn extract_rate_limit(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = header_u64(headers, RATE_LIMIT_REMAINING_HEADER)?;
    let reset_epoch_seconds = header_u64(headers, RATE_LIMIT_RESET_HEADER)?;
    Some(RateLimitInfo {
        remaining,
        reset_epoch_seconds,
    })
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

async fn read_body(response: reqwest::Response) -> Value {
    let Ok(bytes) = response.bytes().await else {
        return Value::Null;
    };
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(u) = e.url() {
        msg = msg.replace(u.as_str(), &redact_url(u));
    }
    msg
}

fn redact_url(url: &Url) -> String {
    let mut u = url.clone();
    // Best-effort: drop credentials + query + fragment.
    let _ = u.set_username("");
    let _ = u.set_password(None);
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderName;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(
                k.parse::<HeaderName>().expect("header name"),
                v.parse().expect("header value"),
            );
        }
        map
    }

    #[test]
    fn rate_limit_requires_both_headers() {
        let both = headers(&[
            (RATE_LIMIT_REMAINING_HEADER, "42"),
            (RATE_LIMIT_RESET_HEADER, "1700000000"),
        ]);
        assert_eq!(
            extract_rate_limit(&both),
            Some(RateLimitInfo {
                remaining: 42,
                reset_epoch_seconds: 1_700_000_000,
            })
        );

        let remaining_only = headers(&[(RATE_LIMIT_REMAINING_HEADER, "42")]);
        assert_eq!(extract_rate_limit(&remaining_only), None);

        let unparsable = headers(&[
            (RATE_LIMIT_REMAINING_HEADER, "lots"),
            (RATE_LIMIT_RESET_HEADER, "1700000000"),
        ]);
        assert_eq!(extract_rate_limit(&unparsable), None);
    }

    #[test]
    fn endpoint_urls_join_without_duplicate_slashes() {
        let config = ApiConfig::new(
            "key-12345",
            "https://api.example.com/",
            ApiConfig::DEFAULT_TIMEOUT,
        )
        .expect("valid config");
        let client = IntelClient::new(config).expect("client");
        assert_eq!(
            client.endpoint_url("/v1/address"),
            "https://api.example.com/v1/address"
        );
        assert_eq!(
            client.endpoint_url("v1/address"),
            "https://api.example.com/v1/address"
        );
    }

    #[test]
    fn redacted_urls_drop_query_and_credentials() {
        let url = Url::parse("https://user:pw@api.example.com/v1/address?apiKey=secret")
            .expect("url");
        let redacted = redact_url(&url);
        assert!(!redacted.contains("secret"));
        assert!(!redacted.contains("user"));
        assert!(redacted.contains("/v1/address"));
    }
}
