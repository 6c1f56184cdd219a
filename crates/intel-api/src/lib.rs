//! HTTP client for the ChainIntel blockchain-intelligence API.
//!
//! This crate is the sole owner of outbound HTTP communication for the
//! `chainintel-mcp` server. It provides:
//! - [`IntelClient`]: a long-lived authenticated client with GET/POST/PUT/DELETE
//! - [`ApiError`]: a closed error taxonomy replacing raw transport failures
//! - [`RateLimitInfo`]: rate-limit metadata extracted from response headers
//! - [`BackoffPolicy`]: a retry schedule for callers that orchestrate retries
//!
//! The client performs **no** retries itself; retry orchestration is a caller
//! concern, informed by [`ApiError::is_retryable`] and [`BackoffPolicy::delay`].

pub mod client;
pub mod config;
pub mod error;
pub mod retry;

pub use client::{ApiResponse, IntelClient, RateLimitInfo};
pub use config::ApiConfig;
pub use error::{ApiError, ConfigError};
pub use retry::BackoffPolicy;
