//! Health-check stub for deployment monitoring.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}

#[must_use]
pub fn health_status() -> HealthStatus {
    HealthStatus {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: env!("CARGO_PKG_VERSION"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_healthy_with_parseable_timestamp() {
        let health = health_status();
        assert_eq!(health.status, "healthy");
        assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
        assert!(!health.version.is_empty());
    }
}
