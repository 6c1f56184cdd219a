//! Per-tool input validation.
//!
//! All checks run before any network call is made. Failures carry
//! descriptive, user-facing messages; they are a separate family from the
//! gateway's coded error taxonomy.

use thiserror::Error;

/// A validation failure with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

fn fail(message: impl Into<String>) -> ValidationError {
    ValidationError(message.into())
}

/// Validate an address for a network, keyed case-insensitively.
///
/// Total over both inputs: every (address, network) pair either passes or
/// fails with exactly one of the messages below. The length floor is
/// checked before any network-specific rule.
///
/// # Errors
///
/// Returns a [`ValidationError`] describing the first rule the address
/// violates.
pub fn validate_address(address: &str, network: &str) -> Result<(), ValidationError> {
    if address.is_empty() {
        return Err(fail("Address is required and must be a string"));
    }
    if address.len() < 10 {
        return Err(fail("Address appears to be too short to be valid"));
    }

    match network.to_lowercase().as_str() {
        "ethereum" | "polygon" | "arbitrum" | "optimism" => {
            if !address.starts_with("0x") || address.len() != 42 {
                return Err(fail(format!(
                    "Invalid Ethereum-compatible address format for {network}"
                )));
            }
        }
        "solana" => {
            if address.len() < 32 || address.len() > 44 {
                return Err(fail("Invalid Solana address format"));
            }
        }
        "cosmos" | "osmosis" => {
            if !address
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            {
                return Err(fail(format!(
                    "Invalid Cosmos-compatible address format for {network}"
                )));
            }
        }
        _ => {
            if address.len() < 10 || address.len() > 100 {
                return Err(fail(format!(
                    "Address length seems invalid for network {network}"
                )));
            }
        }
    }

    Ok(())
}

/// # Errors
///
/// Fails unless `limit` lies in `[1, 1000]`.
pub fn validate_limit(limit: i64) -> Result<(), ValidationError> {
    if !(1..=1000).contains(&limit) {
        return Err(fail("Limit must be between 1 and 1000"));
    }
    Ok(())
}

/// # Errors
///
/// Fails unless `offset` is non-negative.
pub fn validate_offset(offset: i64) -> Result<(), ValidationError> {
    if offset < 0 {
        return Err(fail("Offset must be non-negative"));
    }
    Ok(())
}

/// Check that a time filter parses as an ISO 8601 date or instant.
///
/// Accepts full RFC 3339 timestamps, naive date-times without an offset,
/// and calendar dates like `2023-01-01`.
///
/// # Errors
///
/// Fails with a message naming the field.
pub fn validate_iso8601(field: &str, value: &str) -> Result<(), ValidationError> {
    let parses = chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    if parses {
        Ok(())
    } else {
        Err(fail(format!("{field} must be a valid ISO 8601 date string")))
    }
}

/// # Errors
///
/// Fails unless `direction` is `incoming` or `outgoing`.
pub fn validate_transfer_direction(direction: &str) -> Result<(), ValidationError> {
    if !["incoming", "outgoing"].contains(&direction) {
        return Err(fail(r#"Direction must be either "incoming" or "outgoing""#));
    }
    Ok(())
}

/// # Errors
///
/// Fails unless `direction` is `incoming`, `outgoing`, or `both`.
pub fn validate_payment_direction(direction: &str) -> Result<(), ValidationError> {
    if !["incoming", "outgoing", "both"].contains(&direction) {
        return Err(fail(
            r#"Direction must be one of "incoming", "outgoing", or "both""#,
        ));
    }
    Ok(())
}

/// # Errors
///
/// Fails unless `sort` is `asc` or `desc`.
pub fn validate_sort_order(sort: &str) -> Result<(), ValidationError> {
    if !["asc", "desc"].contains(&sort) {
        return Err(fail(r#"Sort must be either "asc" or "desc""#));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ethereum_compatible_addresses_need_0x_and_42_chars() {
        let valid = format!("0x{}", "a".repeat(40));
        for network in ["ethereum", "polygon", "arbitrum", "optimism", "Ethereum"] {
            validate_address(&valid, network).expect("valid address");
        }

        let short = format!("0x{}", "a".repeat(37));
        let err = validate_address(&short, "ethereum").unwrap_err();
        assert_eq!(
            err.0,
            "Invalid Ethereum-compatible address format for ethereum"
        );

        let no_prefix = "a".repeat(42);
        assert!(validate_address(&no_prefix, "ethereum").is_err());
    }

    #[test]
    fn solana_addresses_need_length_32_to_44() {
        validate_address(&"A".repeat(35), "solana").expect("valid address");
        validate_address(&"A".repeat(32), "solana").expect("lower bound");
        validate_address(&"A".repeat(44), "solana").expect("upper bound");

        let err = validate_address(&"A".repeat(20), "solana").unwrap_err();
        assert_eq!(err.0, "Invalid Solana address format");
        assert!(validate_address(&"A".repeat(45), "solana").is_err());
    }

    #[test]
    fn cosmos_addresses_need_lowercase_alphanumeric() {
        validate_address("cosmos1abcdef234", "cosmos").expect("valid address");
        validate_address("osmo1qwerty890", "osmosis").expect("valid address");

        let err = validate_address("Cosmos1ABCdef234", "cosmos").unwrap_err();
        assert_eq!(err.0, "Invalid Cosmos-compatible address format for cosmos");
    }

    #[test]
    fn unknown_networks_only_check_length() {
        validate_address(&"x".repeat(10), "stellar").expect("lower bound");
        validate_address(&"x".repeat(100), "stellar").expect("upper bound");

        let err = validate_address(&"x".repeat(101), "stellar").unwrap_err();
        assert_eq!(err.0, "Address length seems invalid for network stellar");
    }

    #[test]
    fn too_short_check_precedes_network_rules() {
        for network in ["ethereum", "solana", "cosmos", "stellar"] {
            let err = validate_address("0x123", network).unwrap_err();
            assert_eq!(err.0, "Address appears to be too short to be valid");
        }
        let err = validate_address("", "ethereum").unwrap_err();
        assert_eq!(err.0, "Address is required and must be a string");
    }

    #[test]
    fn limit_and_offset_bounds() {
        validate_limit(1).expect("lower bound");
        validate_limit(1000).expect("upper bound");
        for bad in [0, -5, 1001] {
            let err = validate_limit(bad).unwrap_err();
            assert_eq!(err.0, "Limit must be between 1 and 1000");
        }

        validate_offset(0).expect("zero");
        let err = validate_offset(-1).unwrap_err();
        assert_eq!(err.0, "Offset must be non-negative");
    }

    #[test]
    fn iso8601_filters_are_parse_checked() {
        validate_iso8601("startTime", "2023-01-01T00:00:00Z").expect("valid");
        validate_iso8601("endTime", "2023-12-31T23:59:59+02:00").expect("valid with offset");
        validate_iso8601("startTime", "2023-01-01").expect("date only");
        validate_iso8601("endTime", "2023-06-15T08:30:00").expect("naive date-time");
        validate_iso8601("endTime", "2023-06-15T08:30:00.250").expect("fractional seconds");

        let err = validate_iso8601("startTime", "yesterday").unwrap_err();
        assert_eq!(err.0, "startTime must be a valid ISO 8601 date string");
        assert!(validate_iso8601("startTime", "2023-13-01").is_err());
    }

    #[test]
    fn direction_and_sort_enumerations() {
        validate_transfer_direction("incoming").expect("valid");
        assert!(validate_transfer_direction("both").is_err());

        validate_payment_direction("both").expect("valid");
        assert!(validate_payment_direction("sideways").is_err());

        validate_sort_order("asc").expect("valid");
        validate_sort_order("desc").expect("valid");
        assert!(validate_sort_order("descending").is_err());
    }
}
