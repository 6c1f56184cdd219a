//! Static tool catalog: names, descriptions, and JSON-schema parameter
//! declarations for every tool the server exposes.
//!
//! Schema defaults here match the defaults the dispatcher applies before
//! validation, and every schema is closed (`additionalProperties: false`)
//! because the dispatcher rejects unknown fields. The catalog is metadata
//! only and performs no validation itself.

use rmcp::model::Tool;
use serde_json::{json, Value};
use std::sync::Arc;

fn tool(name: &'static str, description: &'static str, schema: Value) -> Tool {
    let schema_obj = schema.as_object().cloned().unwrap_or_default();
    Tool::new(name, description, Arc::new(schema_obj))
}

/// All tools exposed by this server, in listing order.
#[must_use]
pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "ping",
            "Test connectivity to the ChainIntel MCP server",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {},
                "required": [],
            }),
        ),
        tool(
            "getAddressInfo",
            "Get information about a blockchain address including network and labels",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The blockchain address to query"
                    },
                    "network": {
                        "type": "string",
                        "description": "The blockchain network (e.g., ethereum, solana, cosmos)",
                        "default": "solana"
                    }
                },
                "required": ["address"],
            }),
        ),
        tool(
            "getAddressBalance",
            "Get current token balances for a blockchain address",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The blockchain address to query"
                    },
                    "network": {
                        "type": "string",
                        "description": "The blockchain network (e.g., ethereum, solana, cosmos)",
                        "default": "solana"
                    }
                },
                "required": ["address"],
            }),
        ),
        tool(
            "getAddressTransactions",
            "Get transaction history for a blockchain address",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The blockchain address to query"
                    },
                    "network": {
                        "type": "string",
                        "description": "The blockchain network (e.g., ethereum, solana, cosmos)",
                        "default": "solana"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of transactions to return",
                        "default": 100,
                        "minimum": 1,
                        "maximum": 1000
                    },
                    "offset": {
                        "type": "number",
                        "description": "Number of transactions to skip for pagination",
                        "default": 0,
                        "minimum": 0
                    }
                },
                "required": ["address"],
            }),
        ),
        tool(
            "getAddressCounterparties",
            "Get addresses that the specified address has interacted with",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The blockchain address to query"
                    },
                    "network": {
                        "type": "string",
                        "description": "The blockchain network (e.g., ethereum, solana, cosmos)",
                        "default": "ethereum"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of counterparties to return",
                        "default": 100,
                        "minimum": 1,
                        "maximum": 1000
                    }
                },
                "required": ["address"],
            }),
        ),
        tool(
            "getAddressRiskScore",
            "Get risk score for a blockchain address using network proximity analysis, ML, and \
             behavioral pattern recognition. Returns riskScore (1-10), riskLevel, numHops to \
             malicious addresses, and detailed reasoning.",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The blockchain address to assess"
                    },
                    "network": {
                        "type": "string",
                        "description": "Network identifier (solana, celestia, osmosis-1, dydx-mainnet-1, cosmoshub-4, neutron-1, noble-1, stellar, eth, etc.)",
                        "default": "solana"
                    }
                },
                "required": ["address", "network"],
            }),
        ),
        tool(
            "getTransactionDetails",
            "Get detailed information about a specific transaction",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "hash": {
                        "type": "string",
                        "description": "The transaction hash to query"
                    },
                    "network": {
                        "type": "string",
                        "description": "The blockchain network (e.g., ethereum, solana, cosmos)",
                        "default": "ethereum"
                    }
                },
                "required": ["hash"],
            }),
        ),
        tool(
            "getTransactionRisk",
            "Get risk assessment for a specific transaction",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "hash": {
                        "type": "string",
                        "description": "The transaction hash to assess"
                    },
                    "network": {
                        "type": "string",
                        "description": "The blockchain network (e.g., ethereum, solana, cosmos)",
                        "default": "ethereum"
                    }
                },
                "required": ["hash"],
            }),
        ),
        tool(
            "simulateTransaction",
            "Simulate a transaction before execution to assess risks and outcomes",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "from": {
                        "type": "string",
                        "description": "The sender address"
                    },
                    "to": {
                        "type": "string",
                        "description": "The recipient address"
                    },
                    "value": {
                        "type": "string",
                        "description": "The amount to transfer (in wei for Ethereum)"
                    },
                    "network": {
                        "type": "string",
                        "description": "The blockchain network (e.g., ethereum, solana, cosmos)",
                        "default": "ethereum"
                    },
                    "data": {
                        "type": "string",
                        "description": "Optional transaction data (for contract calls)",
                        "default": "0x"
                    }
                },
                "required": ["from", "to", "value"],
            }),
        ),
        tool(
            "trackTransactionStatus",
            "Track the status of a transaction across networks",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "hash": {
                        "type": "string",
                        "description": "The transaction hash to track"
                    },
                    "network": {
                        "type": "string",
                        "description": "The blockchain network (e.g., ethereum, solana, cosmos)",
                        "default": "ethereum"
                    },
                    "quoteId": {
                        "type": "string",
                        "description": "Optional quote ID if the transaction originated from a quote"
                    }
                },
                "required": ["hash"],
            }),
        ),
        tool(
            "getCrossChainTransactions",
            "Get cross-chain transactions with filters for protocol, address, networks, assets, \
             and time range",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "protocol": {
                        "type": "string",
                        "description": "Protocol type filter (e.g., IBC, CCTP)"
                    },
                    "address": {
                        "type": "string",
                        "description": "Address filter"
                    },
                    "senderNetwork": {
                        "type": "string",
                        "description": "Sender network filter (e.g., cosmoshub-4)"
                    },
                    "receiverNetwork": {
                        "type": "string",
                        "description": "Receiver network filter (e.g., osmosis-1)"
                    },
                    "asset": {
                        "type": "string",
                        "description": "Asset filter (e.g., uatom)"
                    },
                    "startTime": {
                        "type": "string",
                        "description": "Start time filter (ISO 8601 string, e.g., 2023-01-01T00:00:00Z)"
                    },
                    "endTime": {
                        "type": "string",
                        "description": "End time filter (ISO 8601 string, e.g., 2023-12-31T23:59:59Z)"
                    },
                    "direction": {
                        "type": "string",
                        "enum": ["incoming", "outgoing"],
                        "description": "Direction filter (incoming/outgoing)"
                    },
                    "page": {
                        "type": "number",
                        "description": "Page number offset",
                        "default": 0
                    },
                    "pageSize": {
                        "type": "number",
                        "description": "Page size",
                        "default": 100
                    },
                    "useScroll": {
                        "type": "boolean",
                        "description": "Whether to use scroll API for pagination",
                        "default": false
                    },
                    "scrollId": {
                        "type": "string",
                        "description": "Scroll ID for pagination continuation (only when useScroll=true)"
                    }
                },
                "required": [],
            }),
        ),
        tool(
            "searchAddresses",
            "Search for addresses by network and status (malicious, blacklisted, sanctioned)",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "networks": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of blockchain networks to filter by (e.g., ethereum, solana)"
                    },
                    "status": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": ["malicious", "blacklisted", "sanctioned"]
                        },
                        "description": "List of address statuses to filter by"
                    }
                },
                "required": [],
            }),
        ),
        tool(
            "searchAddressLabels",
            "Search for address labels by networks, addresses, or search string",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "networks": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of blockchain networks to filter by"
                    },
                    "addresses": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of addresses to filter by"
                    },
                    "searchString": {
                        "type": "string",
                        "description": "Substring to search for in addresses or labels (case insensitive)"
                    },
                    "includeNft": {
                        "type": "boolean",
                        "description": "Include NFT addresses in results",
                        "default": false
                    }
                },
                "required": [],
            }),
        ),
        tool(
            "getAddressStats",
            "Get first and last interaction dates for an address on a network",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The blockchain address to query"
                    },
                    "network": {
                        "type": "string",
                        "description": "The blockchain network"
                    }
                },
                "required": ["address", "network"],
            }),
        ),
        tool(
            "getAddressPayments",
            "Get payment transactions for an address with filtering options",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The blockchain address to query"
                    },
                    "network": {
                        "type": "string",
                        "description": "Network of the address"
                    },
                    "receiver": {
                        "type": "string",
                        "description": "Filter by receiver address"
                    },
                    "receiverNetwork": {
                        "type": "string",
                        "description": "Network of the receiver address"
                    },
                    "startTime": {
                        "type": "string",
                        "description": "Start time filter (ISO 8601)"
                    },
                    "endTime": {
                        "type": "string",
                        "description": "End time filter (ISO 8601)"
                    },
                    "direction": {
                        "type": "string",
                        "enum": ["incoming", "outgoing", "both"],
                        "description": "Direction of payments",
                        "default": "both"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Number of items to return",
                        "default": 50
                    },
                    "offset": {
                        "type": "number",
                        "description": "Number of items to skip",
                        "default": 0
                    },
                    "sort": {
                        "type": "string",
                        "enum": ["asc", "desc"],
                        "description": "Sort order",
                        "default": "desc"
                    }
                },
                "required": ["address"],
            }),
        ),
        tool(
            "getTransactionCounts",
            "Get transaction counts aggregated by day for specified addresses",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "addresses": {
                        "type": "string",
                        "description": "Comma-separated list of addresses"
                    }
                },
                "required": ["addresses"],
            }),
        ),
        tool(
            "getTokenTransfers",
            "Search token transfers with comprehensive filtering options",
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "explorer": {
                        "type": "string",
                        "description": "Explorer/network (e.g., solana)"
                    },
                    "network": {
                        "type": "string",
                        "description": "Specific network to filter transfers"
                    },
                    "address": {
                        "type": "string",
                        "description": "Specific address to filter transfers"
                    },
                    "tx_hash": {
                        "type": "string",
                        "description": "Transaction hash to filter by"
                    },
                    "source_networks": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Source networks (e.g., eth, solana)"
                    },
                    "destination_networks": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Destination networks"
                    },
                    "status": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": ["SUCCEEDED", "PENDING", "ERROR_ON_DESTINATION", "TIMEOUT"]
                        },
                        "description": "Transfer status filter"
                    },
                    "bridges": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Bridges used (e.g., ibc, cctp)"
                    },
                    "token_symbols": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Token symbols (e.g., USDC, DAI)"
                    },
                    "min_usd": {
                        "type": "number",
                        "description": "Minimum USD amount"
                    },
                    "max_usd": {
                        "type": "number",
                        "description": "Maximum USD amount"
                    },
                    "start_time": {
                        "type": "string",
                        "description": "Start time (ISO 8601)"
                    },
                    "end_time": {
                        "type": "string",
                        "description": "End time (ISO 8601)"
                    },
                    "scope": {
                        "type": "string",
                        "enum": ["INTERCHAIN", "INTRACHAIN", "ALL"],
                        "description": "Transfer scope"
                    },
                    "size": {
                        "type": "number",
                        "description": "Page size (1-100)",
                        "default": 25
                    },
                    "cursor": {
                        "type": "string",
                        "description": "Pagination cursor"
                    }
                },
                "required": [],
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn catalog_has_unique_names() {
        let tools = tools();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
        assert_eq!(before, 17);
    }

    #[test]
    fn address_tools_require_address() {
        let tools = tools();
        for name in [
            "getAddressInfo",
            "getAddressBalance",
            "getAddressTransactions",
            "getAddressCounterparties",
            "getAddressPayments",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("{name} in catalog"));
            let required = tool
                .input_schema
                .get("required")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            assert!(required.contains(&Value::String("address".into())), "{name}");
        }
    }

    #[test]
    fn every_schema_is_a_closed_object_schema() {
        for tool in tools() {
            assert_eq!(
                tool.input_schema.get("type").and_then(Value::as_str),
                Some("object"),
                "{}",
                tool.name
            );
            assert_eq!(
                tool.input_schema.get("additionalProperties"),
                Some(&Value::Bool(false)),
                "{}",
                tool.name
            );
        }
    }
}
