//! Tool dispatch: routes a tool call by name to its handler, validates
//! arguments, performs the upstream request, and shapes the result into a
//! JSON envelope.
//!
//! Each tool deserializes its argument bag into a typed request struct
//! (unknown and mistyped fields are rejected) before any validation or
//! network activity. Handlers never panic and never return a
//! protocol-level error; every outcome becomes a [`CallToolResult`], with
//! `is_error` set for failures so the calling model can read the envelope
//! and react.

use crate::health::health_status;
use crate::validate::{
    validate_address, validate_iso8601, validate_limit, validate_offset,
    validate_payment_direction, validate_sort_order, validate_transfer_direction, ValidationError,
};
use chainintel_api::{ApiError, IntelClient};
use chrono::{SecondsFormat, Utc};
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Why a tool call failed before or during the upstream request.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    fn code(&self) -> &str {
        match self {
            ToolError::Invalid(_) => "VALIDATION_ERROR",
            ToolError::Api(e) => &e.code,
            ToolError::UnknownTool(_) => "UNKNOWN_TOOL",
        }
    }

    fn message(&self) -> String {
        match self {
            ToolError::Api(e) => e.message.clone(),
            other => other.to_string(),
        }
    }
}

/// Dispatch one tool call. Infallible at the protocol level.
pub async fn call(client: &IntelClient, name: &str, args: JsonObject) -> CallToolResult {
    match run_tool(client, name, args).await {
        Ok(envelope) => CallToolResult::success(vec![Content::text(pretty(&envelope))]),
        Err(err) => {
            tracing::warn!(tool = name, code = err.code(), "tool call failed");
            let envelope = json!({
                "error": err.code(),
                "message": err.message(),
                "tool": name,
                "timestamp": now_iso(),
            });
            CallToolResult {
                content: vec![Content::text(pretty(&envelope))],
                structured_content: None,
                is_error: Some(true),
                meta: None,
            }
        }
    }
}

async fn run_tool(client: &IntelClient, name: &str, args: JsonObject) -> Result<Value, ToolError> {
    match name {
        "ping" => Ok(ping(client)),
        "getAddressInfo" => address_lookup(client, parse(args)?, "/v1/address").await,
        "getAddressBalance" => address_lookup(client, parse(args)?, "/v1/address/balance").await,
        "getAddressTransactions" => address_transactions(client, parse(args)?).await,
        "getAddressCounterparties" => address_counterparties(client, parse(args)?).await,
        "getAddressRiskScore" => address_lookup(client, parse(args)?, "/v1/risk/address").await,
        "getTransactionDetails" => transaction_details(client, parse(args)?).await,
        "getTransactionRisk" => transaction_risk(client, parse(args)?).await,
        "simulateTransaction" => simulate_transaction(client, parse(args)?).await,
        "trackTransactionStatus" => track_transaction_status(client, parse(args)?).await,
        "getCrossChainTransactions" => cross_chain_transactions(client, parse(args)?).await,
        "searchAddresses" => search_addresses(client, parse(args)?).await,
        "searchAddressLabels" => search_address_labels(client, parse(args)?).await,
        "getAddressStats" => address_stats(client, parse(args)?).await,
        "getAddressPayments" => address_payments(client, parse(args)?).await,
        "getTransactionCounts" => transaction_counts(client, parse(args)?).await,
        "getTokenTransfers" => token_transfers(client, parse(args)?).await,
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

/// Deserialize the argument bag into a tool's typed request struct.
fn parse<T: DeserializeOwned>(args: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| ValidationError(format!("Invalid arguments: {e}")).into())
}

fn require(value: Option<String>, message: &str) -> Result<String, ToolError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError(message.to_string()).into()),
    }
}

fn ping(client: &IntelClient) -> Value {
    let health = health_status();
    json!({
        "status": health.status,
        "message": "ChainIntel MCP server is running",
        "timestamp": health.timestamp,
        "server": "chainintel-mcp",
        "version": health.version,
        "apiEndpoint": client.base_url(),
        "apiKey": client.masked_api_key(),
    })
}

fn default_solana() -> String {
    "solana".to_string()
}

fn default_ethereum() -> String {
    "ethereum".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddressLookupArgs {
    #[serde(default)]
    address: String,
    #[serde(default = "default_solana")]
    network: String,
}

/// Shared shape of the simple address lookups: validate, query by
/// `?address=X&network=Y`, echo both inputs back.
async fn address_lookup(
    client: &IntelClient,
    args: AddressLookupArgs,
    endpoint: &str,
) -> Result<Value, ToolError> {
    validate_address(&args.address, &args.network)?;

    let mut query = QueryParams::new();
    query.push("address", &args.address);
    query.push("network", &args.network);
    let response = client.get(endpoint, query.as_slice()).await?;

    Ok(json!({
        "success": true,
        "data": response.data,
        "address": args.address,
        "network": args.network,
        "timestamp": now_iso(),
    }))
}

fn default_limit_100() -> i64 {
    100
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddressTransactionsArgs {
    #[serde(default)]
    address: String,
    #[serde(default = "default_solana")]
    network: String,
    #[serde(default = "default_limit_100")]
    limit: i64,
    #[serde(default)]
    offset: i64,
}

async fn address_transactions(
    client: &IntelClient,
    args: AddressTransactionsArgs,
) -> Result<Value, ToolError> {
    validate_address(&args.address, &args.network)?;
    validate_limit(args.limit)?;
    validate_offset(args.offset)?;

    let mut query = QueryParams::new();
    query.push("address", &args.address);
    query.push("network", &args.network);
    query.push("limit", args.limit);
    query.push("offset", args.offset);
    let response = client.get("/v1/address/transactions", query.as_slice()).await?;

    Ok(json!({
        "success": true,
        "data": response.data,
        "address": args.address,
        "network": args.network,
        "pagination": { "limit": args.limit, "offset": args.offset },
        "timestamp": now_iso(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CounterpartiesArgs {
    #[serde(default)]
    address: String,
    #[serde(default = "default_ethereum")]
    network: String,
    #[serde(default = "default_limit_100")]
    limit: i64,
}

async fn address_counterparties(
    client: &IntelClient,
    args: CounterpartiesArgs,
) -> Result<Value, ToolError> {
    validate_address(&args.address, &args.network)?;
    validate_limit(args.limit)?;

    let mut query = QueryParams::new();
    query.push("network", &args.network);
    query.push("limit", args.limit);
    let endpoint = format!("/address/{}/counterparties", args.address);
    let response = client.get(&endpoint, query.as_slice()).await?;

    Ok(json!({
        "success": true,
        "data": response.data,
        "address": args.address,
        "network": args.network,
        "limit": args.limit,
        "timestamp": now_iso(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TransactionArgs {
    hash: Option<String>,
    #[serde(default = "default_ethereum")]
    network: String,
}

async fn transaction_details(
    client: &IntelClient,
    args: TransactionArgs,
) -> Result<Value, ToolError> {
    let hash = require(args.hash, "Transaction hash is required and must be a string")?;

    let mut query = QueryParams::new();
    query.push("hash", &hash);
    query.push("network", &args.network);
    let response = client.get("/v1/address/transaction", query.as_slice()).await?;

    Ok(json!({
        "success": true,
        "data": response.data,
        "hash": hash,
        "network": args.network,
        "timestamp": now_iso(),
    }))
}

async fn transaction_risk(client: &IntelClient, args: TransactionArgs) -> Result<Value, ToolError> {
    let hash = require(args.hash, "Transaction hash is required and must be a string")?;

    let mut query = QueryParams::new();
    query.push("network", &args.network);
    let endpoint = format!("/risk/transaction/{hash}");
    let response = client.get(&endpoint, query.as_slice()).await?;

    Ok(json!({
        "success": true,
        "data": response.data,
        "hash": hash,
        "network": args.network,
        "timestamp": now_iso(),
    }))
}

fn default_call_data() -> String {
    "0x".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SimulateArgs {
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
    value: Option<String>,
    #[serde(default = "default_ethereum")]
    network: String,
    #[serde(default = "default_call_data")]
    data: String,
}

async fn simulate_transaction(
    client: &IntelClient,
    args: SimulateArgs,
) -> Result<Value, ToolError> {
    validate_address(&args.from, &args.network)?;
    validate_address(&args.to, &args.network)?;
    let value = require(args.value, "Value is required and must be a string")?;

    let body = json!({
        "from": args.from,
        "to": args.to,
        "value": value,
        "network": args.network,
        "data": args.data,
    });
    let response = client.post("/simulate/transaction", &body, &[]).await?;

    Ok(json!({
        "success": true,
        "data": response.data,
        "simulation": {
            "from": args.from,
            "to": args.to,
            "value": value,
            "network": args.network,
            "data": args.data,
        },
        "timestamp": now_iso(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TrackStatusArgs {
    hash: Option<String>,
    #[serde(default = "default_ethereum")]
    network: String,
    quote_id: Option<String>,
}

async fn track_transaction_status(
    client: &IntelClient,
    args: TrackStatusArgs,
) -> Result<Value, ToolError> {
    let hash = require(args.hash, "Transaction hash is required and must be a string")?;
    let quote_id = args.quote_id.filter(|s| !s.is_empty());

    let mut query = QueryParams::new();
    query.push("network", &args.network);
    query.push_opt("quote_id", quote_id.as_deref());
    let endpoint = format!("/transaction/{hash}/status");
    let response = client.get(&endpoint, query.as_slice()).await?;

    let mut envelope = Map::new();
    envelope.insert("success".into(), Value::Bool(true));
    envelope.insert("data".into(), response.data);
    envelope.insert("hash".into(), hash.into());
    envelope.insert("network".into(), args.network.into());
    insert_opt(&mut envelope, "quoteId", quote_id.map(Value::from));
    envelope.insert("timestamp".into(), now_iso().into());
    Ok(Value::Object(envelope))
}

fn default_page_size() -> i64 {
    100
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CrossChainArgs {
    protocol: Option<String>,
    address: Option<String>,
    sender_network: Option<String>,
    receiver_network: Option<String>,
    asset: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    direction: Option<String>,
    #[serde(default)]
    page: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
    #[serde(default)]
    use_scroll: bool,
    scroll_id: Option<String>,
}

async fn cross_chain_transactions(
    client: &IntelClient,
    args: CrossChainArgs,
) -> Result<Value, ToolError> {
    if let Some(d) = args.direction.as_deref() {
        validate_transfer_direction(d)?;
    }
    if let Some(t) = args.start_time.as_deref() {
        validate_iso8601("startTime", t)?;
    }
    if let Some(t) = args.end_time.as_deref() {
        validate_iso8601("endTime", t)?;
    }

    let mut query = QueryParams::new();
    query.push_opt("protocol", args.protocol.as_deref());
    query.push_opt("address", args.address.as_deref());
    query.push_opt("senderNetwork", args.sender_network.as_deref());
    query.push_opt("receiverNetwork", args.receiver_network.as_deref());
    query.push_opt("asset", args.asset.as_deref());
    query.push_opt("startTime", args.start_time.as_deref());
    query.push_opt("endTime", args.end_time.as_deref());
    query.push_opt("direction", args.direction.as_deref());
    query.push("page", args.page);
    query.push("pageSize", args.page_size);
    if args.use_scroll {
        query.push("useScroll", "true");
    }

    // Scroll continuation travels in the body, everything else in the query.
    let mut body = Map::new();
    insert_opt(&mut body, "scrollId", args.scroll_id.map(Value::from));
    let response = client
        .post("/v1/protocols/transactions", &Value::Object(body), query.as_slice())
        .await?;

    let mut filters = Map::new();
    insert_opt(&mut filters, "protocol", args.protocol.map(Value::from));
    insert_opt(&mut filters, "address", args.address.map(Value::from));
    insert_opt(&mut filters, "senderNetwork", args.sender_network.map(Value::from));
    insert_opt(&mut filters, "receiverNetwork", args.receiver_network.map(Value::from));
    insert_opt(&mut filters, "asset", args.asset.map(Value::from));
    insert_opt(&mut filters, "startTime", args.start_time.map(Value::from));
    insert_opt(&mut filters, "endTime", args.end_time.map(Value::from));
    insert_opt(&mut filters, "direction", args.direction.map(Value::from));

    let mut pagination = Map::new();
    pagination.insert("page".into(), args.page.into());
    pagination.insert("pageSize".into(), args.page_size.into());
    pagination.insert("useScroll".into(), args.use_scroll.into());
    insert_opt(&mut pagination, "scrollId", response.data.get("scrollId").cloned());
    insert_opt(&mut pagination, "hasMore", response.data.get("hasMore").cloned());

    Ok(json!({
        "success": true,
        "data": response.data,
        "filters": filters,
        "pagination": pagination,
        "timestamp": now_iso(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchAddressesArgs {
    networks: Option<Vec<String>>,
    status: Option<Vec<String>>,
}

async fn search_addresses(
    client: &IntelClient,
    args: SearchAddressesArgs,
) -> Result<Value, ToolError> {
    let mut query = QueryParams::new();
    query.push_list("networks", args.networks.as_deref());
    query.push_list("status", args.status.as_deref());
    let response = client.get("/v2/addresses", query.as_slice()).await?;

    let mut filters = Map::new();
    insert_opt(&mut filters, "networks", args.networks.map(Value::from));
    insert_opt(&mut filters, "status", args.status.map(Value::from));

    Ok(json!({
        "success": true,
        "data": response.data,
        "filters": filters,
        "timestamp": now_iso(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SearchLabelsArgs {
    networks: Option<Vec<String>>,
    addresses: Option<Vec<String>>,
    search_string: Option<String>,
    #[serde(default)]
    include_nft: bool,
}

async fn search_address_labels(
    client: &IntelClient,
    args: SearchLabelsArgs,
) -> Result<Value, ToolError> {
    let search_string = args.search_string.filter(|s| !s.is_empty());

    let mut query = QueryParams::new();
    query.push("validateSearch", "true");
    query.push_list("networks", args.networks.as_deref());
    query.push_list("addresses", args.addresses.as_deref());
    query.push_opt("searchString", search_string.as_deref());
    if args.include_nft {
        query.push("includeNft", "true");
    }
    let response = client.get("/v1/address/labels/search", query.as_slice()).await?;

    let mut filters = Map::new();
    insert_opt(&mut filters, "networks", args.networks.map(Value::from));
    insert_opt(&mut filters, "addresses", args.addresses.map(Value::from));
    insert_opt(&mut filters, "searchString", search_string.map(Value::from));
    filters.insert("includeNft".into(), args.include_nft.into());

    Ok(json!({
        "success": true,
        "data": response.data,
        "filters": filters,
        "timestamp": now_iso(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddressStatsArgs {
    address: Option<String>,
    network: Option<String>,
}

async fn address_stats(client: &IntelClient, args: AddressStatsArgs) -> Result<Value, ToolError> {
    let (Some(address), Some(network)) = (
        args.address.filter(|s| !s.is_empty()),
        args.network.filter(|s| !s.is_empty()),
    ) else {
        return Err(ValidationError("Both address and network are required".into()).into());
    };

    let mut query = QueryParams::new();
    query.push("address", &address);
    query.push("network", &network);
    let response = client.get("/v1/address/stats", query.as_slice()).await?;

    Ok(json!({
        "success": true,
        "data": response.data,
        "address": address,
        "network": network,
        "timestamp": now_iso(),
    }))
}

fn default_both() -> String {
    "both".to_string()
}

fn default_limit_50() -> i64 {
    50
}

fn default_desc() -> String {
    "desc".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PaymentsArgs {
    address: Option<String>,
    network: Option<String>,
    receiver: Option<String>,
    receiver_network: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    #[serde(default = "default_both")]
    direction: String,
    #[serde(default = "default_limit_50")]
    limit: i64,
    #[serde(default)]
    offset: i64,
    #[serde(default = "default_desc")]
    sort: String,
}

async fn address_payments(client: &IntelClient, args: PaymentsArgs) -> Result<Value, ToolError> {
    let address = require(args.address, "Address is required")?;
    validate_payment_direction(&args.direction)?;
    validate_sort_order(&args.sort)?;
    if let Some(t) = args.start_time.as_deref() {
        validate_iso8601("startTime", t)?;
    }
    if let Some(t) = args.end_time.as_deref() {
        validate_iso8601("endTime", t)?;
    }

    let mut query = QueryParams::new();
    query.push("address", &address);
    query.push_opt("network", args.network.as_deref());
    query.push_opt("receiver", args.receiver.as_deref());
    query.push_opt("receiverNetwork", args.receiver_network.as_deref());
    query.push_opt("startTime", args.start_time.as_deref());
    query.push_opt("endTime", args.end_time.as_deref());
    query.push("direction", &args.direction);
    query.push("limit", args.limit);
    query.push("offset", args.offset);
    query.push("sort", &args.sort);
    let response = client.get("/v1/address/payments", query.as_slice()).await?;

    let mut filters = Map::new();
    insert_opt(&mut filters, "network", args.network.map(Value::from));
    insert_opt(&mut filters, "receiver", args.receiver.map(Value::from));
    insert_opt(&mut filters, "receiverNetwork", args.receiver_network.map(Value::from));
    insert_opt(&mut filters, "startTime", args.start_time.map(Value::from));
    insert_opt(&mut filters, "endTime", args.end_time.map(Value::from));
    filters.insert("direction".into(), args.direction.into());

    Ok(json!({
        "success": true,
        "data": response.data,
        "address": address,
        "filters": filters,
        "pagination": { "limit": args.limit, "offset": args.offset, "sort": args.sort },
        "timestamp": now_iso(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CountsArgs {
    addresses: Option<String>,
}

async fn transaction_counts(client: &IntelClient, args: CountsArgs) -> Result<Value, ToolError> {
    let addresses = require(args.addresses, "Addresses parameter is required")?;

    let mut query = QueryParams::new();
    query.push("addresses", &addresses);
    let response = client
        .get("/v1/address/transactions/counts", query.as_slice())
        .await?;

    Ok(json!({
        "success": true,
        "data": response.data,
        "addresses": addresses,
        "timestamp": now_iso(),
    }))
}

fn default_size() -> i64 {
    25
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TransfersArgs {
    explorer: Option<String>,
    network: Option<String>,
    address: Option<String>,
    tx_hash: Option<String>,
    source_networks: Option<Vec<String>>,
    destination_networks: Option<Vec<String>>,
    status: Option<Vec<String>>,
    bridges: Option<Vec<String>>,
    token_symbols: Option<Vec<String>>,
    min_usd: Option<f64>,
    max_usd: Option<f64>,
    start_time: Option<String>,
    end_time: Option<String>,
    scope: Option<String>,
    #[serde(default = "default_size")]
    size: i64,
    cursor: Option<String>,
}

#[allow(clippy::too_many_lines)]
async fn token_transfers(client: &IntelClient, args: TransfersArgs) -> Result<Value, ToolError> {
    if let Some(t) = args.start_time.as_deref() {
        validate_iso8601("start_time", t)?;
    }
    if let Some(t) = args.end_time.as_deref() {
        validate_iso8601("end_time", t)?;
    }

    let mut query = QueryParams::new();
    query.push_opt("explorer", args.explorer.as_deref());
    query.push_opt("network", args.network.as_deref());
    query.push_opt("address", args.address.as_deref());
    query.push_opt("tx_hash", args.tx_hash.as_deref());
    query.push_list("source_networks", args.source_networks.as_deref());
    query.push_list("destination_networks", args.destination_networks.as_deref());
    query.push_list("status", args.status.as_deref());
    query.push_list("bridges", args.bridges.as_deref());
    query.push_list("token_symbols", args.token_symbols.as_deref());
    if let Some(v) = args.min_usd {
        query.push("min_usd", v);
    }
    if let Some(v) = args.max_usd {
        query.push("max_usd", v);
    }
    query.push_opt("start_time", args.start_time.as_deref());
    query.push_opt("end_time", args.end_time.as_deref());
    query.push_opt("scope", args.scope.as_deref());
    query.push("size", args.size);
    query.push_opt("cursor", args.cursor.as_deref());
    let response = client.get("/v2/transfers", query.as_slice()).await?;

    let mut filters = Map::new();
    insert_opt(&mut filters, "explorer", args.explorer.map(Value::from));
    insert_opt(&mut filters, "network", args.network.map(Value::from));
    insert_opt(&mut filters, "address", args.address.map(Value::from));
    insert_opt(&mut filters, "tx_hash", args.tx_hash.map(Value::from));
    insert_opt(&mut filters, "source_networks", args.source_networks.map(Value::from));
    insert_opt(
        &mut filters,
        "destination_networks",
        args.destination_networks.map(Value::from),
    );
    insert_opt(&mut filters, "status", args.status.map(Value::from));
    insert_opt(&mut filters, "bridges", args.bridges.map(Value::from));
    insert_opt(&mut filters, "token_symbols", args.token_symbols.map(Value::from));
    insert_opt(&mut filters, "min_usd", args.min_usd.map(Value::from));
    insert_opt(&mut filters, "max_usd", args.max_usd.map(Value::from));
    insert_opt(&mut filters, "start_time", args.start_time.map(Value::from));
    insert_opt(&mut filters, "end_time", args.end_time.map(Value::from));
    insert_opt(&mut filters, "scope", args.scope.map(Value::from));

    let mut pagination = Map::new();
    pagination.insert("size".into(), args.size.into());
    insert_opt(&mut pagination, "cursor", args.cursor.map(Value::from));

    Ok(json!({
        "success": true,
        "data": response.data,
        "filters": filters,
        "pagination": pagination,
        "timestamp": now_iso(),
    }))
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v);
    }
}

/// Ordered query-string pairs, built up conditionally per handler.
#[derive(Debug, Default)]
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    /// Absent and empty values are skipped.
    fn push_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(v) = value {
            if !v.is_empty() {
                self.push(key, v);
            }
        }
    }

    /// Comma-joins a list into one pair. Empty and absent lists are skipped.
    fn push_list(&mut self, key: &str, values: Option<&[String]>) {
        if let Some(list) = values {
            if !list.is_empty() {
                self.push(key, list.join(","));
            }
        }
    }

    fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}
