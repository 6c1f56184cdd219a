//! MCP protocol surface: advertises the tool catalog and forwards calls to
//! the dispatcher.

use crate::{catalog, dispatch};
use chainintel_api::IntelClient;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use std::sync::Arc;

#[derive(Clone)]
pub struct IntelMcpServer {
    client: Arc<IntelClient>,
}

impl IntelMcpServer {
    #[must_use]
    pub fn new(client: IntelClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl ServerHandler for IntelMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "chainintel-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Blockchain intelligence tools backed by the ChainIntel API. \
                 Use ping to verify connectivity, the getAddress* tools for \
                 address lookups and risk scoring, the *Transaction* tools for \
                 transaction details, risk, simulation, and status tracking, \
                 and the search tools for address and label discovery."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: catalog::tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = request.arguments.unwrap_or_default();
        tracing::debug!(tool = %request.name, "dispatching tool call");
        Ok(dispatch::call(&self.client, &request.name, args).await)
    }
}
