//! Stdio MCP server for the ChainIntel blockchain-intelligence API.

mod catalog;
mod config;
mod dispatch;
mod health;
mod server;
mod validate;

use anyhow::Context as _;
use chainintel_api::IntelClient;
use clap::Parser;
use config::Cli;
use rmcp::ServiceExt;
use server::IntelMcpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api_config = cli.into_api_config()?;
    tracing::info!(
        endpoint = %api_config.base_url(),
        api_key = %api_config.masked_api_key(),
        "starting chainintel-mcp"
    );

    let client = IntelClient::new(api_config).context("failed to build API client")?;
    let service = IntelMcpServer::new(client)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server on stdio")?;

    service.waiting().await?;
    tracing::info!("server stopped");
    Ok(())
}
