//! Command-line entry point for the Google Ads MCP server.
//!
//! This binary provides the `gads-mcp` command: `run` serves the MCP
//! protocol over stdio or HTTP, `tools` prints the tool catalogue
//! offline, and `check` verifies API credentials.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gads_api::config::DEFAULT_BASE_URL;
use gads_api::{Credentials, GoogleAdsClient, GoogleAdsConfig};
use gads_server::{AppState, HttpConfig, HttpServer, StdioServer};

mod groups;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Command-line entry for the Google Ads MCP server.
#[derive(Parser)]
#[command(
    name = "gads-mcp",
    version,
    about = "MCP server exposing the Google Ads API as agent tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server.
    Run(RunArgs),

    /// Print the tool catalogue without connecting to the API.
    Tools(GroupArgs),

    /// Verify credentials by listing accessible customer accounts.
    Check,
}

#[derive(Args)]
struct RunArgs {
    /// Transport to serve.
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// HTTP bind address (http transport only).
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// HTTP port (http transport only).
    #[arg(long, default_value_t = 8080)]
    port: u16,

    #[command(flatten)]
    groups: GroupArgs,
}

#[derive(Args)]
struct GroupArgs {
    /// Comma-separated adapter groups to mount
    /// (core, assets, planning, conversions, organization, account, all).
    #[arg(long, value_delimiter = ',', default_value = "core")]
    groups: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; deployments usually set variables directly.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => cmd_run(args).await,
        Commands::Tools(args) => cmd_tools(&args),
        Commands::Check => cmd_check().await,
    }
}

// ---------------------------------------------------------------------------
// Subcommand: run
// ---------------------------------------------------------------------------

async fn cmd_run(args: RunArgs) -> Result<()> {
    init_tracing("info");

    let config = GoogleAdsConfig::from_env().context("failed to load Google Ads configuration")?;
    let client = Arc::new(GoogleAdsClient::new(config));

    let cancel = Arc::new(AtomicBool::new(false));
    let adapters = groups::build_adapters(&client, &args.groups.groups, &cancel);
    anyhow::ensure!(
        !adapters.is_empty(),
        "no adapters mounted; check --groups (known: core, assets, planning, conversions, organization, account, all)"
    );

    let state = Arc::new(AppState::new(adapters));
    info!(
        adapters = state.registry.count(),
        tools = state.registry.total_tools(),
        "server state ready"
    );

    // Trip the cancel flag on the first shutdown signal so in-flight
    // stream collections wind down instead of running to completion.
    {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.store(true, Ordering::Release);
            }
        });
    }

    match args.transport {
        Transport::Stdio => StdioServer::new(state).run().await?,
        Transport::Http => {
            let http_config = HttpConfig {
                bind_addr: args.bind,
                port: args.port,
            };
            HttpServer::new(http_config, state).start().await?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: tools
// ---------------------------------------------------------------------------

fn cmd_tools(args: &GroupArgs) -> Result<()> {
    init_tracing("warn");

    // The catalogue is static per group selection, so no credentials are
    // needed; this client never sends a request.
    let client = Arc::new(GoogleAdsClient::new(GoogleAdsConfig {
        developer_token: String::new(),
        login_customer_id: None,
        credentials: Credentials::StaticToken {
            access_token: String::new(),
        },
        base_url: DEFAULT_BASE_URL.to_string(),
    }));

    let cancel = Arc::new(AtomicBool::new(false));
    let adapters = groups::build_adapters(&client, &args.groups, &cancel);
    anyhow::ensure!(!adapters.is_empty(), "no adapters selected; check --groups");

    let mut tool_count = 0;
    for adapter in &adapters {
        println!();
        println!("  {} - {}", adapter.id(), adapter.description());
        for tool in adapter.tools() {
            println!("    {:<40} {}", tool.name, tool.description);
            tool_count += 1;
        }
    }
    println!();
    println!("  {tool_count} tools across {} adapters", adapters.len());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: check
// ---------------------------------------------------------------------------

async fn cmd_check() -> Result<()> {
    init_tracing("warn");

    let config = GoogleAdsConfig::from_env().context("failed to load Google Ads configuration")?;
    let client = GoogleAdsClient::new(config);

    println!();
    println!("  Checking Google Ads API access...");

    match client.list_accessible_customers().await {
        Ok(response) => {
            println!(
                "  [+] Credentials OK, {} accessible account(s)",
                response.resource_names.len()
            );
            for name in &response.resource_names {
                println!("      {name}");
            }
            if let Some(login) = client.login_customer_id() {
                println!("  [+] login-customer-id: {login}");
            }
            println!();
            Ok(())
        }
        Err(e) => {
            println!("  [!] API check failed: {e}");
            println!();
            Err(e.into())
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Set up tracing, defaulting to `default_level` unless `RUST_LOG` is set.
///
/// Logs always go to stderr: with the stdio transport, stdout carries
/// protocol bytes only.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
