//! # proctor-daemon
//!
//! Proctor MCP server daemon.
//!
//! Starts an MCP server on stdio that an agent client connects to. Every
//! real-world action the agent proposes flows through the gateway's policy
//! evaluator, rotating-credential check, and append-only action log.
//!
//! ## Usage
//!
//! Typically started automatically by the MCP client via `.mcp.json`:
//! ```json
//! {
//!   "mcpServers": {
//!     "proctor": {
//!       "type": "stdio",
//!       "command": "cargo",
//!       "args": ["run", "-p", "proctor-daemon"]
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use proctor_gateway::{ProctorPaths, ProctorServer};

/// Proctor MCP server.
#[derive(Parser)]
#[command(name = "proctor-daemon", about = "Proctor MCP server")]
struct Cli {
    /// Supervised root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't interfere with MCP on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("proctor_gateway=info".parse()?)
                .add_directive("proctor_daemon=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let root = cli.root.canonicalize()?;
    tracing::info!(root = %root.display(), "starting Proctor MCP server");

    let server = ProctorServer::new(ProctorPaths::for_root(&root))?;
    tracing::info!("server ready, waiting for client connection");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {:?}", e))?;

    service.waiting().await?;

    tracing::info!("shutting down");
    Ok(())
}
