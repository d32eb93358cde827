//! # proctor-cli
//!
//! Command-line interface for Proctor.
//!
//! Inspect and exercise the verification layer without an MCP client:
//! - `proctor init` — create the `.proctor/` state directory with default configs
//! - `proctor check` — dry-run one action against the active policy
//! - `proctor token generate/validate` — work with rotating verification tokens
//! - `proctor drift` — score an activity summary against the configured goals
//! - `proctor review` — score a session and print its scorecard
//! - `proctor history` — show recent logged actions
//! - `proctor serve` — start the MCP server on stdio

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use proctor_gateway::ProctorPaths;

/// Proctor CLI — check, score, and review agent actions.
#[derive(Parser)]
#[command(name = "proctor", version, about)]
struct Cli {
    /// Supervised root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .proctor/ state directory with default config files.
    Init,
    /// Dry-run one action against the active policy. Nothing is logged.
    Check {
        /// Action type, e.g. "send_email", "browse_website", "make_purchase".
        action_type: String,
        /// Target of the action: an address, domain, URL, file path, or command.
        target: String,
        /// Monetary amount for spending actions.
        #[arg(long, default_value_t = 0.0)]
        amount: f64,
        /// Free-text description of the action.
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Work with rotating verification tokens.
    Token {
        #[command(subcommand)]
        command: commands::token::TokenCommands,
    },
    /// Score an activity summary against the configured goal categories.
    Drift {
        /// Free-text summary of recent activity.
        summary: String,
    },
    /// Score a session and print its scorecard.
    Review {
        /// Session to review (defaults to the most recently active).
        #[arg(long)]
        session: Option<String>,
    },
    /// Show recent logged actions.
    History {
        /// Session to show (defaults to the most recently active).
        #[arg(long)]
        session: Option<String>,
        /// Maximum number of actions to show.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Start the MCP server on stdio.
    Serve,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let paths = ProctorPaths::for_root(&root);

    match &cli.command {
        Commands::Init => commands::init::execute(&paths),
        Commands::Check {
            action_type,
            target,
            amount,
            description,
        } => commands::check::execute(&paths, action_type, target, *amount, description),
        Commands::Token { command } => commands::token::execute(command, &paths),
        Commands::Drift { summary } => commands::drift::execute(&paths, summary),
        Commands::Review { session } => commands::review::execute(&paths, session.as_deref()),
        Commands::History { session, limit } => {
            commands::history::execute(&paths, session.as_deref(), *limit)
        }
        Commands::Serve => commands::serve::execute(&paths),
    }
}
