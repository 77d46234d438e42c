//! # Permission Matrix CLI
//!
//! Inspect the permission table and explain individual decisions.
//!
//! ## Commands
//!
//! - `table` - Full permission table as JSON
//! - `grants <ROLE> [--resource <KIND>]` - Capability summary for a role
//! - `check --role .. --user .. --resource .. --action ..` - Explain one decision
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG` - Log level (default: info)
//! - `AUTHZ_ENABLE_METRICS` - Decision counters (default: true)
//! - `AUTHZ_TRACE_DECISIONS` - Log decisions at info level (default: false)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracker_authz::{AccessQuery, AuthzEngine, EngineConfig, ResourceKind, Role};

/// Project tracker permission matrix
#[derive(Parser)]
#[command(name = "authz-matrix")]
#[command(about = "Inspect role grants and explain authorization decisions")]
#[command(version)]
struct Cli {
    /// Compact JSON output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the full permission table
    Table,

    /// Print the grants held by a role
    Grants {
        /// Role (e.g. EMPLOYEE)
        role: Role,

        /// Restrict to one resource kind
        #[arg(long)]
        resource: Option<ResourceKind>,
    },

    /// Explain a single authorization decision; exits 1 on deny
    Check {
        #[arg(long)]
        role: Role,

        /// Acting user id
        #[arg(long)]
        user: String,

        /// Resource kind (e.g. issues)
        #[arg(long)]
        resource: String,

        /// Action token (e.g. update_assigned)
        #[arg(long)]
        action: String,

        /// Resource owner id
        #[arg(long)]
        owner: Option<String>,

        /// Resource assignee id
        #[arg(long)]
        assignee: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("failed to render JSON")?;

    println!("{}", rendered);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let engine = AuthzEngine::with_config(EngineConfig::from_env());

    info!("authz-matrix v{}", tracker_authz::VERSION);

    match cli.command {
        Command::Table => print_json(engine.table(), cli.compact)?,

        Command::Grants { role, resource } => match resource {
            Some(kind) => print_json(&engine.table().lookup(kind, role), cli.compact)?,
            None => print_json(&engine.grants_for_role(role), cli.compact)?,
        },

        Command::Check {
            role,
            user,
            resource,
            action,
            owner,
            assignee,
        } => {
            let query = AccessQuery::builder()
                .role(role)
                .user_id(user)
                .resource(resource)
                .action(action)
                .maybe_resource_owner_id(owner)
                .maybe_resource_assignee_id(assignee)
                .build()
                .context("invalid access query")?;

            let decision = engine.check(&query);
            print_json(&decision, cli.compact)?;

            if !decision.allowed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
