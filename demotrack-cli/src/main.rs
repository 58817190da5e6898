//! demotrack-cli: compute dashboard analytics snapshots from the command line
//!
//! # Subcommands
//! - `snapshot --sessions <file> --users <file>`: compute locally from JSON exports
//! - `remote --sessions <file> --users <file>`: compute on the Demotrack server
//! - `status`: show server health
//!
//! Input files may hold either a bare array or a paginated `{ "data": [...] }`
//! envelope. Logs go to stderr; stdout carries only the result.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use demotrack_core::{Aggregator, AnalyticsSnapshot, DemotrackConfig};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8767";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "demotrack-cli",
    version,
    about = "Demotrack analytics: session trends, engagement and activity snapshots"
)]
struct Cli {
    /// Demotrack HTTP server URL (overrides DEMOTRACK_HTTP_URL env var)
    #[arg(long, env = "DEMOTRACK_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute a snapshot locally
    Snapshot {
        #[command(flatten)]
        input: InputArgs,

        /// Config file with an [analytics] section
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Compute a snapshot on the server
    Remote {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show Demotrack server status
    Status,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Sessions JSON file
    #[arg(long)]
    sessions: PathBuf,

    /// Users JSON file
    #[arg(long)]
    users: PathBuf,

    /// Compute as of this instant (RFC 3339) instead of now
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print a human-readable summary instead of JSON
    #[arg(long, conflicts_with = "pretty")]
    summary: bool,
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    demotrack_ingest::parse_timestamp(value)
        .ok_or_else(|| format!("expected an RFC 3339 timestamp, got {:?}", value))
}

// ============================================================================
// Output
// ============================================================================

fn print_snapshot(snapshot: &AnalyticsSnapshot, input: &InputArgs) -> anyhow::Result<()> {
    if input.summary {
        print!("{}", render_summary(snapshot));
    } else {
        println!("{}", snapshot.to_json(input.pretty)?);
    }
    Ok(())
}

/// Plain-text rendering of a snapshot for terminals.
fn render_summary(snapshot: &AnalyticsSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("Sessions:          {}\n", snapshot.total_sessions));
    out.push_str(&format!("Active users:      {}\n", snapshot.active_users));
    out.push_str(&format!("Avg session time:  {}\n", snapshot.average_session_time));
    out.push_str(&format!("Conversion rate:   {:.1}%\n", snapshot.conversion_rate));

    out.push_str("\nPerformance trends\n");
    for day in &snapshot.performance_trends {
        out.push_str(&format!(
            "  {} {}  active {:>3}  cancelled {:>3}\n",
            day.name, day.date, day.active_sessions, day.cancelled_sessions
        ));
    }

    out.push_str("\nUser engagement\n");
    for month in &snapshot.user_engagement {
        out.push_str(&format!(
            "  {}  admins {:>3}  employees {:>3}  inactive {:>3}\n",
            month.name, month.admins, month.employees, month.inactive
        ));
    }

    out.push_str("\nRecent activity\n");
    if snapshot.recent_activity.is_empty() {
        out.push_str("  (none)\n");
    }
    for entry in &snapshot.recent_activity {
        out.push_str(&format!("  {}: {} ({})\n", entry.user, entry.action, entry.time));
    }

    out
}

// ============================================================================
// Commands
// ============================================================================

fn do_snapshot(input: &InputArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = DemotrackConfig::load_or_default(config_path)
        .with_context(|| format!("loading config {:?}", config_path))?;

    let sessions = demotrack_ingest::load_sessions(&input.sessions)
        .with_context(|| format!("reading sessions from {}", input.sessions.display()))?;
    let users = demotrack_ingest::load_users(&input.users)
        .with_context(|| format!("reading users from {}", input.users.display()))?;

    let aggregator = Aggregator::new(config.analytics);
    let snapshot = match input.now {
        Some(at) => aggregator.snapshot_at(&sessions, &users, at),
        None => aggregator.snapshot(&sessions, &users),
    };

    print_snapshot(&snapshot, input)
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Request body for POST /analytics/snapshot. Collections are forwarded in
/// whatever shape the files hold; the server unwraps them.
fn snapshot_request_body(
    sessions: serde_json::Value,
    users: serde_json::Value,
    now: Option<DateTime<Utc>>,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "sessions": sessions,
        "users": users,
    });
    if let Some(at) = now {
        body["now"] = serde_json::json!(at.to_rfc3339());
    }
    body
}

fn do_remote(server: &str, input: &InputArgs) -> anyhow::Result<()> {
    let body = snapshot_request_body(
        read_json(&input.sessions)?,
        read_json(&input.users)?,
        input.now,
    );

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let url = format!("{}/analytics/snapshot", server);
    let resp = match client.post(&url).json(&body).send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("demotrack-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    };

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        eprintln!("demotrack-cli: server returned {}: {}", status, body);
        std::process::exit(1);
    }

    let snapshot: AnalyticsSnapshot = resp
        .json()
        .context("failed to parse snapshot response")?;
    tracing::debug!("Received snapshot with {} sessions", snapshot.total_sessions);

    print_snapshot(&snapshot, input)
}

/// Show the server status by calling GET /health.
fn do_status(server: &str) -> anyhow::Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let url = format!("{}/health", server);
    match client.get(&url).send() {
        Ok(r) if r.status().is_success() => {
            let body: serde_json::Value = r.json().unwrap_or_default();
            println!("Demotrack server: {}", body["status"].as_str().unwrap_or("unknown"));
            println!("Version:          {}", body["version"].as_str().unwrap_or("?"));
        }
        Ok(r) => {
            eprintln!("demotrack-cli: server unhealthy (HTTP {})", r.status());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("demotrack-cli: cannot reach {}: {}", url, e);
            std::process::exit(1);
        }
    }

    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();

    let result = match &cli.command {
        Commands::Snapshot { input, config } => do_snapshot(input, config.as_deref()),
        Commands::Remote { input } => do_remote(&server, input),
        Commands::Status => do_status(&server),
    };

    if let Err(e) = result {
        eprintln!("demotrack-cli: {:#}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
