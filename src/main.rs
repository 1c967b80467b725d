//! calbridge - calendar tool server.
//!
//! Bridges AI clients to the system calendar store. Speaks newline-delimited
//! JSON over stdin/stdout: one `Request` per line in, one response line out.
//! An MCP tool-registration layer (or any other front end) wraps this
//! surface; the store side is a shim binary speaking the same protocol.
//!
//! Logging goes to stderr so stdout stays protocol-clean.

mod commands;
mod config;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use calbridge_core::protocol::{Request, Response};
use calbridge_core::store::StoreProcess;
use calbridge_core::CalendarService;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "calbridge")]
#[command(about = "Calendar tool server bridging AI clients to the system calendar store")]
struct Cli {
    /// Store shim to use (resolves the calbridge-store-<NAME> binary)
    #[arg(long)]
    store: Option<String>,

    /// Store request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("calbridge=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store = store;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    let store = StoreProcess::with_timeout(&config.store, Duration::from_secs(config.timeout_secs));
    let service = CalendarService::new(store);

    info!(store = %config.store, "calbridge ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = Response::error(&format!("Failed to parse request: {}", e));
                writeln!(stdout, "{}", response)?;
                stdout.flush()?;
                continue;
            }
        };

        let response = commands::handle_request(&service, request).await;

        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }

    Ok(())
}
