//! Bazaar CLI
//!
//! Runs the catalog API server and pushes change events to a running one.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

/// Initialize tracing with optional file logging.
///
/// The returned guard must stay alive for buffered file output to be flushed.
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar=info,bazaar_web=debug,bazaar_core=info,bazaar_db=info".into());

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "bazaar.log".into());
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            // Log to both stdout and file when --log is used
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(args.log_path()),
        _ => None,
    };
    let _guard = init_tracing(log_file.as_deref());

    cli.execute().await
}
