//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod notify;
pub mod serve;

/// Bazaar - catalog API with a live change feed
#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP and WebSocket server
    Serve(serve::ServeArgs),

    /// Send a change event to a running server
    Notify(notify::NotifyArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Notify(args) => notify::execute(args).await,
        }
    }
}
