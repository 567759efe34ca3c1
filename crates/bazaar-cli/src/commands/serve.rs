//! Web server command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bazaar_db::Db;
use bazaar_web::ServerConfig;
use clap::Args;

use crate::output;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "BAZAAR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Redis connection URL
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Keep all data in memory instead of Redis
    #[arg(long)]
    pub memory: bool,

    /// Public base URL for product share links (defaults to the bind address)
    #[arg(long, env = "BAZAAR_PUBLIC_URL")]
    pub public_url: Option<String>,

    /// Events buffered per WebSocket client before dropping
    #[arg(long, env = "BAZAAR_OBSERVER_QUEUE", default_value = "256")]
    pub observer_queue: usize,

    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: Option<String>,

    #[arg(long, env = "STRIPE_PUBLISHABLE_KEY")]
    pub stripe_publishable_key: Option<String>,

    #[arg(long, env = "RAZORPAY_KEY", hide_env_values = true)]
    pub razorpay_key: Option<String>,

    #[arg(long, env = "ONESIGNAL_APP_ID")]
    pub onesignal_app_id: Option<String>,

    #[arg(long, env = "ONESIGNAL_REST_API_KEY", hide_env_values = true)]
    pub onesignal_api_key: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (default: ./bazaar.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl ServeArgs {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("bazaar.log"))
    }

    fn into_config(self) -> ServerConfig {
        let public_url = self
            .public_url
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port));
        ServerConfig {
            host: self.host,
            port: self.port,
            public_url,
            observer_queue_capacity: self.observer_queue,
            stripe_secret_key: self.stripe_secret_key,
            stripe_publishable_key: self.stripe_publishable_key,
            razorpay_key: self.razorpay_key,
            onesignal_app_id: self.onesignal_app_id,
            onesignal_api_key: self.onesignal_api_key,
        }
    }
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let db = if args.memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        Db::in_memory()
    } else {
        Db::connect(&args.redis_url)
            .await
            .with_context(|| format!("Failed to connect to Redis at {}", args.redis_url))?
    };

    let store = if args.memory { "memory" } else { "redis" };
    let config = args.into_config();
    output::print_banner(&config, store);

    bazaar_web::run_server(db, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_public_url_defaults_to_bind_address() {
        let cli = Cli::try_parse_from(["bazaar", "serve", "--host", "0.0.0.0", "--port", "9000"])
            .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let config = args.into_config();
        assert_eq!(config.public_url, "http://0.0.0.0:9000");
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }
}
