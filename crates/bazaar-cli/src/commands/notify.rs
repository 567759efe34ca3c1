//! Push a change event onto a running server's feed.

use anyhow::{bail, Context, Result};
use bazaar_core::notifier::{FeedNotifier, DEFAULT_SERVER_URL};
use bazaar_db::{ChangeAction, ChangeEvent, EntityType};
use clap::Args;
use serde_json::Value;

use crate::output;

#[derive(Args)]
pub struct NotifyArgs {
    /// Entity name, e.g. product, subCategory
    #[arg(value_parser = parse_entity)]
    pub entity: EntityType,

    /// created, updated or deleted
    #[arg(value_parser = parse_action)]
    pub action: ChangeAction,

    /// JSON payload
    #[arg(long, default_value = "{}")]
    pub data: String,

    /// Server base URL
    #[arg(long, env = "BAZAAR_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,
}

fn parse_entity(s: &str) -> Result<EntityType, String> {
    serde_json::from_value(Value::String(s.to_string()))
        .map_err(|_| format!("unknown entity '{}'", s))
}

fn parse_action(s: &str) -> Result<ChangeAction, String> {
    serde_json::from_value(Value::String(s.to_string()))
        .map_err(|_| format!("unknown action '{}'", s))
}

pub async fn execute(args: NotifyArgs) -> Result<()> {
    let data: Value = serde_json::from_str(&args.data).context("--data is not valid JSON")?;
    let event = ChangeEvent::new(args.entity, args.action, data);

    let notifier = FeedNotifier::new(&args.server);
    if !notifier.notify(&event).await {
        bail!("Server at {} did not accept the event", args.server);
    }
    output::print_sent(&event);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_entity("subCategory").unwrap(), EntityType::SubCategory);
        assert_eq!(parse_action("deleted").unwrap(), ChangeAction::Deleted);
        assert!(parse_entity("widget").is_err());
    }
}
