//! Client for a running server's `/internal/notify` endpoint.
//!
//! Lets processes that write outside the HTTP API (imports, scripts) push
//! change events onto the live feed.

use std::time::Duration;

use bazaar_db::ChangeEvent;
use tracing::{debug, warn};

/// Default server URL.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[derive(Clone)]
pub struct FeedNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl FeedNotifier {
    pub fn new(base_url: &str) -> Self {
        debug!(base_url = %base_url, "FeedNotifier initialized");
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(2))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/internal/notify", self.base_url)
    }

    /// Forward one event. Returns whether the server accepted it.
    ///
    /// Failures are logged and swallowed; the server may simply not be running.
    pub async fn notify(&self, event: &ChangeEvent) -> bool {
        let url = self.endpoint();
        debug!(url = %url, entity = %event.entity(), action = %event.action(), "Sending change event");

        match self.client.post(&url).json(event).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(entity = %event.entity(), "Change event accepted");
                true
            }
            Ok(response) => {
                warn!(
                    entity = %event.entity(),
                    status_code = %response.status(),
                    "Change event rejected"
                );
                false
            }
            Err(e) => {
                debug!(error = %e, url = %url, "Failed to send change event (server may not be running)");
                false
            }
        }
    }
}

impl Default for FeedNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_db::EntityType;

    #[test]
    fn test_endpoint_trims_slash() {
        let notifier = FeedNotifier::new("http://shop.local:8080/");
        assert_eq!(notifier.endpoint(), "http://shop.local:8080/internal/notify");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_not_an_error() {
        let notifier = FeedNotifier::new("http://127.0.0.1:9");
        let event = ChangeEvent::deleted(EntityType::Brand, "b1");
        assert!(!notifier.notify(&event).await);
    }
}
