//! Server configuration.

use bazaar_db::BroadcastConfig;

/// Runtime settings for the HTTP server and its gateways.
///
/// Gateway credentials are optional; endpoints that need a missing one fail
/// with an internal error when called.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL used to build product share links.
    pub public_url: String,
    pub observer_queue_capacity: usize,
    pub stripe_secret_key: Option<String>,
    pub stripe_publishable_key: Option<String>,
    pub razorpay_key: Option<String>,
    pub onesignal_app_id: Option<String>,
    pub onesignal_api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_url: "http://127.0.0.1:3000".to_string(),
            observer_queue_capacity: BroadcastConfig::default().observer_queue_capacity,
            stripe_secret_key: None,
            stripe_publishable_key: None,
            razorpay_key: None,
            onesignal_app_id: None,
            onesignal_api_key: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn broadcast(&self) -> BroadcastConfig {
        BroadcastConfig {
            observer_queue_capacity: self.observer_queue_capacity,
        }
    }
}

/// Treat empty environment values as unset.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.broadcast().observer_queue_capacity, 256);
    }

    #[test]
    fn test_present_ignores_blank() {
        assert_eq!(present(&Some("  ".into())), None);
        assert_eq!(present(&Some("sk".into())), Some("sk"));
        assert_eq!(present(&None), None);
    }
}
