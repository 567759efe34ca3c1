//! Application state.

use std::sync::Arc;

use bazaar_core::notification::OneSignalClient;
use bazaar_core::payment::StripeClient;
use bazaar_core::{BazaarError, BazaarResult, PushProvider, StripeApi};
use bazaar_db::{BroadcastHub, ChangePublisher, Db};

use crate::config::{present, ServerConfig};
use crate::connection::ConnectionManager;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub hub: BroadcastHub,
    pub connections: ConnectionManager,
    pub config: Arc<ServerConfig>,
    stripe: Option<Arc<dyn StripeApi>>,
    push: Option<Arc<dyn PushProvider>>,
}

impl AppState {
    /// Build state with gateway clients for whichever credentials are set.
    pub fn new(db: Db, config: ServerConfig) -> Self {
        let hub = BroadcastHub::new(config.broadcast());
        let stripe = present(&config.stripe_secret_key)
            .map(|key| Arc::new(StripeClient::new(key)) as Arc<dyn StripeApi>);
        let push = match (
            present(&config.onesignal_app_id),
            present(&config.onesignal_api_key),
        ) {
            (Some(app), Some(key)) => {
                Some(Arc::new(OneSignalClient::new(app, key)) as Arc<dyn PushProvider>)
            }
            _ => None,
        };

        Self {
            db,
            connections: ConnectionManager::new(hub.clone()),
            hub,
            config: Arc::new(config),
            stripe,
            push,
        }
    }

    pub fn with_stripe(mut self, stripe: Arc<dyn StripeApi>) -> Self {
        self.stripe = Some(stripe);
        self
    }

    pub fn with_push(mut self, push: Arc<dyn PushProvider>) -> Self {
        self.push = Some(push);
        self
    }

    /// Publisher handed to write operations.
    pub fn events(&self) -> &dyn ChangePublisher {
        &self.hub
    }

    pub fn stripe(&self) -> BazaarResult<&dyn StripeApi> {
        self.stripe
            .as_deref()
            .ok_or_else(|| BazaarError::Config("Stripe secret key is not configured.".into()))
    }

    pub fn stripe_publishable_key(&self) -> BazaarResult<&str> {
        present(&self.config.stripe_publishable_key)
            .ok_or_else(|| BazaarError::Config("Stripe publishable key is not configured.".into()))
    }

    pub fn push(&self) -> BazaarResult<&dyn PushProvider> {
        self.push
            .as_deref()
            .ok_or_else(|| BazaarError::Config("OneSignal credentials are not configured.".into()))
    }
}
