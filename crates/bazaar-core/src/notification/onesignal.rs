//! OneSignal REST client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::model::{DeliveryReport, PushMessage};
use super::PushProvider;
use crate::error::{BazaarError, BazaarResult};

const API_URL: &str = "https://onesignal.com/api/v1";

#[derive(Clone)]
pub struct OneSignalClient {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
    api_key: String,
}

#[derive(Deserialize)]
struct CreateResponse {
    id: Option<String>,
    #[serde(default)]
    errors: serde_json::Value,
}

#[derive(Deserialize, Default)]
struct PlatformStats {
    #[serde(default)]
    successful: u64,
    #[serde(default)]
    failed: u64,
    #[serde(default)]
    errored: u64,
    #[serde(default)]
    converted: u64,
}

#[derive(Deserialize, Default)]
struct DeliveryStats {
    #[serde(default)]
    android: PlatformStats,
}

#[derive(Deserialize)]
struct ViewResponse {
    #[serde(default)]
    platform_delivery_stats: DeliveryStats,
}

impl OneSignalClient {
    pub fn new(app_id: &str, api_key: &str) -> Self {
        Self::with_url(API_URL, app_id, api_key)
    }

    pub fn with_url(base_url: &str, app_id: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn body(&self, message: &PushMessage) -> serde_json::Value {
        let mut body = json!({
            "app_id": self.app_id,
            "contents": { "en": message.description },
            "headings": { "en": message.title },
            "included_segments": ["All"],
        });
        if let Some(url) = &message.image_url {
            body["big_picture"] = json!(url);
        }
        body
    }

    fn auth(&self) -> String {
        format!("Basic {}", self.api_key)
    }
}

fn push_error(context: &str, e: impl std::fmt::Display) -> BazaarError {
    BazaarError::Push(format!("{}: {}", context, e))
}

#[async_trait]
impl PushProvider for OneSignalClient {
    async fn send(&self, message: &PushMessage) -> BazaarResult<String> {
        let response = self
            .client
            .post(format!("{}/notifications", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&self.body(message))
            .send()
            .await
            .map_err(|e| push_error("Failed to reach OneSignal", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BazaarError::Push(format!("OneSignal error ({}): {}", status, body)));
        }

        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| push_error("Failed to parse OneSignal response", e))?;
        let id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BazaarError::Push(format!("OneSignal rejected notification: {}", created.errors)))?;

        debug!(notification_id = %id, "Push notification sent");
        Ok(id)
    }

    async fn delivery_stats(&self, notification_id: &str) -> BazaarResult<DeliveryReport> {
        let response = self
            .client
            .get(format!("{}/notifications/{}", self.base_url, notification_id))
            .query(&[("app_id", self.app_id.as_str())])
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .await
            .map_err(|e| push_error("Failed to reach OneSignal", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BazaarError::Push(format!("OneSignal error ({}): {}", status, body)));
        }

        let view: ViewResponse = response
            .json()
            .await
            .map_err(|e| push_error("Failed to parse OneSignal response", e))?;
        let android = view.platform_delivery_stats.android;
        Ok(DeliveryReport {
            platform: "Android".to_string(),
            success_delivery: android.successful,
            failed_delivery: android.failed,
            errored_delivery: android.errored,
            opened_notification: android.converted,
        })
    }
}
