use bazaar_db::{Document, EntityType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Id assigned by the push provider; used for tracking.
    pub notification_id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Notification {
    const ENTITY: EntityType = EntityType::Notification;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// A push message addressed to every subscribed device.
#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Android delivery statistics for one sent notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub platform: String,
    pub success_delivery: u64,
    pub failed_delivery: u64,
    pub errored_delivery: u64,
    pub opened_notification: u64,
}
