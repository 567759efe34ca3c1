//! Push notifications.
//!
//! Sending goes through a [`PushProvider`]; the sent message is then stored
//! so it can be listed and tracked later.

pub mod model;
pub mod onesignal;

use async_trait::async_trait;
use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{DeliveryReport, Notification, NotificationInput, PushMessage};
use tracing::info;

pub use onesignal::OneSignalClient;

use crate::error::BazaarResult;
use crate::write::{self, new_id, required};

const LABEL: &str = "Notification";

/// Outbound push delivery.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Send to all subscribers. Returns the provider's notification id.
    async fn send(&self, message: &PushMessage) -> BazaarResult<String>;

    async fn delivery_stats(&self, notification_id: &str) -> BazaarResult<DeliveryReport>;
}

pub async fn send_notification(
    db: &Db,
    events: &dyn ChangePublisher,
    push: &dyn PushProvider,
    input: NotificationInput,
) -> BazaarResult<Notification> {
    let message = PushMessage {
        title: required(input.title, "Title is required.")?,
        description: required(input.description, "Description is required.")?,
        image_url: input.image_url.filter(|u| !u.trim().is_empty()),
    };

    let notification_id = push.send(&message).await?;
    info!(notification_id = %notification_id, "Notification sent to all users");

    let now = Utc::now();
    let notification = Notification {
        id: new_id(),
        notification_id,
        title: message.title,
        description: message.description,
        image_url: message.image_url,
        created_at: now,
        updated_at: now,
    };
    write::insert_and_publish(db, events, &notification).await?;
    Ok(notification)
}

/// Delivery statistics for a provider notification id. Read-only.
pub async fn track_notification(
    push: &dyn PushProvider,
    notification_id: &str,
) -> BazaarResult<DeliveryReport> {
    push.delivery_stats(notification_id).await
}

/// Stored notifications, newest first.
pub async fn list_notifications(db: &Db) -> BazaarResult<Vec<Notification>> {
    let mut all: Vec<Notification> = db.list().await?;
    all.reverse();
    Ok(all)
}

pub async fn delete_notification(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
) -> BazaarResult<()> {
    write::remove_and_publish::<Notification>(db, events, id, LABEL).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use crate::error::BazaarError;
    use std::sync::Mutex;

    /// Provider that records messages instead of sending them.
    #[derive(Default)]
    pub struct FakePush {
        pub sent: Mutex<Vec<PushMessage>>,
        pub fail: bool,
    }

    #[async_trait]
    impl PushProvider for FakePush {
        async fn send(&self, message: &PushMessage) -> BazaarResult<String> {
            if self.fail {
                return Err(BazaarError::Push("unreachable".into()));
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            Ok(format!("push-{}", sent.len()))
        }

        async fn delivery_stats(&self, _notification_id: &str) -> BazaarResult<DeliveryReport> {
            Ok(DeliveryReport {
                platform: "Android".into(),
                success_delivery: 9,
                failed_delivery: 1,
                errored_delivery: 0,
                opened_notification: 4,
            })
        }
    }
}
