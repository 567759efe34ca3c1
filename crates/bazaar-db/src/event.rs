//! Change events published after successful writes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of record a change event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    Category,
    SubCategory,
    Brand,
    Variant,
    VariantType,
    Product,
    Coupon,
    Poster,
    Order,
    Payment,
    Notification,
}

impl EntityType {
    /// Wire name, as used in event frames.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::SubCategory => "subCategory",
            Self::Brand => "brand",
            Self::Variant => "variant",
            Self::VariantType => "variantType",
            Self::Product => "product",
            Self::Coupon => "coupon",
            Self::Poster => "poster",
            Self::Order => "order",
            Self::Payment => "payment",
            Self::Notification => "notification",
        }
    }

    /// Storage collection name.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::SubCategory => "subcategories",
            Self::Brand => "brands",
            Self::Variant => "variants",
            Self::VariantType => "varianttypes",
            Self::Product => "products",
            Self::Coupon => "coupons",
            Self::Poster => "posters",
            Self::Order => "orders",
            Self::Payment => "payments",
            Self::Notification => "notifications",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single completed mutation.
///
/// Serialized as one WebSocket text frame:
/// `{"entity":"brand","action":"deleted","data":{"id":"..."},"occurredAt":"..."}`.
/// Fields are private so an event cannot be altered after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    entity: EntityType,
    action: ChangeAction,
    #[serde(default)]
    data: Value,
    #[serde(default = "Utc::now")]
    occurred_at: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(entity: EntityType, action: ChangeAction, data: Value) -> Self {
        Self {
            entity,
            action,
            data,
            occurred_at: Utc::now(),
        }
    }

    /// Event carrying the freshly created record.
    pub fn created<T: Serialize>(entity: EntityType, record: &T) -> Self {
        Self::new(entity, ChangeAction::Created, to_payload(record))
    }

    /// Event carrying the record as it stands after the update.
    pub fn updated<T: Serialize>(entity: EntityType, record: &T) -> Self {
        Self::new(entity, ChangeAction::Updated, to_payload(record))
    }

    /// Event carrying only the id of the removed record.
    pub fn deleted(entity: EntityType, id: &str) -> Self {
        Self::new(entity, ChangeAction::Deleted, serde_json::json!({ "id": id }))
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn action(&self) -> ChangeAction {
        self.action
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

fn to_payload<T: Serialize>(record: &T) -> Value {
    serde_json::to_value(record).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Change payload could not be serialized");
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let event = ChangeEvent::deleted(EntityType::SubCategory, "abc");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["entity"], "subCategory");
        assert_eq!(json["action"], "deleted");
        assert_eq!(json["data"]["id"], "abc");
        assert!(json["occurredAt"].is_string());
    }

    #[test]
    fn test_parse_without_timestamp() {
        let event: ChangeEvent =
            serde_json::from_str(r#"{"entity":"variantType","action":"updated","data":{"name":"Size"}}"#)
                .unwrap();

        assert_eq!(event.entity(), EntityType::VariantType);
        assert_eq!(event.action(), ChangeAction::Updated);
        assert_eq!(event.data()["name"], "Size");
    }

    #[test]
    fn test_entity_names_match_serde() {
        for entity in [
            EntityType::Category,
            EntityType::SubCategory,
            EntityType::VariantType,
            EntityType::Notification,
        ] {
            let json = serde_json::to_value(entity).unwrap();
            assert_eq!(json, entity.as_str());
        }
    }
}
