//! Variant type models (e.g. "Size", "Color").

use bazaar_db::{Document, EntityType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantType {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for VariantType {
    const ENTITY: EntityType = EntityType::VariantType;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantTypeInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
