//! Category models.

use bazaar_db::{Document, EntityType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image placeholder stored when no image URL is supplied.
pub const NO_IMAGE: &str = "no_url";

/// A top-level catalog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Category {
    const ENTITY: EntityType = EntityType::Category;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Create/update payload. Absent fields keep their value on update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: Option<String>,
    pub image: Option<String>,
}
