//! Brand models.

use bazaar_db::{Document, EntityType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub subcategory_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Brand {
    const ENTITY: EntityType = EntityType::Brand;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInput {
    pub name: Option<String>,
    pub subcategory_id: Option<String>,
}
