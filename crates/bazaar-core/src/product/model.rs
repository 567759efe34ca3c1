//! Product models.

use bazaar_db::{Document, EntityType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of image slots per product.
pub const IMAGE_SLOTS: u8 = 5;

/// One image in a numbered slot (1 to 5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub image: u8,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub price: f64,
    pub offer_price: Option<f64>,
    pub pro_category_id: String,
    pub pro_sub_category_id: String,
    pub pro_brand_id: Option<String>,
    pub pro_variant_type_id: Option<String>,
    #[serde(default)]
    pub pro_variant_id: Vec<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Product {
    const ENTITY: EntityType = EntityType::Product;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Product {
    /// Put `image` into its slot, replacing whatever was there.
    pub fn set_image(&mut self, image: ProductImage) {
        match self.images.iter_mut().find(|i| i.image == image.image) {
            Some(existing) => existing.url = image.url,
            None => self.images.push(image),
        }
    }
}

/// Product with its public link, returned by get-by-id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub shareable_link: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
    pub offer_price: Option<f64>,
    pub pro_category_id: Option<String>,
    pub pro_sub_category_id: Option<String>,
    pub pro_brand_id: Option<String>,
    pub pro_variant_type_id: Option<String>,
    pub pro_variant_id: Option<Vec<String>>,
    pub images: Option<Vec<ProductImage>>,
}
