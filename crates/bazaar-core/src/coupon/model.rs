//! Coupon models.

use bazaar_db::{Document, EntityType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Fixed,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub coupon_code: String,
    pub discount_type: DiscountType,
    pub discount_amount: f64,
    pub minimum_purchase_amount: Option<f64>,
    pub end_date: DateTime<Utc>,
    pub status: CouponStatus,
    pub applicable_category: Option<String>,
    pub applicable_sub_category: Option<String>,
    pub applicable_product: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Coupon {
    const ENTITY: EntityType = EntityType::Coupon;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Coupon {
    /// A coupon without category, sub-category or product restriction.
    pub fn is_unrestricted(&self) -> bool {
        self.applicable_category.is_none()
            && self.applicable_sub_category.is_none()
            && self.applicable_product.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    pub coupon_code: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_amount: Option<f64>,
    pub minimum_purchase_amount: Option<f64>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<CouponStatus>,
    pub applicable_category: Option<String>,
    pub applicable_sub_category: Option<String>,
    pub applicable_product: Option<String>,
}

/// Body of the applicability check.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCheck {
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub product_ids: Vec<String>,
    #[serde(default)]
    pub purchase_amount: f64,
}

/// Outcome of an applicability check.
#[derive(Debug, Clone)]
pub struct CouponVerdict {
    pub applicable: bool,
    pub message: &'static str,
    pub coupon: Option<Coupon>,
}

impl CouponVerdict {
    pub(crate) fn rejected(message: &'static str) -> Self {
        Self {
            applicable: false,
            message,
            coupon: None,
        }
    }

    pub(crate) fn accepted(message: &'static str, coupon: Coupon) -> Self {
        Self {
            applicable: true,
            message,
            coupon: Some(coupon),
        }
    }
}
