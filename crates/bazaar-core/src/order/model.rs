//! Order models.

use bazaar_db::{Document, EntityType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cod")]
    CashOnDelivery,
    #[serde(rename = "prepaid")]
    Prepaid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
    pub variant: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTotal {
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
    pub order_total: OrderTotal,
    pub tracking_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Order {
    const ENTITY: EntityType = EntityType::Order;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
    pub order_status: Option<OrderStatus>,
    pub items: Option<Vec<OrderItem>>,
    pub total_price: Option<f64>,
    pub shipping_address: Option<ShippingAddress>,
    pub payment_method: Option<PaymentMethod>,
    pub coupon_code: Option<String>,
    pub order_total: Option<OrderTotal>,
    pub tracking_url: Option<String>,
}

/// Fields an order may change after placement.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub order_status: Option<OrderStatus>,
    pub tracking_url: Option<String>,
}
