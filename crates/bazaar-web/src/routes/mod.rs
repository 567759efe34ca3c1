//! Route handlers.

pub mod brands;
pub mod categories;
pub mod coupons;
pub mod internal;
pub mod notifications;
pub mod orders;
pub mod payment;
pub mod posters;
pub mod products;
pub mod sub_categories;
pub mod variant_types;
pub mod variants;

use crate::response::ApiResponse;

pub async fn index() -> ApiResponse<()> {
    ApiResponse::done("API working successfully")
}
