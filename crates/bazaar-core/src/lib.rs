//! Bazaar Core Library
//!
//! Catalog, order and coupon models plus the write operations that persist
//! them and announce each change on the broadcast feed.

pub mod brand;
pub mod category;
pub mod coupon;
pub mod error;
pub mod notification;
pub mod notifier;
pub mod order;
pub mod payment;
pub mod poster;
pub mod product;
pub mod sub_category;
pub mod variant;
pub mod variant_type;

mod write;

pub use error::{BazaarError, BazaarResult};
pub use notification::PushProvider;
pub use notifier::FeedNotifier;
pub use payment::StripeApi;
