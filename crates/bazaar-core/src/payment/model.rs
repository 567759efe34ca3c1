//! Payment request and response shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripePaymentRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub address: Option<BillingAddress>,
    /// Smallest currency unit, e.g. cents.
    pub amount: Option<u64>,
    pub currency: Option<String>,
    pub description: Option<String>,
}

/// Everything the mobile payment sheet needs to complete a Stripe payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSheet {
    pub payment_intent: String,
    pub ephemeral_key: String,
    pub customer: String,
    pub publishable_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RazorpayKey {
    pub key: String,
}

/// Customer details sent to Stripe.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub email: String,
    pub name: Option<String>,
    pub address: Option<BillingAddress>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentIntent {
    pub amount: u64,
    pub currency: String,
    pub customer_id: String,
    pub description: Option<String>,
}
