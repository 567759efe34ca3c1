//! Payment gateway hand-off.
//!
//! Nothing is stored; a successful start is announced as a `payment`
//! created event. Failures publish nothing.

pub mod model;
pub mod stripe;

use async_trait::async_trait;
use bazaar_db::{ChangeAction, ChangeEvent, ChangePublisher, EntityType};
use model::{NewCustomer, NewPaymentIntent, PaymentSheet, RazorpayKey, StripePaymentRequest};
use serde_json::json;
use tracing::info;

pub use stripe::StripeClient;

use crate::error::{BazaarError, BazaarResult};
use crate::write::required;

/// Stripe operations needed to prepare a mobile payment sheet.
#[async_trait]
pub trait StripeApi: Send + Sync {
    /// Returns the customer id.
    async fn create_customer(&self, customer: &NewCustomer) -> BazaarResult<String>;

    /// Returns the ephemeral key secret.
    async fn create_ephemeral_key(&self, customer_id: &str) -> BazaarResult<String>;

    /// Returns the intent's client secret.
    async fn create_payment_intent(&self, intent: &NewPaymentIntent) -> BazaarResult<String>;
}

/// Create customer, ephemeral key and payment intent, in that order.
pub async fn start_stripe_payment(
    stripe: &dyn StripeApi,
    publishable_key: &str,
    events: &dyn ChangePublisher,
    request: StripePaymentRequest,
) -> BazaarResult<PaymentSheet> {
    let email = required(request.email, "Email is required.")?;
    let amount = match request.amount {
        Some(a) if a > 0 => a,
        _ => return Err(BazaarError::validation("Amount must be greater than zero.")),
    };
    let currency = required(request.currency, "Currency is required.")?;

    let customer = stripe
        .create_customer(&NewCustomer {
            email: email.clone(),
            name: request.name,
            address: request.address,
        })
        .await?;
    let ephemeral_key = stripe.create_ephemeral_key(&customer).await?;
    let payment_intent = stripe
        .create_payment_intent(&NewPaymentIntent {
            amount,
            currency: currency.clone(),
            customer_id: customer.clone(),
            description: request.description,
        })
        .await?;

    info!(customer = %customer, amount, currency = %currency, "Stripe payment initiated");
    events.publish(ChangeEvent::new(
        EntityType::Payment,
        ChangeAction::Created,
        json!({ "provider": "stripe", "email": email, "amount": amount, "currency": currency }),
    ));

    Ok(PaymentSheet {
        payment_intent,
        ephemeral_key,
        customer,
        publishable_key: publishable_key.to_string(),
    })
}

pub fn razorpay_key(key: Option<&str>, events: &dyn ChangePublisher) -> BazaarResult<RazorpayKey> {
    let key = key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| BazaarError::Config("Razorpay key is not configured.".into()))?;

    info!("Razorpay payment initiated");
    events.publish(ChangeEvent::new(
        EntityType::Payment,
        ChangeAction::Created,
        json!({ "provider": "razorpay" }),
    ));
    Ok(RazorpayKey {
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_db::RecordingPublisher;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStripe {
        calls: Mutex<Vec<&'static str>>,
        fail_intent: bool,
    }

    #[async_trait]
    impl StripeApi for FakeStripe {
        async fn create_customer(&self, _customer: &NewCustomer) -> BazaarResult<String> {
            self.calls.lock().unwrap().push("customer");
            Ok("cus_1".into())
        }

        async fn create_ephemeral_key(&self, customer_id: &str) -> BazaarResult<String> {
            assert_eq!(customer_id, "cus_1");
            self.calls.lock().unwrap().push("ephemeral_key");
            Ok("ek_secret".into())
        }

        async fn create_payment_intent(&self, intent: &NewPaymentIntent) -> BazaarResult<String> {
            self.calls.lock().unwrap().push("payment_intent");
            if self.fail_intent {
                return Err(BazaarError::Payment("card declined".into()));
            }
            assert_eq!(intent.customer_id, "cus_1");
            Ok("pi_secret".into())
        }
    }

    fn request() -> StripePaymentRequest {
        StripePaymentRequest {
            email: Some("a@b.c".into()),
            name: Some("Ann".into()),
            amount: Some(1999),
            currency: Some("usd".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_stripe_sheet_and_event() {
        let stripe = FakeStripe::default();
        let events = RecordingPublisher::new();

        let sheet = start_stripe_payment(&stripe, "pk_test", &events, request())
            .await
            .unwrap();
        assert_eq!(sheet.payment_intent, "pi_secret");
        assert_eq!(sheet.ephemeral_key, "ek_secret");
        assert_eq!(sheet.customer, "cus_1");
        assert_eq!(sheet.publishable_key, "pk_test");
        assert_eq!(
            *stripe.calls.lock().unwrap(),
            vec!["customer", "ephemeral_key", "payment_intent"]
        );

        let published = events.events();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].entity(), EntityType::Payment);
        assert_eq!(published[0].data()["amount"], 1999);
    }

    #[tokio::test]
    async fn test_gateway_failure_publishes_nothing() {
        let stripe = FakeStripe {
            fail_intent: true,
            ..Default::default()
        };
        let events = RecordingPublisher::new();

        let err = start_stripe_payment(&stripe, "pk", &events, request())
            .await
            .unwrap_err();
        assert!(matches!(err, BazaarError::Payment(_)));
        assert!(events.events().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_amount_skips_gateway() {
        let stripe = FakeStripe::default();
        let events = RecordingPublisher::new();
        let mut req = request();
        req.amount = Some(0);

        assert!(start_stripe_payment(&stripe, "pk", &events, req).await.is_err());
        assert!(stripe.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_razorpay_key() {
        let events = RecordingPublisher::new();
        assert!(matches!(
            razorpay_key(None, &events),
            Err(BazaarError::Config(_))
        ));
        assert!(events.events().is_empty());

        let key = razorpay_key(Some("rzp_test"), &events).unwrap();
        assert_eq!(key.key, "rzp_test");
        assert_eq!(events.events()[0].data()["provider"], "razorpay");
    }
}
