//! Minimal Stripe REST client (form-encoded, bearer auth).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::model::{NewCustomer, NewPaymentIntent};
use super::StripeApi;
use crate::error::{BazaarError, BazaarResult};

const API_URL: &str = "https://api.stripe.com/v1";

/// API version pinned for ephemeral keys, matching the mobile SDK.
pub const EPHEMERAL_KEY_VERSION: &str = "2023-10-16";

#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

#[derive(Deserialize)]
struct Secret {
    secret: String,
}

#[derive(Deserialize)]
struct IntentSecret {
    client_secret: String,
}

type Form = Vec<(String, String)>;

fn customer_form(customer: &NewCustomer) -> Form {
    let mut form = vec![("email".to_string(), customer.email.clone())];
    if let Some(name) = &customer.name {
        form.push(("name".into(), name.clone()));
    }
    if let Some(address) = &customer.address {
        let fields = [
            ("line1", &address.line1),
            ("line2", &address.line2),
            ("city", &address.city),
            ("state", &address.state),
            ("postal_code", &address.postal_code),
            ("country", &address.country),
        ];
        for (key, value) in fields {
            if let Some(v) = value {
                form.push((format!("address[{}]", key), v.clone()));
            }
        }
    }
    form
}

fn intent_form(intent: &NewPaymentIntent) -> Form {
    let mut form = vec![
        ("amount".to_string(), intent.amount.to_string()),
        ("currency".to_string(), intent.currency.to_lowercase()),
        ("customer".to_string(), intent.customer_id.clone()),
        ("automatic_payment_methods[enabled]".to_string(), "true".to_string()),
    ];
    if let Some(d) = &intent.description {
        form.push(("description".into(), d.clone()));
    }
    form
}

impl StripeClient {
    pub fn new(secret_key: &str) -> Self {
        Self::with_url(API_URL, secret_key)
    }

    pub fn with_url(base_url: &str, secret_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: &Form,
        stripe_version: Option<&str>,
    ) -> BazaarResult<T> {
        let mut request = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .form(form);
        if let Some(version) = stripe_version {
            request = request.header("Stripe-Version", version);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BazaarError::Payment(format!("Failed to reach Stripe: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BazaarError::Payment(format!("Stripe error ({}): {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| BazaarError::Payment(format!("Failed to parse Stripe response: {}", e)))
    }
}

#[async_trait]
impl StripeApi for StripeClient {
    async fn create_customer(&self, customer: &NewCustomer) -> BazaarResult<String> {
        let created: Created = self.post("customers", &customer_form(customer), None).await?;
        debug!(customer = %created.id, "Stripe customer created");
        Ok(created.id)
    }

    async fn create_ephemeral_key(&self, customer_id: &str) -> BazaarResult<String> {
        let form = vec![("customer".to_string(), customer_id.to_string())];
        let key: Secret = self
            .post("ephemeral_keys", &form, Some(EPHEMERAL_KEY_VERSION))
            .await?;
        Ok(key.secret)
    }

    async fn create_payment_intent(&self, intent: &NewPaymentIntent) -> BazaarResult<String> {
        let created: IntentSecret = self.post("payment_intents", &intent_form(intent), None).await?;
        Ok(created.client_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::model::BillingAddress;

    #[test]
    fn test_customer_form_nests_address() {
        let form = customer_form(&NewCustomer {
            email: "a@b.c".into(),
            name: Some("Ann".into()),
            address: Some(BillingAddress {
                city: Some("Paris".into()),
                country: Some("FR".into()),
                ..Default::default()
            }),
        });

        assert!(form.contains(&("email".into(), "a@b.c".into())));
        assert!(form.contains(&("address[city]".into(), "Paris".into())));
        assert!(form.contains(&("address[country]".into(), "FR".into())));
        assert!(!form.iter().any(|(k, _)| k == "address[line1]"));
    }

    #[test]
    fn test_intent_form_enables_automatic_methods() {
        let form = intent_form(&NewPaymentIntent {
            amount: 1999,
            currency: "USD".into(),
            customer_id: "cus_1".into(),
            description: None,
        });

        assert!(form.contains(&("amount".into(), "1999".into())));
        assert!(form.contains(&("currency".into(), "usd".into())));
        assert!(form.contains(&("automatic_payment_methods[enabled]".into(), "true".into())));
    }
}
