//! Payment-intent provider client.
//!
//! Thin wrapper over the provider's REST surface: one call that turns an
//! amount in minor units into a client-usable secret. The reqwest client
//! is built once and shared by every request.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, instrument};

use carecamp_config::PaymentsConfig;
use carecamp_core::AppError;

#[derive(Clone, Debug)]
pub struct PaymentIntentClient {
    http: Client,
    config: PaymentsConfig,
}

fn provider_error_message(body: &Value) -> &str {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .unwrap_or("")
}

impl PaymentIntentClient {
    pub fn new(config: PaymentsConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// The currency payments are recorded in.
    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    /// Creates a payment intent for `amount` minor units and returns the
    /// client secret the front-end confirms against.
    #[instrument(skip(self), fields(payment.amount = %amount))]
    pub async fn create_intent(&self, amount: i64) -> Result<String, AppError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base);
        let params = [
            ("amount", amount.to_string()),
            ("currency", self.config.currency.clone()),
            ("payment_method_types[]", "card".to_string()),
        ];

        debug!(url = %url, "Creating payment intent");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Payment provider unreachable");
                AppError::internal(anyhow::anyhow!("Payment provider unreachable: {}", e))
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            error!(error = %e, "Payment provider returned an unreadable body");
            AppError::internal(anyhow::anyhow!("Invalid payment provider response: {}", e))
        })?;

        if !status.is_success() {
            let message = provider_error_message(&body);
            error!(status = %status.as_u16(), message = %message, "Payment provider rejected intent");
            return Err(AppError::internal(anyhow::anyhow!(
                "Payment provider error: {} {}",
                status,
                message
            )));
        }

        body.get("client_secret")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::internal(anyhow::anyhow!(
                    "Payment provider response missing client_secret"
                ))
            })
    }
}
