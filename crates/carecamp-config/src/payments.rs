use std::env;

/// Payment-intent provider settings.
///
/// `api_base` is overridable so tests and staging can point the client at
/// a stand-in server instead of the live provider.
#[derive(Clone, Debug)]
pub struct PaymentsConfig {
    pub secret_key: String,
    pub currency: String,
    pub api_base: String,
}

impl PaymentsConfig {
    pub fn from_env() -> Self {
        Self {
            secret_key: env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            currency: env::var("STRIPE_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
        }
    }
}
