use std::time::Duration;

use cps_common::Secret;
use log::*;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Base url of the checkout gateway's REST API, e.g. "https://api.checkout-provider.com"
    pub base_url: String,
    pub key_id: String,
    pub key_secret: Secret<String>,
    pub timeout: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.checkout.example.com".to_string(),
            key_id: String::default(),
            key_secret: Secret::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl CheckoutConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("CPS_GATEWAY_URL").unwrap_or_else(|_| {
            warn!("CPS_GATEWAY_URL not set, using (probably useless) default");
            Self::default().base_url
        });
        let key_id = std::env::var("CPS_GATEWAY_KEY_ID").unwrap_or_else(|_| {
            warn!("CPS_GATEWAY_KEY_ID not set. Gateway calls will not be authorised.");
            String::default()
        });
        let key_secret = Secret::new(std::env::var("CPS_GATEWAY_KEY_SECRET").unwrap_or_else(|_| {
            warn!("CPS_GATEWAY_KEY_SECRET not set. Gateway calls will not be authorised.");
            String::default()
        }));
        let timeout = request_timeout("CPS_GATEWAY_TIMEOUT_SECS");
        Self { base_url, key_id, key_secret, timeout }
    }
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base url of the identity provider's backend API.
    pub base_url: String,
    pub secret_key: Secret<String>,
    pub timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.identity.example.com".to_string(),
            secret_key: Secret::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl IdentityConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("CPS_IDENTITY_URL").unwrap_or_else(|_| {
            warn!("CPS_IDENTITY_URL not set, using (probably useless) default");
            Self::default().base_url
        });
        let secret_key = Secret::new(std::env::var("CPS_IDENTITY_SECRET_KEY").unwrap_or_else(|_| {
            warn!("CPS_IDENTITY_SECRET_KEY not set. Identity directory lookups will not be authorised.");
            String::default()
        }));
        let timeout = request_timeout("CPS_IDENTITY_TIMEOUT_SECS");
        Self { base_url, secret_key, timeout }
    }
}

fn request_timeout(var: &str) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|s| {
            s.parse::<u64>()
                .map_err(|e| warn!("Invalid value for {var}: {e}. Using the default."))
                .ok()
        })
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}
