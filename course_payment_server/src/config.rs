use std::env;

use cps_common::Secret;
use log::*;
use provider_tools::{CheckoutConfig, IdentityConfig};
use rand::{distributions::Alphanumeric, thread_rng, Rng};

const DEFAULT_CPS_HOST: &str = "127.0.0.1";
const DEFAULT_CPS_PORT: u16 = 8480;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// If set, the profile for this identity-provider subject id is created (or updated) with the admin role at
    /// startup. This is the only way an admin role ever gets assigned.
    pub seed_admin_subject: Option<String>,
    /// Checkout gateway credentials. The key secret doubles as the HMAC key for verifying payment confirmations.
    pub checkout: CheckoutConfig,
    pub identity: IdentityConfig,
    /// When true (the default), pending schema migrations are applied before the server starts listening.
    pub migrate_on_startup: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CPS_HOST.to_string(),
            port: DEFAULT_CPS_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
            seed_admin_subject: None,
            checkout: CheckoutConfig::default(),
            identity: IdentityConfig::default(),
            migrate_on_startup: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("CPS_HOST").ok().unwrap_or_else(|| DEFAULT_CPS_HOST.into());
        let port = env::var("CPS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for CPS_PORT. {e} Using the default, {DEFAULT_CPS_PORT}, instead."
                    );
                    DEFAULT_CPS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_CPS_PORT);
        let database_url = env::var("CPS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ CPS_DATABASE_URL is not set. Please set it to the URL for the course store database.");
            String::default()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to \
                 the default configuration."
            );
            AuthConfig::default()
        });
        let seed_admin_subject = env::var("CPS_SEED_ADMIN_SUBJECT").ok().filter(|s| !s.is_empty());
        match &seed_admin_subject {
            Some(subject) => info!("🪛️ Admin role will be seeded for subject {subject}"),
            None => info!("🪛️ CPS_SEED_ADMIN_SUBJECT is not set. No admin role will be seeded."),
        }
        let checkout = CheckoutConfig::new_from_env_or_default();
        let identity = IdentityConfig::new_from_env_or_default();
        let migrate_on_startup = env_flag("CPS_MIGRATE_ON_STARTUP", true);
        Self { host, port, database_url, auth, seed_admin_subject, checkout, identity, migrate_on_startup }
    }
}

/// Reads a boolean environment flag. Unset variables fall back to the default; unrecognised values do too,
/// with a warning.
fn env_flag(var: &str, default: bool) -> bool {
    let Ok(value) = env::var(var) else {
        return default;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!("🪛️ '{value}' is not a valid value for {var}. Using the default, {default}, instead.");
            default
        },
    }
}


//-------------------------------------------------  AuthConfig  -----------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The shared secret used to verify (and, in tests and tooling, to issue) HS256 access tokens. It must match
    /// the secret the identity provider signs session tokens with.
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT secret has not been set. I'm using a random value for this session. No externally \
             issued token will validate, so every API call will be rejected. Set CPS_JWT_SECRET for production \
             use. 🚨️🚨️🚨️"
        );
        let secret = thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect::<String>();
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, crate::errors::ServerError> {
        let secret = env::var("CPS_JWT_SECRET")
            .map_err(|e| crate::errors::ServerError::ConfigurationError(format!("{e} [CPS_JWT_SECRET]")))?;
        if secret.len() < 32 {
            warn!("🪛️ CPS_JWT_SECRET is shorter than 32 characters. Consider using a longer secret.");
        }
        Ok(Self { jwt_secret: Secret::new(secret) })
    }
}
