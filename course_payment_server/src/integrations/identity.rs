use course_payment_engine::traits::{IdentityDirectory, IdentityError, IdentityProfile};
use log::*;
use provider_tools::{IdentityApi, IdentityConfig, ProviderApiError};

use crate::errors::ServerError;

/// [`IdentityDirectory`] implementation backed by the identity provider's user directory API.
#[derive(Clone)]
pub struct IdentityClient {
    api: IdentityApi,
}

impl IdentityClient {
    pub fn new(config: IdentityConfig) -> Result<Self, ServerError> {
        let api = IdentityApi::new(config).map_err(|e| ServerError::InitializeError(e.to_string()))?;
        Ok(Self { api })
    }
}

impl IdentityDirectory for IdentityClient {
    async fn fetch_profile(&self, subject_id: &str) -> Result<IdentityProfile, IdentityError> {
        let user = self.api.fetch_user(subject_id).await.map_err(|e| match e {
            ProviderApiError::QueryError { status: 404, .. } => {
                IdentityError::UnknownSubject(subject_id.to_string())
            },
            e => {
                warn!("🧑️ Directory lookup for {subject_id} failed: {e}");
                IdentityError::Unreachable(e.to_string())
            },
        })?;
        let display_name = user.full_name.unwrap_or_else(|| subject_id.to_string());
        let email = user
            .email_addresses
            .first()
            .map(|e| e.email_address.clone())
            .ok_or_else(|| IdentityError::Unreachable(format!("The directory record for {subject_id} has no email")))?;
        Ok(IdentityProfile { subject_id: user.id, display_name, email })
    }
}
