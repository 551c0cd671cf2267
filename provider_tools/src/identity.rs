use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};

use crate::{config::IdentityConfig, data_objects::DirectoryUser, error::ProviderApiError};

/// Client for the identity provider's user directory.
///
/// The session layer only hands us a stable subject id; when a learner profile has to be created lazily the
/// directory is consulted for the user's display name and primary email.
#[derive(Clone)]
pub struct IdentityApi {
    config: IdentityConfig,
    client: Arc<Client>,
}

impl IdentityApi {
    pub fn new(config: IdentityConfig) -> Result<Self, ProviderApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(&format!("Bearer {}", config.secret_key.expose()))
            .map_err(|e| ProviderApiError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn fetch_user(&self, subject_id: &str) -> Result<DirectoryUser, ProviderApiError> {
        let url = format!("{}/v1/users/{subject_id}", self.config.base_url);
        trace!("Fetching directory user: {url}");
        let response = self.client.get(url).send().await.map_err(|e| ProviderApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            let user = response.json::<DirectoryUser>().await.map_err(|e| ProviderApiError::JsonError(e.to_string()))?;
            debug!("Fetched directory record for {subject_id}");
            Ok(user)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| ProviderApiError::RestResponseError(e.to_string()))?;
            Err(ProviderApiError::QueryError { status, message })
        }
    }
}
