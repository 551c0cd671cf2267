use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::CheckoutConfig,
    data_objects::{GatewayOrderResponse, NewGatewayOrder},
    error::ProviderApiError,
};

/// Client for the checkout gateway's order API.
///
/// The gateway authenticates merchants with a key id / key secret pair sent as HTTP Basic credentials. Only the
/// order-creation call is used by this system; payment capture happens in the gateway's own hosted flow and comes
/// back to us as a signed confirmation payload.
#[derive(Clone)]
pub struct CheckoutApi {
    config: CheckoutConfig,
    client: Arc<Client>,
}

impl CheckoutApi {
    pub fn new(config: CheckoutConfig) -> Result<Self, ProviderApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Create a new order at the gateway. The returned order id is the handle that the payer's checkout session
    /// and the subsequent confirmation callback both reference.
    pub async fn create_order(&self, order: &NewGatewayOrder) -> Result<GatewayOrderResponse, ProviderApiError> {
        trace!("Creating gateway order for {} {}", order.amount, order.currency);
        let response: GatewayOrderResponse = self.rest_query(Method::POST, "/v1/orders", Some(order)).await?;
        debug!("Gateway order {} created for {} {}", response.id, response.amount, response.currency);
        Ok(response)
    }

    async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, ProviderApiError> {
        let url = format!("{}{path}", self.config.base_url);
        trace!("Sending REST query: {url}");
        let mut req = self
            .client
            .request(method, url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose()));
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| ProviderApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| ProviderApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| ProviderApiError::RestResponseError(e.to_string()))?;
            Err(ProviderApiError::QueryError { status, message })
        }
    }
}
