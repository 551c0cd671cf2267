use cps_common::Money;
use course_payment_engine::{
    db_types::OrderId,
    traits::{GatewayError, GatewayOrder, PaymentGateway},
};
use log::*;
use provider_tools::{data_objects::NewGatewayOrder, CheckoutApi, CheckoutConfig, ProviderApiError};

use crate::errors::ServerError;

/// [`PaymentGateway`] implementation backed by the checkout provider's REST API.
#[derive(Clone)]
pub struct CheckoutClient {
    api: CheckoutApi,
}

impl CheckoutClient {
    pub fn new(config: CheckoutConfig) -> Result<Self, ServerError> {
        let api = CheckoutApi::new(config).map_err(|e| ServerError::InitializeError(e.to_string()))?;
        Ok(Self { api })
    }
}

impl PaymentGateway for CheckoutClient {
    async fn create_order(&self, amount: Money, currency: &str, receipt: &str) -> Result<GatewayOrder, GatewayError> {
        let request = NewGatewayOrder {
            amount: amount.value(),
            currency: currency.to_string(),
            receipt: receipt.to_string(),
        };
        let response = self.api.create_order(&request).await.map_err(|e| match e {
            ProviderApiError::QueryError { status, message } => {
                warn!("🛒️ The gateway rejected an order request ({status}): {message}");
                GatewayError::Rejected(format!("{status}: {message}"))
            },
            e => GatewayError::Unreachable(e.to_string()),
        })?;
        Ok(GatewayOrder { order_id: OrderId::from(response.id), amount: Money::from_cents(response.amount) })
    }
}
