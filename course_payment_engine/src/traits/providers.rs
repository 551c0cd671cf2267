use cps_common::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db_types::OrderId;

//--------------------------------------   Payment gateway   --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub order_id: OrderId,
    pub amount: Money,
}

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("The payment gateway rejected the request: {0}")]
    Rejected(String),
    #[error("Could not reach the payment gateway: {0}")]
    Unreachable(String),
}

/// The checkout gateway, as seen by the order initiator. Creating an order has no local side effects, so a
/// failed call is always safe for the caller to retry.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    async fn create_order(&self, amount: Money, currency: &str, receipt: &str) -> Result<GatewayOrder, GatewayError>;
}

//--------------------------------------  Identity directory  -------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProfile {
    pub subject_id: String,
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("The identity provider has no record for subject {0}")]
    UnknownSubject(String),
    #[error("Could not reach the identity provider: {0}")]
    Unreachable(String),
}

/// The identity provider's user directory, consulted when a learner profile must be materialised lazily.
#[allow(async_fn_in_trait)]
pub trait IdentityDirectory {
    async fn fetch_profile(&self, subject_id: &str) -> Result<IdentityProfile, IdentityError>;
}
