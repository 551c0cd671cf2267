use serde::{Deserialize, Serialize};

/// Request body for creating an order at the checkout gateway. Amounts are always in the currency's minor units,
/// which is what the gateway expects.
#[derive(Debug, Clone, Serialize)]
pub struct NewGatewayOrder {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

/// The gateway's representation of a created order.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrderResponse {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// The subset of the identity provider's user record that the payment flow needs for lazy profile creation.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub email_addresses: Vec<EmailAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}
