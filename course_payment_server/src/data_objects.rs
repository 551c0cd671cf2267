use cps_common::Money;
use course_payment_engine::db_types::{Chapter, CheckoutOrder, CourseId, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub course_id: CourseId,
}

/// What the client needs to launch the gateway's hosted checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: String,
    /// The amount in minor units, as the gateway expects it.
    pub amount: Money,
    pub currency: String,
}

impl From<CheckoutOrder> for OrderResult {
    fn from(order: CheckoutOrder) -> Self {
        Self { order_id: order.order_id.0, amount: order.amount, currency: order.currency }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResult {
    pub course_id: CourseId,
    pub newly_enrolled: bool,
    /// True when this confirmation had been processed before. The response is still a success; nothing was
    /// written the second time.
    pub duplicate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCoursePayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The price in major units (e.g. 499.0 for ₹499.00).
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub curriculum: Vec<Chapter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRequest {
    pub blocked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsResult {
    pub earnings: Money,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn failure<S: Into<String>>(message: S) -> Self {
        Self { success: false, message: message.into() }
    }
}
