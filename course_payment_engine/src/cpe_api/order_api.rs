use std::fmt::Debug;

use chrono::Utc;
use cps_common::CURRENCY_CODE;
use log::*;

use crate::{
    cpe_api::errors::OrderError,
    db_types::{CheckoutOrder, CourseId, NewCheckoutOrder},
    traits::{CatalogManagement, OrderManagement, PaymentGateway},
};

/// `OrderApi` is the order-initiation half of the purchase flow. Given an authenticated caller and a course, it
/// asks the checkout gateway for a new order at the course's current price and persists the result with the
/// price frozen.
pub struct OrderApi<B, G> {
    db: B,
    gateway: G,
}

impl<B, G> Debug for OrderApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi")
    }
}

impl<B, G> OrderApi<B, G> {
    pub fn new(db: B, gateway: G) -> Self {
        Self { db, gateway }
    }
}

impl<B, G> OrderApi<B, G>
where
    B: CatalogManagement + OrderManagement,
    G: PaymentGateway,
{
    /// Create a gateway order for the course's current price.
    ///
    /// Any signed-in caller may initiate an order; there is no role restriction. Nothing is persisted until the
    /// gateway call has succeeded, so a gateway failure is always safe for the caller to retry.
    pub async fn create_order(&self, subject_id: &str, course_id: &CourseId) -> Result<CheckoutOrder, OrderError> {
        let course =
            self.db.fetch_course(course_id).await?.ok_or_else(|| OrderError::CourseNotFound(course_id.clone()))?;
        let receipt = format!("receipt_{}", Utc::now().timestamp_millis());
        trace!("🛒️ Requesting gateway order for course [{course_id}] at {} ({receipt})", course.price);
        let gateway_order = self.gateway.create_order(course.price, CURRENCY_CODE, &receipt).await?;
        let order = self
            .db
            .insert_checkout_order(NewCheckoutOrder {
                order_id: gateway_order.order_id,
                course_id: course_id.clone(),
                subject_id: subject_id.to_string(),
                amount: gateway_order.amount,
                currency: CURRENCY_CODE.to_string(),
                receipt,
            })
            .await?;
        debug!("🛒️ Order [{}] created for course [{course_id}] at {}", order.order_id, order.amount);
        Ok(order)
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
