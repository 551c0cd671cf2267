use crate::{
    db_types::{CheckoutOrder, NewCheckoutOrder, OrderId},
    traits::LedgerError,
};

/// Storage for gateway orders created by this system. A stored order freezes the price charged at checkout;
/// verification consults it so a price change between order creation and confirmation cannot alter the charge.
#[allow(async_fn_in_trait)]
pub trait OrderManagement: Clone {
    async fn insert_checkout_order(&self, order: NewCheckoutOrder) -> Result<CheckoutOrder, LedgerError>;

    async fn fetch_checkout_order(&self, order_id: &OrderId) -> Result<Option<CheckoutOrder>, LedgerError>;
}
