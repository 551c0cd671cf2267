use sqlx::SqliteConnection;

use crate::{
    db_types::{CheckoutOrder, NewCheckoutOrder, OrderId},
    traits::LedgerError,
};

pub async fn insert_checkout_order(
    order: NewCheckoutOrder,
    conn: &mut SqliteConnection,
) -> Result<CheckoutOrder, LedgerError> {
    let inserted = sqlx::query_as::<_, CheckoutOrder>(
        "INSERT INTO checkout_orders (order_id, course_id, subject_id, amount, currency, receipt) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&order.order_id)
    .bind(&order.course_id)
    .bind(&order.subject_id)
    .bind(order.amount)
    .bind(&order.currency)
    .bind(&order.receipt)
    .fetch_one(conn)
    .await?;
    Ok(inserted)
}

pub async fn fetch_checkout_order(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<CheckoutOrder>, LedgerError> {
    let order = sqlx::query_as::<_, CheckoutOrder>("SELECT * FROM checkout_orders WHERE order_id = ? LIMIT 1")
        .bind(order_id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}
