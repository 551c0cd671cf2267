use sqlx::SqliteConnection;

use crate::{
    db_types::NewPaymentRecord,
    db_types::PaymentRecord,
    traits::{InsertPaymentResult, LedgerError},
};

/// Atomic check-and-insert keyed on the gateway payment id. The conflict clause and the insert are a single
/// statement, so two racing confirmations for the same payment cannot both see "not recorded yet": exactly one
/// gets a row back, the other gets `AlreadyRecorded`.
pub async fn append_payment(
    record: NewPaymentRecord,
    conn: &mut SqliteConnection,
) -> Result<InsertPaymentResult, LedgerError> {
    let inserted = sqlx::query_as::<_, PaymentRecord>(
        "INSERT INTO payments (payment_id, order_id, learner_id, course_id, instructor_id, amount) \
         VALUES (?, ?, ?, ?, ?, ?) ON CONFLICT (payment_id) DO NOTHING RETURNING *",
    )
    .bind(&record.payment_id)
    .bind(&record.order_id)
    .bind(record.learner_id)
    .bind(&record.course_id)
    .bind(&record.instructor_id)
    .bind(record.amount)
    .fetch_optional(conn)
    .await?;
    match inserted {
        Some(row) => Ok(InsertPaymentResult::Inserted(row)),
        None => Ok(InsertPaymentResult::AlreadyRecorded(record.payment_id)),
    }
}

pub async fn list_payments_for_instructor(
    instructor_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<PaymentRecord>, LedgerError> {
    let payments = sqlx::query_as::<_, PaymentRecord>(
        "SELECT * FROM payments WHERE instructor_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(instructor_id)
    .fetch_all(conn)
    .await?;
    Ok(payments)
}

pub async fn list_all_payments(conn: &mut SqliteConnection) -> Result<Vec<PaymentRecord>, LedgerError> {
    let payments = sqlx::query_as::<_, PaymentRecord>("SELECT * FROM payments ORDER BY created_at DESC, id DESC")
        .fetch_all(conn)
        .await?;
    Ok(payments)
}
