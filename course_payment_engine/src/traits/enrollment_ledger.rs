use crate::{
    db_types::{CourseId, Enrollment, NewPaymentRecord, PaymentRecord},
    traits::LedgerError,
};

/// The result of appending to the payment ledger. The ledger is keyed on the gateway payment id, so a replayed
/// confirmation comes back as `AlreadyRecorded` and must not trigger a second instructor credit.
#[derive(Debug, Clone)]
pub enum InsertPaymentResult {
    Inserted(PaymentRecord),
    AlreadyRecorded(String),
}

/// The durable record of who is enrolled in what, and of what was paid. Only the payment-verification flow
/// writes through this trait; read-side consumers (catalog filtering, "my learning", admin aggregation) only
/// use the list operations.
#[allow(async_fn_in_trait)]
pub trait EnrollmentLedger: Clone {
    async fn find_enrollment(&self, learner_id: i64, course_id: &CourseId) -> Result<Option<Enrollment>, LedgerError>;

    /// Atomic find-or-create keyed on (learner, course). Two concurrent calls for the same pair must both
    /// succeed, with exactly one row created between them. The boolean is true when this call created the row.
    async fn upsert_enrollment(
        &self,
        learner_id: i64,
        course_id: &CourseId,
    ) -> Result<(Enrollment, bool), LedgerError>;

    /// Atomic check-and-insert keyed on the gateway payment id.
    async fn append_payment(&self, record: NewPaymentRecord) -> Result<InsertPaymentResult, LedgerError>;

    async fn list_enrollments_for_learner(&self, learner_id: i64) -> Result<Vec<Enrollment>, LedgerError>;

    async fn list_payments_for_instructor(&self, instructor_id: &str) -> Result<Vec<PaymentRecord>, LedgerError>;

    async fn list_all_payments(&self) -> Result<Vec<PaymentRecord>, LedgerError>;
}
