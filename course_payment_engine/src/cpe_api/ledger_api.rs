use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Enrollment, PaymentRecord},
    traits::{EnrollmentLedger, LedgerError, ProfileManagement},
};

/// Read-side queries over the enrollment ledger: "my learning", instructor payment history, and the admin
/// payment aggregation. Never writes.
pub struct LedgerApi<B> {
    db: B,
}

impl<B> Debug for LedgerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LedgerApi")
    }
}

impl<B> LedgerApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> LedgerApi<B>
where B: ProfileManagement + EnrollmentLedger
{
    /// The caller's enrollments. A caller with no profile yet has trivially no enrollments.
    pub async fn enrollments_for_subject(&self, subject_id: &str) -> Result<Vec<Enrollment>, LedgerError> {
        let Some(profile) = self.db.fetch_profile_by_subject(subject_id).await? else {
            trace!("🎓️ No profile for subject {subject_id}; returning no enrollments");
            return Ok(Vec::new());
        };
        self.db.list_enrollments_for_learner(profile.id).await
    }

    pub async fn payments_for_instructor(&self, instructor_id: &str) -> Result<Vec<PaymentRecord>, LedgerError> {
        self.db.list_payments_for_instructor(instructor_id).await
    }

    pub async fn all_payments(&self) -> Result<Vec<PaymentRecord>, LedgerError> {
        self.db.list_all_payments().await
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
