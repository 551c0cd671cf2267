use std::fmt::Debug;

use cps_common::Secret;
use log::*;

use crate::{
    cpe_api::errors::PaymentFlowError,
    db_types::{Enrollment, LearnerProfile, NewLearnerProfile, NewPaymentRecord, PaymentConfirmation},
    helpers::CallbackSignature,
    traits::{
        CatalogManagement,
        EnrollmentLedger,
        IdentityDirectory,
        InsertPaymentResult,
        OrderManagement,
        PaymentGateway,
        ProfileManagement,
    },
};

/// The outcome of a successful verification. `newly_enrolled` is false when the learner already held the
/// enrollment, `duplicate` is true when the payment id had already been recorded (a replayed confirmation);
/// in the duplicate case nothing was written and no earnings were credited.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    pub learner: LearnerProfile,
    pub enrollment: Enrollment,
    pub newly_enrolled: bool,
    pub duplicate: bool,
}

/// `PaymentFlowApi` is the payment verifier: the only writer of enrollment and ledger state on the purchase
/// path. It drives the reconciliation sequence for a client-submitted payment confirmation:
///
/// 1. authenticity check (gateway HMAC signature),
/// 2. course resolution,
/// 3. learner resolution, lazily materialising the profile from the identity directory; blocked learners are
///    refused here, before anything is written,
/// 4. atomic enrollment upsert keyed on (learner, course),
/// 5. ledger append keyed on the gateway payment id,
/// 6. instructor earnings credit, driven by the ledger insert so a replay cannot double-credit.
///
/// No transaction spans steps 4-6. Every sub-step is idempotent by key, so a request that failed part-way can
/// be resubmitted safely: completed steps no-op and the remaining ones run.
pub struct PaymentFlowApi<B, D> {
    db: B,
    directory: D,
    gateway_secret: Secret<String>,
}

impl<B, D> Debug for PaymentFlowApi<B, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B, D> PaymentFlowApi<B, D> {
    pub fn new(db: B, directory: D, gateway_secret: Secret<String>) -> Self {
        Self { db, directory, gateway_secret }
    }
}

impl<B, D> PaymentFlowApi<B, D>
where
    B: CatalogManagement + ProfileManagement + OrderManagement + EnrollmentLedger,
    D: IdentityDirectory,
{
    pub async fn verify_and_enroll(
        &self,
        subject_id: &str,
        confirmation: &PaymentConfirmation,
    ) -> Result<VerifyOutcome, PaymentFlowError> {
        // Steps 1 and 2 are pure reads. Nothing is persisted until the signature has been validated.
        let signature = CallbackSignature::from(confirmation);
        if !signature.is_valid(self.gateway_secret.expose()) {
            warn!(
                "🔐️💰️ Rejecting confirmation for order [{}]: signature mismatch",
                confirmation.order_id
            );
            return Err(PaymentFlowError::InvalidSignature);
        }
        trace!("🔐️💰️ Signature for order [{}] verified", confirmation.order_id);

        let course = self
            .db
            .fetch_course(&confirmation.course_id)
            .await?
            .ok_or_else(|| PaymentFlowError::CourseNotFound(confirmation.course_id.clone()))?;

        let learner = self.resolve_learner(subject_id).await?;
        if learner.is_blocked {
            warn!("🔐️💰️ Blocked learner {subject_id} tried to verify a payment for course [{}]", course.course_id);
            return Err(PaymentFlowError::AccountBlocked(subject_id.to_string()));
        }

        let (enrollment, newly_enrolled) = self.db.upsert_enrollment(learner.id, &course.course_id).await?;
        if newly_enrolled {
            debug!("🎓️ Learner #{} enrolled in course [{}]", learner.id, course.course_id);
        } else {
            trace!("🎓️ Learner #{} was already enrolled in course [{}]", learner.id, course.course_id);
        }

        // The price frozen at order creation wins over the course's current price, so a price change between
        // checkout and confirmation cannot alter the charge.
        let amount = match self.db.fetch_checkout_order(&confirmation.order_id).await? {
            Some(order) => order.amount,
            None => course.price,
        };

        let result = self
            .db
            .append_payment(NewPaymentRecord {
                payment_id: confirmation.payment_id.clone(),
                order_id: confirmation.order_id.clone(),
                learner_id: learner.id,
                course_id: course.course_id.clone(),
                instructor_id: course.instructor_id.clone(),
                amount,
            })
            .await?;

        let duplicate = match &result {
            InsertPaymentResult::Inserted(record) => {
                debug!("🧾️ Payment [{}] recorded: {} for course [{}]", record.payment_id, record.amount, record.course_id);
                let credited = self.db.credit_earnings(&course.instructor_id, record.amount).await?;
                if credited {
                    debug!("💰️ Credited {} to instructor {}", record.amount, course.instructor_id);
                } else {
                    // Deliberately non-fatal: a missing instructor record must not fail an otherwise
                    // successful enrollment.
                    warn!(
                        "💰️ No profile found for instructor {}. Earnings for payment [{}] were not credited.",
                        course.instructor_id, record.payment_id
                    );
                }
                false
            },
            InsertPaymentResult::AlreadyRecorded(payment_id) => {
                info!("🧾️ Payment [{payment_id}] was already recorded. Ledger and earnings are unchanged.");
                true
            },
        };

        Ok(VerifyOutcome { learner, enrollment, newly_enrolled, duplicate })
    }

    /// Fetch the caller's profile, creating it from the identity directory if this is their first interaction.
    /// The upsert is keyed on the subject id, so racing a concurrent first-time sign-in resolves to the same row.
    async fn resolve_learner(&self, subject_id: &str) -> Result<LearnerProfile, PaymentFlowError> {
        if let Some(profile) = self.db.fetch_profile_by_subject(subject_id).await? {
            return Ok(profile);
        }
        info!("🧑️ No profile for subject {subject_id} yet. Materialising one from the identity directory.");
        let attributes = self.directory.fetch_profile(subject_id).await?;
        let profile = self
            .db
            .upsert_profile(NewLearnerProfile::new(subject_id, attributes.display_name, attributes.email))
            .await?;
        Ok(profile)
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
