use cps_common::Money;

use crate::{
    db_types::{LearnerProfile, NewLearnerProfile, Role},
    traits::LedgerError,
};

/// Learner profile storage. Profiles are created lazily on first authenticated interaction, so creation is an
/// idempotent upsert keyed on the identity provider's subject id and is safe to race against a concurrent
/// first-time sign-in.
#[allow(async_fn_in_trait)]
pub trait ProfileManagement: Clone {
    async fn fetch_profile_by_subject(&self, subject_id: &str) -> Result<Option<LearnerProfile>, LedgerError>;

    /// Atomic find-or-create. If a profile already exists for the subject id, it is returned unchanged; the
    /// supplied attributes only apply on first creation.
    async fn upsert_profile(&self, profile: NewLearnerProfile) -> Result<LearnerProfile, LedgerError>;

    async fn assign_role(&self, subject_id: &str, role: Role) -> Result<LearnerProfile, LedgerError>;

    async fn set_blocked(&self, subject_id: &str, blocked: bool) -> Result<LearnerProfile, LedgerError>;

    /// Adds `amount` to the profile's running earnings balance in a single atomic increment. Returns false when
    /// no profile exists for the subject id, in which case nothing is credited.
    async fn credit_earnings(&self, subject_id: &str, amount: Money) -> Result<bool, LedgerError>;

    /// All profiles, for the admin back-office.
    async fn fetch_profiles(&self) -> Result<Vec<LearnerProfile>, LedgerError>;
}
