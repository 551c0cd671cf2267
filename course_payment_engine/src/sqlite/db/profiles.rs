use cps_common::Money;
use sqlx::SqliteConnection;

use crate::{
    db_types::{LearnerProfile, NewLearnerProfile, Role},
    traits::LedgerError,
};

pub async fn fetch_profile_by_subject(
    subject_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<LearnerProfile>, LedgerError> {
    let profile = sqlx::query_as::<_, LearnerProfile>("SELECT * FROM learner_profiles WHERE subject_id = ? LIMIT 1")
        .bind(subject_id)
        .fetch_optional(conn)
        .await?;
    Ok(profile)
}

/// Insert-if-absent keyed on the subject id. The targetless conflict clause makes this safe to race even when
/// the losing insert collides on the email unique key rather than the subject id: both callers end up reading
/// the same row, and the loser's attributes are discarded. The follow-up fetch only comes back empty when a
/// different subject already owns the email, which is reported as an upsert conflict rather than a raw
/// constraint error.
pub async fn upsert_profile(
    profile: NewLearnerProfile,
    conn: &mut SqliteConnection,
) -> Result<LearnerProfile, LedgerError> {
    sqlx::query(
        "INSERT INTO learner_profiles (subject_id, display_name, email, role) VALUES (?, ?, ?, ?) \
         ON CONFLICT DO NOTHING",
    )
    .bind(&profile.subject_id)
    .bind(&profile.display_name)
    .bind(&profile.email)
    .bind(profile.role)
    .execute(&mut *conn)
    .await?;
    fetch_profile_by_subject(&profile.subject_id, conn)
        .await?
        .ok_or_else(|| LedgerError::UpsertRace(profile.subject_id.clone()))
}

pub async fn assign_role(
    subject_id: &str,
    role: Role,
    conn: &mut SqliteConnection,
) -> Result<LearnerProfile, LedgerError> {
    sqlx::query_as::<_, LearnerProfile>(
        "UPDATE learner_profiles SET role = ?, updated_at = CURRENT_TIMESTAMP WHERE subject_id = ? RETURNING *",
    )
    .bind(role)
    .bind(subject_id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| LedgerError::ProfileNotFound(subject_id.to_string()))
}

pub async fn set_blocked(
    subject_id: &str,
    blocked: bool,
    conn: &mut SqliteConnection,
) -> Result<LearnerProfile, LedgerError> {
    sqlx::query_as::<_, LearnerProfile>(
        "UPDATE learner_profiles SET is_blocked = ?, updated_at = CURRENT_TIMESTAMP WHERE subject_id = ? \
         RETURNING *",
    )
    .bind(blocked)
    .bind(subject_id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| LedgerError::ProfileNotFound(subject_id.to_string()))
}

/// A single atomic increment on the running balance. Returns false when no row matched, and credits nothing in
/// that case.
pub async fn credit_earnings(
    subject_id: &str,
    amount: Money,
    conn: &mut SqliteConnection,
) -> Result<bool, LedgerError> {
    let result = sqlx::query(
        "UPDATE learner_profiles SET earnings = earnings + ?, updated_at = CURRENT_TIMESTAMP WHERE subject_id = ?",
    )
    .bind(amount)
    .bind(subject_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn fetch_profiles(conn: &mut SqliteConnection) -> Result<Vec<LearnerProfile>, LedgerError> {
    let profiles = sqlx::query_as::<_, LearnerProfile>("SELECT * FROM learner_profiles ORDER BY id")
        .fetch_all(conn)
        .await?;
    Ok(profiles)
}
