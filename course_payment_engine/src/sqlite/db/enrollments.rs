use sqlx::SqliteConnection;

use crate::{
    db_types::{CourseId, Enrollment},
    traits::LedgerError,
};

pub async fn find_enrollment(
    learner_id: i64,
    course_id: &CourseId,
    conn: &mut SqliteConnection,
) -> Result<Option<Enrollment>, LedgerError> {
    let enrollment = sqlx::query_as::<_, Enrollment>(
        "SELECT * FROM enrollments WHERE learner_id = ? AND course_id = ? LIMIT 1",
    )
    .bind(learner_id)
    .bind(course_id)
    .fetch_optional(conn)
    .await?;
    Ok(enrollment)
}

/// Find-or-create keyed on (learner, course). The unique key plus the conflict clause guarantee that two
/// concurrent calls for the same pair both succeed and exactly one row is created between them.
pub async fn upsert_enrollment(
    learner_id: i64,
    course_id: &CourseId,
    conn: &mut SqliteConnection,
) -> Result<(Enrollment, bool), LedgerError> {
    let result = sqlx::query(
        "INSERT INTO enrollments (learner_id, course_id) VALUES (?, ?) \
         ON CONFLICT (learner_id, course_id) DO NOTHING",
    )
    .bind(learner_id)
    .bind(course_id)
    .execute(&mut *conn)
    .await?;
    let created = result.rows_affected() > 0;
    let enrollment = find_enrollment(learner_id, course_id, conn)
        .await?
        .ok_or_else(|| LedgerError::UpsertRace(format!("enrollment {learner_id}/{course_id}")))?;
    Ok((enrollment, created))
}

pub async fn list_enrollments_for_learner(
    learner_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Enrollment>, LedgerError> {
    let enrollments =
        sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE learner_id = ? ORDER BY created_at, id")
            .bind(learner_id)
            .fetch_all(conn)
            .await?;
    Ok(enrollments)
}
