use sqlx::{types::Json, SqliteConnection};

use crate::{
    db_types::{Course, CourseId, NewCourse},
    traits::LedgerError,
};

pub async fn fetch_course(course_id: &CourseId, conn: &mut SqliteConnection) -> Result<Option<Course>, LedgerError> {
    let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE course_id = ? LIMIT 1")
        .bind(course_id)
        .fetch_optional(conn)
        .await?;
    Ok(course)
}

pub async fn fetch_courses(conn: &mut SqliteConnection) -> Result<Vec<Course>, LedgerError> {
    let courses = sqlx::query_as::<_, Course>("SELECT * FROM courses ORDER BY created_at DESC, id DESC")
        .fetch_all(conn)
        .await?;
    Ok(courses)
}

pub async fn fetch_courses_for_instructor(
    instructor_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Course>, LedgerError> {
    let courses = sqlx::query_as::<_, Course>(
        "SELECT * FROM courses WHERE instructor_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(instructor_id)
    .fetch_all(conn)
    .await?;
    Ok(courses)
}

pub async fn insert_course(course: NewCourse, conn: &mut SqliteConnection) -> Result<Course, LedgerError> {
    let inserted = sqlx::query_as::<_, Course>(
        "INSERT INTO courses (course_id, title, description, price, category, instructor_id, instructor_name, \
         curriculum) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&course.course_id)
    .bind(&course.title)
    .bind(&course.description)
    .bind(course.price)
    .bind(&course.category)
    .bind(&course.instructor_id)
    .bind(&course.instructor_name)
    .bind(Json(&course.curriculum))
    .fetch_one(conn)
    .await?;
    Ok(inserted)
}
