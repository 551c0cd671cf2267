use crate::{
    db_types::{Course, CourseId, NewCourse},
    traits::LedgerError,
};

/// Read and write access to the course catalog. The payment flow only ever reads; course insertion exists for
/// instructors publishing a course (the authoring UI itself lives elsewhere).
#[allow(async_fn_in_trait)]
pub trait CatalogManagement: Clone {
    async fn fetch_course(&self, course_id: &CourseId) -> Result<Option<Course>, LedgerError>;

    /// All courses, most recently created first.
    async fn fetch_courses(&self) -> Result<Vec<Course>, LedgerError>;

    async fn fetch_courses_for_instructor(&self, instructor_id: &str) -> Result<Vec<Course>, LedgerError>;

    async fn insert_course(&self, course: NewCourse) -> Result<Course, LedgerError>;
}
