use cps_common::Money;
use sqlx::SqlitePool;

use crate::{
    db_types::{
        CheckoutOrder,
        Course,
        CourseId,
        Enrollment,
        LearnerProfile,
        NewCheckoutOrder,
        NewCourse,
        NewLearnerProfile,
        NewPaymentRecord,
        OrderId,
        PaymentRecord,
        Role,
    },
    sqlite::db,
    traits::{
        CatalogManagement,
        EnrollmentLedger,
        InsertPaymentResult,
        LedgerError,
        OrderManagement,
        ProfileManagement,
    },
};

/// The SQLite implementation of the storage traits. Clones share the underlying connection pool, so handing
/// copies to each API object is cheap.
#[derive(Clone, Debug)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Connect using the URL from the environment (`CPS_DATABASE_URL`), or the default if unset.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db::db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = db::new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_course(&self, course_id: &CourseId) -> Result<Option<Course>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::courses::fetch_course(course_id, &mut conn).await
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::courses::fetch_courses(&mut conn).await
    }

    async fn fetch_courses_for_instructor(&self, instructor_id: &str) -> Result<Vec<Course>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::courses::fetch_courses_for_instructor(instructor_id, &mut conn).await
    }

    async fn insert_course(&self, course: NewCourse) -> Result<Course, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::courses::insert_course(course, &mut conn).await
    }
}

impl ProfileManagement for SqliteDatabase {
    async fn fetch_profile_by_subject(&self, subject_id: &str) -> Result<Option<LearnerProfile>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::profiles::fetch_profile_by_subject(subject_id, &mut conn).await
    }

    async fn upsert_profile(&self, profile: NewLearnerProfile) -> Result<LearnerProfile, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::profiles::upsert_profile(profile, &mut conn).await
    }

    async fn assign_role(&self, subject_id: &str, role: Role) -> Result<LearnerProfile, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::profiles::assign_role(subject_id, role, &mut conn).await
    }

    async fn set_blocked(&self, subject_id: &str, blocked: bool) -> Result<LearnerProfile, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::profiles::set_blocked(subject_id, blocked, &mut conn).await
    }

    async fn credit_earnings(&self, subject_id: &str, amount: Money) -> Result<bool, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::profiles::credit_earnings(subject_id, amount, &mut conn).await
    }

    async fn fetch_profiles(&self) -> Result<Vec<LearnerProfile>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::profiles::fetch_profiles(&mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_checkout_order(&self, order: NewCheckoutOrder) -> Result<CheckoutOrder, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::checkout_orders::insert_checkout_order(order, &mut conn).await
    }

    async fn fetch_checkout_order(&self, order_id: &OrderId) -> Result<Option<CheckoutOrder>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::checkout_orders::fetch_checkout_order(order_id, &mut conn).await
    }
}

impl EnrollmentLedger for SqliteDatabase {
    async fn find_enrollment(
        &self,
        learner_id: i64,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::enrollments::find_enrollment(learner_id, course_id, &mut conn).await
    }

    async fn upsert_enrollment(
        &self,
        learner_id: i64,
        course_id: &CourseId,
    ) -> Result<(Enrollment, bool), LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::enrollments::upsert_enrollment(learner_id, course_id, &mut conn).await
    }

    async fn append_payment(&self, record: NewPaymentRecord) -> Result<InsertPaymentResult, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::payments::append_payment(record, &mut conn).await
    }

    async fn list_enrollments_for_learner(&self, learner_id: i64) -> Result<Vec<Enrollment>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::enrollments::list_enrollments_for_learner(learner_id, &mut conn).await
    }

    async fn list_payments_for_instructor(&self, instructor_id: &str) -> Result<Vec<PaymentRecord>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::payments::list_payments_for_instructor(instructor_id, &mut conn).await
    }

    async fn list_all_payments(&self) -> Result<Vec<PaymentRecord>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::payments::list_all_payments(&mut conn).await
    }
}
