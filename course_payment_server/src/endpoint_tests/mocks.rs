use cps_common::Money;
use course_payment_engine::{
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
    traits::{
        CatalogManagement,
        EnrollmentLedger,
        InsertPaymentResult,
        LedgerError,
        OrderManagement,
        ProfileManagement,
    },
};
use mockall::mock;

mock! {
    pub Backend {}

    impl Clone for Backend {
        fn clone(&self) -> Self;
    }

    impl CatalogManagement for Backend {
        async fn fetch_course(&self, course_id: &CourseId) -> Result<Option<Course>, LedgerError>;
        async fn fetch_courses(&self) -> Result<Vec<Course>, LedgerError>;
        async fn fetch_courses_for_instructor(&self, instructor_id: &str) -> Result<Vec<Course>, LedgerError>;
        async fn insert_course(&self, course: NewCourse) -> Result<Course, LedgerError>;
    }

    impl ProfileManagement for Backend {
        async fn fetch_profile_by_subject(&self, subject_id: &str) -> Result<Option<LearnerProfile>, LedgerError>;
        async fn upsert_profile(&self, profile: NewLearnerProfile) -> Result<LearnerProfile, LedgerError>;
        async fn assign_role(&self, subject_id: &str, role: Role) -> Result<LearnerProfile, LedgerError>;
        async fn set_blocked(&self, subject_id: &str, blocked: bool) -> Result<LearnerProfile, LedgerError>;
        async fn credit_earnings(&self, subject_id: &str, amount: Money) -> Result<bool, LedgerError>;
        async fn fetch_profiles(&self) -> Result<Vec<LearnerProfile>, LedgerError>;
    }

    impl OrderManagement for Backend {
        async fn insert_checkout_order(&self, order: NewCheckoutOrder) -> Result<CheckoutOrder, LedgerError>;
        async fn fetch_checkout_order(&self, order_id: &OrderId) -> Result<Option<CheckoutOrder>, LedgerError>;
    }

    impl EnrollmentLedger for Backend {
        async fn find_enrollment(&self, learner_id: i64, course_id: &CourseId) -> Result<Option<Enrollment>, LedgerError>;
        async fn upsert_enrollment(&self, learner_id: i64, course_id: &CourseId) -> Result<(Enrollment, bool), LedgerError>;
        async fn append_payment(&self, record: NewPaymentRecord) -> Result<InsertPaymentResult, LedgerError>;
        async fn list_enrollments_for_learner(&self, learner_id: i64) -> Result<Vec<Enrollment>, LedgerError>;
        async fn list_payments_for_instructor(&self, instructor_id: &str) -> Result<Vec<PaymentRecord>, LedgerError>;
        async fn list_all_payments(&self) -> Result<Vec<PaymentRecord>, LedgerError>;
    }
}
