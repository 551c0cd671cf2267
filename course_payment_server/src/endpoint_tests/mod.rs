mod helpers;
mod mocks;

mod admin;
mod catalog;
mod payments;

use chrono::{DateTime, Utc};
use cps_common::Money;
use course_payment_engine::db_types::{Course, CourseId, Json, LearnerProfile, Role};

fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z").unwrap().with_timezone(&Utc)
}

fn rupees(major: i64) -> Money {
    Money::from_major(major).unwrap()
}

fn sample_course(course_id: &str, price: Money, instructor_id: &str) -> Course {
    Course {
        id: 1,
        course_id: CourseId::from(course_id),
        title: "Ownership Without Tears".to_string(),
        description: "A gentle introduction".to_string(),
        price,
        category: Some("programming".to_string()),
        instructor_id: instructor_id.to_string(),
        instructor_name: Some("Ines Structor".to_string()),
        curriculum: Json(Vec::new()),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

fn sample_profile(id: i64, subject_id: &str, role: Role) -> LearnerProfile {
    LearnerProfile {
        id,
        subject_id: subject_id.to_string(),
        display_name: "Lea Nerd".to_string(),
        email: format!("{subject_id}@example.com"),
        role,
        earnings: Money::from_cents(0),
        is_blocked: false,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}
