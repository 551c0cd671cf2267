use actix_web::{http::StatusCode, web};
use course_payment_engine::db_types::Role;

use super::{
    helpers::{get_request, post_request, valid_token},
    mocks::MockBackend,
    rupees,
    sample_course,
    sample_profile,
};
use crate::{
    data_objects::NewCoursePayload,
    routes::{create_course, get_course, get_courses},
};

#[actix_web::test]
async fn listing_courses_is_public() {
    let _ = env_logger::try_init().ok();
    let courses = vec![
        sample_course("course_rust", rupees(499), "instr_1"),
        sample_course("course_go", rupees(299), "instr_2"),
    ];
    let (status, body) = get_request("", "/courses", move |cfg| {
        let mut db = MockBackend::new();
        db.expect_fetch_courses().returning(move || Ok(courses.clone()));
        cfg.app_data(web::Data::new(db))
            .service(web::resource("/courses").route(web::get().to(get_courses::<MockBackend>)));
    })
    .await
    .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("course_rust"));
    assert!(body.contains("course_go"));
}

#[actix_web::test]
async fn a_missing_course_is_not_found() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/courses/course_ghost", |cfg| {
        let mut db = MockBackend::new();
        db.expect_fetch_course().returning(|_| Ok(None));
        cfg.app_data(web::Data::new(db))
            .service(web::resource("/courses/{course_id}").route(web::get().to(get_course::<MockBackend>)));
    })
    .await
    .unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("does not exist"));
}

fn course_payload() -> NewCoursePayload {
    NewCoursePayload {
        title: "Ownership Without Tears".to_string(),
        description: "A gentle introduction".to_string(),
        price: 499.0,
        category: Some("programming".to_string()),
        curriculum: Vec::new(),
    }
}

#[actix_web::test]
async fn students_cannot_publish_courses() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("subj_student");
    let (status, body) = post_request(&token, "/api/courses", &course_payload(), |cfg| {
        let mut db = MockBackend::new();
        db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(1, s, Role::Student))));
        cfg.app_data(web::Data::new(db))
            .service(web::resource("/api/courses").route(web::post().to(create_course::<MockBackend>)));
    })
    .await
    .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("Insufficient Permissions"));
}

#[actix_web::test]
async fn an_out_of_range_price_is_rejected() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("instr_1");
    let mut payload = course_payload();
    payload.price = 1e18;
    let (status, body) = post_request(&token, "/api/courses", &payload, |cfg| {
        let mut db = MockBackend::new();
        db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(7, s, Role::Instructor))));
        // No insert_course expectation: the payload must be refused before anything is stored.
        cfg.app_data(web::Data::new(db))
            .service(web::resource("/api/courses").route(web::post().to(create_course::<MockBackend>)));
    })
    .await
    .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid course price"));
}

#[actix_web::test]
async fn instructors_can_publish_courses() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("instr_1");
    let (status, body) = post_request(&token, "/api/courses", &course_payload(), |cfg| {
        let mut db = MockBackend::new();
        db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(7, s, Role::Instructor))));
        db.expect_insert_course().returning(|new_course| {
            let mut course = sample_course(new_course.course_id.as_str(), new_course.price, &new_course.instructor_id);
            course.title = new_course.title;
            Ok(course)
        });
        cfg.app_data(web::Data::new(db))
            .service(web::resource("/api/courses").route(web::post().to(create_course::<MockBackend>)));
    })
    .await
    .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ownership Without Tears"));
    assert!(body.contains("instr_1"));
}
