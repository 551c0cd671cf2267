use actix_web::{http::StatusCode, web};
use chrono::{Duration, Utc};
use course_payment_engine::db_types::Role;

use super::{
    helpers::{get_request, issue_token, post_request, valid_token},
    mocks::MockBackend,
    sample_profile,
};
use crate::{
    data_objects::BlockRequest,
    routes::{admin_users, set_user_blocked},
};

fn users_app(db: MockBackend) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(db))
            .service(web::resource("/api/admin/users").route(web::get().to(admin_users::<MockBackend>)));
    }
}

#[actix_web::test]
async fn an_expired_token_is_rejected() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("subj_admin", Some(Role::Admin), Utc::now() - Duration::days(1));
    let (status, body) = get_request(&token, "/api/admin/users", users_app(MockBackend::new())).await.unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Access token is invalid"));
}

#[actix_web::test]
async fn students_cannot_list_users() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("subj_student");
    let mut db = MockBackend::new();
    db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(1, s, Role::Student))));
    let (status, _) = get_request(&token, "/api/admin/users", users_app(db)).await.unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
}

/// A token claiming the admin role must not help if the stored role is student.
#[actix_web::test]
async fn the_stored_role_beats_the_token_role_claim() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("subj_student", Some(Role::Admin), Utc::now() + Duration::hours(1));
    let mut db = MockBackend::new();
    db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(1, s, Role::Student))));
    let (status, _) = get_request(&token, "/api/admin/users", users_app(db)).await.unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admins_can_list_users() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("subj_admin");
    let mut db = MockBackend::new();
    db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(1, s, Role::Admin))));
    db.expect_fetch_profiles().returning(|| {
        Ok(vec![sample_profile(1, "subj_admin", Role::Admin), sample_profile(2, "subj_student", Role::Student)])
    });
    let (status, body) = get_request(&token, "/api/admin/users", users_app(db)).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("subj_student"));
}

fn block_app(db: MockBackend) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(db)).service(
            web::resource("/api/admin/users/{subject_id}/block")
                .route(web::post().to(set_user_blocked::<MockBackend>)),
        );
    }
}

#[actix_web::test]
async fn admins_can_block_accounts() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("subj_admin");
    let mut db = MockBackend::new();
    db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(1, s, Role::Admin))));
    db.expect_set_blocked().returning(|s, blocked| {
        let mut profile = sample_profile(2, s, Role::Student);
        profile.is_blocked = blocked;
        Ok(profile)
    });
    let (status, body) =
        post_request(&token, "/api/admin/users/subj_student/block", &BlockRequest { blocked: true }, block_app(db))
            .await
            .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("now blocked"));
}

#[actix_web::test]
async fn admins_cannot_block_themselves() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("subj_admin");
    let mut db = MockBackend::new();
    db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(1, s, Role::Admin))));
    let (status, body) =
        post_request(&token, "/api/admin/users/subj_admin/block", &BlockRequest { blocked: true }, block_app(db))
            .await
            .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("cannot block your own account"));
}
