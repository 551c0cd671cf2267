use actix_web::{
    body::MessageBody,
    http::StatusCode,
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::{DateTime, Duration, Utc};
use cps_common::Secret;
use course_payment_engine::db_types::Role;
use log::debug;
use serde::Serialize;

use crate::{
    auth::{TokenIssuer, TokenVerifier},
    config::AuthConfig,
};

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("an-entirely-insecure-test-secret-of-decent-length".to_string()) }
}

pub fn issue_token(subject: &str, role: Option<Role>, expiry: DateTime<Utc>) -> String {
    let issuer = TokenIssuer::new(&get_auth_config());
    let validity = expiry - Utc::now();
    issuer.issue_token(subject, role, Some(validity)).expect("Failed to sign token")
}

pub fn valid_token(subject: &str) -> String {
    issue_token(subject, None, Utc::now() + Duration::hours(1))
}

pub async fn get_request<F: FnOnce(&mut ServiceConfig)>(
    auth_header: &str,
    path: &str,
    configure: F,
) -> Result<(StatusCode, String), String> {
    let mut req = TestRequest::get().uri(path);
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {auth_header}")));
    }
    send(req, configure).await
}

pub async fn post_request<B: Serialize, F: FnOnce(&mut ServiceConfig)>(
    auth_header: &str,
    path: &str,
    body: &B,
    configure: F,
) -> Result<(StatusCode, String), String> {
    let mut req = TestRequest::post().uri(path).set_json(body);
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {auth_header}")));
    }
    send(req, configure).await
}

async fn send<F: FnOnce(&mut ServiceConfig)>(req: TestRequest, configure: F) -> Result<(StatusCode, String), String> {
    let req = req.to_request();
    let verifier = TokenVerifier::new(&get_auth_config());
    let app = App::new().app_data(web::Data::new(verifier)).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::try_call_service(&service, req).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}
