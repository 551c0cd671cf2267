use actix_web::{http::StatusCode, web};
use cps_common::{Money, Secret};
use course_payment_engine::{
    db_types::{CheckoutOrder, CourseId, Enrollment, OrderId, PaymentConfirmation, PaymentRecord, Role},
    helpers::sign_confirmation,
    traits::{
        GatewayError,
        GatewayOrder,
        IdentityDirectory,
        IdentityError,
        IdentityProfile,
        InsertPaymentResult,
        PaymentGateway,
    },
    OrderApi,
    PaymentFlowApi,
};

use super::{
    fixed_time,
    helpers::{post_request, valid_token},
    mocks::MockBackend,
    rupees,
    sample_course,
    sample_profile,
};
use crate::{
    data_objects::CreateOrderRequest,
    routes::{create_payment_order, verify_payment},
};

const TEST_GATEWAY_SECRET: &str = "endpoint-test-gateway-secret";

#[derive(Clone, Default)]
struct FakeDirectory {
    known: Vec<IdentityProfile>,
}

impl IdentityDirectory for FakeDirectory {
    async fn fetch_profile(&self, subject_id: &str) -> Result<IdentityProfile, IdentityError> {
        self.known
            .iter()
            .find(|p| p.subject_id == subject_id)
            .cloned()
            .ok_or_else(|| IdentityError::UnknownSubject(subject_id.to_string()))
    }
}

#[derive(Clone)]
struct FakeGateway;

impl PaymentGateway for FakeGateway {
    async fn create_order(&self, amount: Money, _currency: &str, _receipt: &str) -> Result<GatewayOrder, GatewayError> {
        Ok(GatewayOrder { order_id: OrderId::from("order_55"), amount })
    }
}

fn confirmation(order_id: &str, payment_id: &str, course_id: &str) -> PaymentConfirmation {
    let order_id = OrderId::from(order_id);
    let signature = sign_confirmation(&order_id, payment_id, TEST_GATEWAY_SECRET);
    PaymentConfirmation { order_id, payment_id: payment_id.to_string(), signature, course_id: CourseId::from(course_id) }
}

fn verify_app(db: MockBackend) -> impl FnOnce(&mut actix_web::web::ServiceConfig) {
    move |cfg| {
        let api = PaymentFlowApi::new(db, FakeDirectory::default(), Secret::new(TEST_GATEWAY_SECRET.to_string()));
        cfg.app_data(web::Data::new(api)).service(
            web::resource("/api/payments/verify")
                .route(web::post().to(verify_payment::<MockBackend, FakeDirectory>)),
        );
    }
}

fn enrollment(learner_id: i64, course_id: &str) -> Enrollment {
    Enrollment { id: 1, learner_id, course_id: CourseId::from(course_id), created_at: fixed_time() }
}

fn payment_record(payment_id: &str, amount: Money) -> PaymentRecord {
    PaymentRecord {
        id: 1,
        payment_id: payment_id.to_string(),
        order_id: OrderId::from("order_1"),
        learner_id: 1,
        course_id: CourseId::from("course_rust"),
        instructor_id: "instr_1".to_string(),
        amount,
        created_at: fixed_time(),
    }
}

#[actix_web::test]
async fn verification_requires_a_token() {
    let _ = env_logger::try_init().ok();
    let conf = confirmation("order_1", "pay_1", "course_rust");
    let (status, body) = post_request("", "/api/payments/verify", &conf, verify_app(MockBackend::new())).await.unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("No access token was provided"));
}

#[actix_web::test]
async fn a_forged_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let mut conf = confirmation("order_1", "pay_1", "course_rust");
    conf.signature = sign_confirmation(&OrderId::from("order_1"), "pay_1", "some-other-secret");
    let token = valid_token("learner_1");
    // No mock expectations are set: the request must be rejected before the backend is touched.
    let (status, body) = post_request(&token, "/api/payments/verify", &conf, verify_app(MockBackend::new())).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("signature is invalid"));
}

#[actix_web::test]
async fn a_valid_confirmation_reports_the_new_enrollment() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("learner_1");
    let mut db = MockBackend::new();
    db.expect_fetch_course().returning(|id| Ok(Some(sample_course(id.as_str(), rupees(499), "instr_1"))));
    db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(1, s, Role::Student))));
    db.expect_upsert_enrollment().returning(|learner_id, course_id| Ok((enrollment(learner_id, course_id.as_str()), true)));
    db.expect_fetch_checkout_order().returning(|_| Ok(None));
    db.expect_append_payment().returning(|rec| Ok(InsertPaymentResult::Inserted(payment_record(&rec.payment_id, rec.amount))));
    db.expect_credit_earnings().returning(|_, _| Ok(true));

    let conf = confirmation("order_1", "pay_1", "course_rust");
    let (status, body) = post_request(&token, "/api/payments/verify", &conf, verify_app(db)).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"newly_enrolled\":true"));
    assert!(body.contains("\"duplicate\":false"));
}

#[actix_web::test]
async fn a_replayed_confirmation_is_acknowledged_without_a_second_credit() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("learner_1");
    let mut db = MockBackend::new();
    db.expect_fetch_course().returning(|id| Ok(Some(sample_course(id.as_str(), rupees(499), "instr_1"))));
    db.expect_fetch_profile_by_subject().returning(|s| Ok(Some(sample_profile(1, s, Role::Student))));
    db.expect_upsert_enrollment().returning(|learner_id, course_id| Ok((enrollment(learner_id, course_id.as_str()), false)));
    db.expect_fetch_checkout_order().returning(|_| Ok(None));
    db.expect_append_payment().returning(|rec| Ok(InsertPaymentResult::AlreadyRecorded(rec.payment_id)));
    // No expectation for credit_earnings: the handler must not call it for a replay.

    let conf = confirmation("order_1", "pay_1", "course_rust");
    let (status, body) = post_request(&token, "/api/payments/verify", &conf, verify_app(db)).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"duplicate\":true"));
}

#[actix_web::test]
async fn a_blocked_account_cannot_verify_payments() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("learner_blocked");
    let mut db = MockBackend::new();
    db.expect_fetch_course().returning(|id| Ok(Some(sample_course(id.as_str(), rupees(499), "instr_1"))));
    db.expect_fetch_profile_by_subject().returning(|s| {
        let mut profile = sample_profile(3, s, Role::Student);
        profile.is_blocked = true;
        Ok(Some(profile))
    });
    // No expectations beyond the reads: a blocked account must not reach the enrollment upsert.

    let conf = confirmation("order_1", "pay_1", "course_rust");
    let (status, body) = post_request(&token, "/api/payments/verify", &conf, verify_app(db)).await.unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("blocked"));
}

fn order_app(db: MockBackend) -> impl FnOnce(&mut actix_web::web::ServiceConfig) {
    move |cfg| {
        let api = OrderApi::new(db, FakeGateway);
        cfg.app_data(web::Data::new(api)).service(
            web::resource("/api/payments/order")
                .route(web::post().to(create_payment_order::<MockBackend, FakeGateway>)),
        );
    }
}

#[actix_web::test]
async fn an_order_is_created_at_the_course_price() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("learner_1");
    let mut db = MockBackend::new();
    db.expect_fetch_profile_by_subject().returning(|_| Ok(None));
    db.expect_fetch_course().returning(|id| Ok(Some(sample_course(id.as_str(), rupees(499), "instr_1"))));
    db.expect_insert_checkout_order().returning(|order| {
        Ok(CheckoutOrder {
            id: 1,
            order_id: order.order_id,
            course_id: order.course_id,
            subject_id: order.subject_id,
            amount: order.amount,
            currency: order.currency,
            receipt: order.receipt,
            created_at: fixed_time(),
        })
    });

    let body = CreateOrderRequest { course_id: CourseId::from("course_rust") };
    let (status, body) = post_request(&token, "/api/payments/order", &body, order_app(db)).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("order_55"));
    assert!(body.contains("49900"));
}

#[actix_web::test]
async fn a_blocked_account_cannot_create_orders() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("learner_blocked");
    let mut db = MockBackend::new();
    db.expect_fetch_profile_by_subject().returning(|s| {
        let mut profile = sample_profile(3, s, Role::Student);
        profile.is_blocked = true;
        Ok(Some(profile))
    });

    let body = CreateOrderRequest { course_id: CourseId::from("course_rust") };
    let (status, body) = post_request(&token, "/api/payments/order", &body, order_app(db)).await.unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("blocked"));
}
