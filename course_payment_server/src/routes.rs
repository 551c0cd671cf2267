//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the storage backend so the endpoint tests can run them against mocks; the server
//! registers them with the concrete types in [`crate::server`].
use actix_web::{get, web, HttpResponse, Responder};
use cps_common::{Money, CURRENCY_CODE};
use course_payment_engine::{
    db_types::{CourseId, NewCourse, PaymentConfirmation, Role},
    CatalogManagement,
    EnrollmentLedger,
    IdentityDirectory,
    LedgerApi,
    OrderApi,
    OrderManagement,
    PaymentFlowApi,
    PaymentGateway,
    ProfileManagement,
};
use log::*;

use crate::{
    auth::JwtClaims,
    data_objects::{
        BlockRequest,
        CreateOrderRequest,
        EarningsResult,
        JsonResponse,
        NewCoursePayload,
        OrderResult,
        RoleUpdateRequest,
        VerifyResult,
    },
    errors::{AuthError, ServerError},
    helpers::{authenticated_profile, require_role},
};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Catalog  ----------------------------------------------------
/// The public catalog. No authentication required.
pub async fn get_courses<B: CatalogManagement>(db: web::Data<B>) -> Result<HttpResponse, ServerError> {
    let courses = db.fetch_courses().await?;
    Ok(HttpResponse::Ok().json(courses))
}

pub async fn get_course<B: CatalogManagement>(
    path: web::Path<String>,
    db: web::Data<B>,
) -> Result<HttpResponse, ServerError> {
    let course_id = CourseId::from(path.into_inner());
    let course = db
        .fetch_course(&course_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Course {course_id} does not exist.")))?;
    Ok(HttpResponse::Ok().json(course))
}

/// Publish a new course. Instructors publish under their own subject id; admins may publish too.
pub async fn create_course<B: CatalogManagement + ProfileManagement>(
    claims: JwtClaims,
    body: web::Json<NewCoursePayload>,
    db: web::Data<B>,
) -> Result<HttpResponse, ServerError> {
    let profile = require_role(db.as_ref(), &claims, &[Role::Instructor, Role::Admin]).await?;
    let payload = body.into_inner();
    let price = Money::from_major_f64(payload.price)
        .map_err(|e| ServerError::InvalidRequestBody(format!("Invalid course price. {e}")))?;
    let course_id = CourseId::from(format!("course_{:016x}", rand::random::<u64>()));
    let mut course = NewCourse::new(course_id, payload.title, price, profile.subject_id.as_str());
    course.description = payload.description;
    course.category = payload.category;
    course.instructor_name = Some(profile.display_name.clone());
    course.curriculum = payload.curriculum;
    let created = db.insert_course(course).await?;
    info!("💻️ Course [{}] published by {}", created.course_id, profile.subject_id);
    Ok(HttpResponse::Ok().json(created))
}

//----------------------------------------------   Purchases  --------------------------------------------------
/// Create a gateway order for a course at its current price. Any signed-in, unblocked caller may do this; a
/// profile is not required yet, since profiles are only materialised at verification time.
pub async fn create_payment_order<B, G>(
    claims: JwtClaims,
    body: web::Json<CreateOrderRequest>,
    api: web::Data<OrderApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: CatalogManagement + OrderManagement + ProfileManagement,
    G: PaymentGateway,
{
    if let Some(profile) = api.db().fetch_profile_by_subject(&claims.sub).await? {
        if profile.is_blocked {
            return Err(AuthError::AccountBlocked.into());
        }
    }
    let order = api.create_order(&claims.sub, &body.course_id).await?;
    Ok(HttpResponse::Ok().json(OrderResult::from(order)))
}

/// Verify a payment confirmation and enroll the caller. Idempotent: resubmitting the same confirmation returns
/// success with `duplicate` set, and writes nothing.
pub async fn verify_payment<B, D>(
    claims: JwtClaims,
    body: web::Json<PaymentConfirmation>,
    api: web::Data<PaymentFlowApi<B, D>>,
) -> Result<HttpResponse, ServerError>
where
    B: CatalogManagement + ProfileManagement + OrderManagement + EnrollmentLedger,
    D: IdentityDirectory,
{
    let confirmation = body.into_inner();
    let outcome = api.verify_and_enroll(&claims.sub, &confirmation).await?;
    Ok(HttpResponse::Ok().json(VerifyResult {
        course_id: confirmation.course_id,
        newly_enrolled: outcome.newly_enrolled,
        duplicate: outcome.duplicate,
    }))
}

//----------------------------------------------   My learning  ------------------------------------------------
pub async fn my_enrollments<B>(claims: JwtClaims, api: web::Data<LedgerApi<B>>) -> Result<HttpResponse, ServerError>
where B: ProfileManagement + EnrollmentLedger
{
    let enrollments = api.enrollments_for_subject(&claims.sub).await?;
    Ok(HttpResponse::Ok().json(enrollments))
}

/// Self-service role switching between student and instructor. The admin role is never grantable here; it is
/// seeded from the deployment configuration only.
pub async fn update_my_role<B: ProfileManagement>(
    claims: JwtClaims,
    body: web::Json<RoleUpdateRequest>,
    db: web::Data<B>,
) -> Result<HttpResponse, ServerError> {
    let profile = authenticated_profile(db.as_ref(), &claims).await?;
    let role = body.role;
    if role == Role::Admin {
        return Err(ServerError::InsufficientPermissions(
            "The admin role cannot be self-assigned. It is provisioned at deployment time.".to_string(),
        ));
    }
    let updated = db.assign_role(&profile.subject_id, role).await?;
    info!("💻️ {} changed their role from {} to {role}", profile.subject_id, profile.role);
    Ok(HttpResponse::Ok().json(updated))
}

//----------------------------------------------   Instructors  ------------------------------------------------
pub async fn instructor_payments<B>(
    claims: JwtClaims,
    api: web::Data<LedgerApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: ProfileManagement + EnrollmentLedger,
{
    let profile = require_role(api.db(), &claims, &[Role::Instructor, Role::Admin]).await?;
    let payments = api.payments_for_instructor(&profile.subject_id).await?;
    Ok(HttpResponse::Ok().json(payments))
}

pub async fn instructor_earnings<B: ProfileManagement>(
    claims: JwtClaims,
    db: web::Data<B>,
) -> Result<HttpResponse, ServerError> {
    let profile = require_role(db.as_ref(), &claims, &[Role::Instructor, Role::Admin]).await?;
    Ok(HttpResponse::Ok().json(EarningsResult { earnings: profile.earnings, currency: CURRENCY_CODE.to_string() }))
}

//----------------------------------------------   Admin  ------------------------------------------------------
pub async fn admin_payments<B>(claims: JwtClaims, api: web::Data<LedgerApi<B>>) -> Result<HttpResponse, ServerError>
where B: ProfileManagement + EnrollmentLedger
{
    require_role(api.db(), &claims, &[Role::Admin]).await?;
    let payments = api.all_payments().await?;
    Ok(HttpResponse::Ok().json(payments))
}

pub async fn admin_users<B: ProfileManagement>(
    claims: JwtClaims,
    db: web::Data<B>,
) -> Result<HttpResponse, ServerError> {
    require_role(db.as_ref(), &claims, &[Role::Admin]).await?;
    let users = db.fetch_profiles().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn set_user_blocked<B: ProfileManagement>(
    claims: JwtClaims,
    path: web::Path<String>,
    body: web::Json<BlockRequest>,
    db: web::Data<B>,
) -> Result<HttpResponse, ServerError> {
    let admin = require_role(db.as_ref(), &claims, &[Role::Admin]).await?;
    let subject_id = path.into_inner();
    if subject_id == admin.subject_id {
        return Err(ServerError::InvalidRequestBody("You cannot block your own account.".to_string()));
    }
    let updated = db.set_blocked(&subject_id, body.blocked).await?;
    let verb = if updated.is_blocked { "blocked" } else { "unblocked" };
    info!("💻️ Account {subject_id} was {verb} by {}", admin.subject_id);
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Account {subject_id} is now {verb}."))))
}
