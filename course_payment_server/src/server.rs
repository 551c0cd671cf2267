use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use course_payment_engine::{
    db_types::{NewLearnerProfile, Role},
    LedgerApi,
    OrderApi,
    PaymentFlowApi,
    ProfileManagement,
    SqliteDatabase,
    MIGRATOR,
};
use log::*;

use crate::{
    auth::TokenVerifier,
    config::ServerConfig,
    errors::ServerError,
    integrations::{CheckoutClient, IdentityClient},
    routes::{
        admin_payments,
        admin_users,
        create_course,
        create_payment_order,
        get_course,
        get_courses,
        health,
        instructor_earnings,
        instructor_payments,
        my_enrollments,
        set_user_blocked,
        update_my_role,
        verify_payment,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.migrate_on_startup {
        MIGRATOR.run(db.pool()).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    } else {
        info!("🪛️ Skipping startup migrations. The schema is assumed to be current.");
    }
    seed_admin(&db, config.seed_admin_subject.as_deref()).await?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Make sure the configured seed subject holds the admin role. Both calls are idempotent, so restarting the
/// server with the same configuration is a no-op.
pub async fn seed_admin<B: ProfileManagement>(db: &B, seed_subject: Option<&str>) -> Result<(), ServerError> {
    let Some(subject) = seed_subject else {
        return Ok(());
    };
    // The placeholder attributes only apply if no profile exists yet; an existing profile keeps its own.
    let profile = NewLearnerProfile::new(subject, "Administrator", format!("{subject}@seeded.admin"));
    db.upsert_profile(profile.with_role(Role::Admin)).await?;
    let admin = db.assign_role(subject, Role::Admin).await?;
    info!("🔑️ Admin role is held by {} ({})", admin.subject_id, admin.display_name);
    Ok(())
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let checkout = CheckoutClient::new(config.checkout.clone())?;
    let identity = IdentityClient::new(config.identity.clone())?;
    let gateway_secret = config.checkout.key_secret.clone();
    let srv = HttpServer::new(move || {
        let order_api = OrderApi::new(db.clone(), checkout.clone());
        let payment_api = PaymentFlowApi::new(db.clone(), identity.clone(), gateway_secret.clone());
        let ledger_api = LedgerApi::new(db.clone());
        let verifier = TokenVerifier::new(&config.auth);
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("cps::access_log"))
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(order_api))
            .app_data(web::Data::new(payment_api))
            .app_data(web::Data::new(ledger_api))
            .app_data(web::Data::new(verifier));
        // Routes that require authentication
        let api_scope = web::scope("/api")
            .service(web::resource("/courses").route(web::post().to(create_course::<SqliteDatabase>)))
            .service(
                web::resource("/payments/order")
                    .route(web::post().to(create_payment_order::<SqliteDatabase, CheckoutClient>)),
            )
            .service(
                web::resource("/payments/verify")
                    .route(web::post().to(verify_payment::<SqliteDatabase, IdentityClient>)),
            )
            .service(web::resource("/my/enrollments").route(web::get().to(my_enrollments::<SqliteDatabase>)))
            .service(web::resource("/my/role").route(web::post().to(update_my_role::<SqliteDatabase>)))
            .service(
                web::resource("/instructor/payments").route(web::get().to(instructor_payments::<SqliteDatabase>)),
            )
            .service(
                web::resource("/instructor/earnings").route(web::get().to(instructor_earnings::<SqliteDatabase>)),
            )
            .service(web::resource("/admin/payments").route(web::get().to(admin_payments::<SqliteDatabase>)))
            .service(web::resource("/admin/users").route(web::get().to(admin_users::<SqliteDatabase>)))
            .service(
                web::resource("/admin/users/{subject_id}/block")
                    .route(web::post().to(set_user_blocked::<SqliteDatabase>)),
            );
        app.service(health)
            .service(web::resource("/courses").route(web::get().to(get_courses::<SqliteDatabase>)))
            .service(web::resource("/courses/{course_id}").route(web::get().to(get_course::<SqliteDatabase>)))
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
