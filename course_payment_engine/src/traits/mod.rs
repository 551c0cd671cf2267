//! The traits a storage backend must implement to power the payment engine, plus the seams for the two external
//! providers (checkout gateway, identity directory). The backend is assumed to provide per-document atomicity
//! (single-statement upserts and increments) but no multi-table transactions; every multi-step flow in the API
//! layer is therefore built from sub-steps that are individually idempotent by key.
mod catalog_management;
mod enrollment_ledger;
mod order_management;
mod profile_management;
mod providers;

pub use catalog_management::CatalogManagement;
pub use enrollment_ledger::{EnrollmentLedger, InsertPaymentResult};
pub use order_management::OrderManagement;
pub use profile_management::ProfileManagement;
pub use providers::{GatewayError, GatewayOrder, IdentityDirectory, IdentityError, IdentityProfile, PaymentGateway};

use thiserror::Error;

use crate::db_types::CourseId;

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("We have an internal database engine error (configuration/uptime etc.): {0}")]
    DatabaseError(String),
    #[error("The course {0} does not exist")]
    CourseNotFound(CourseId),
    #[error("No learner profile exists for subject id {0}")]
    ProfileNotFound(String),
    #[error("The profile for {0} could not be created. Another profile already owns one of its unique attributes.")]
    UpsertRace(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::DatabaseError(e.to_string())
    }
}
