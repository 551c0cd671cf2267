//! Course Payment Engine
//!
//! The core logic for turning a client-asserted payment confirmation into a durable, idempotent grant of course
//! access and instructor earnings. It is provider-agnostic: the checkout gateway and the identity directory are
//! reached through traits, and the document store behind the enrollment ledger is pluggable in the same way.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You should never need to
//!    access the database directly; use the public API instead. The exception is the data types used in the
//!    database, which are defined in the `db_types` module and are public.
//! 2. The public API ([`mod@cpe_api`]). `OrderApi` initiates gateway orders, `PaymentFlowApi` drives the
//!    verify-and-enroll reconciliation sequence, and `LedgerApi` serves the read side ("my learning", instructor
//!    payment history, admin aggregation). Backends implement the traits in [`mod@traits`] to power these APIs.
pub mod cpe_api;
pub mod db_types;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteDatabase, MIGRATOR};
pub use cpe_api::{
    errors::{OrderError, PaymentFlowError},
    ledger_api::LedgerApi,
    order_api::OrderApi,
    payment_flow_api::{PaymentFlowApi, VerifyOutcome},
};
pub use traits::{
    CatalogManagement,
    EnrollmentLedger,
    GatewayError,
    GatewayOrder,
    IdentityDirectory,
    IdentityError,
    IdentityProfile,
    InsertPaymentResult,
    LedgerError,
    OrderManagement,
    PaymentGateway,
    ProfileManagement,
};
