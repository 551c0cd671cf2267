use thiserror::Error;

use crate::{
    db_types::CourseId,
    traits::{GatewayError, IdentityError, LedgerError},
};

#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("The course {0} does not exist")]
    CourseNotFound(CourseId),
    #[error("Could not create the gateway order. {0}")]
    Gateway(#[from] GatewayError),
    #[error("{0}")]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Clone, Error)]
pub enum PaymentFlowError {
    #[error("The payment confirmation signature is invalid")]
    InvalidSignature,
    #[error("The course {0} does not exist")]
    CourseNotFound(CourseId),
    #[error("The account for {0} has been blocked")]
    AccountBlocked(String),
    #[error("Could not resolve the learner's identity. {0}")]
    IdentityLookup(#[from] IdentityError),
    #[error("Payment reconciliation failed. {0}")]
    Reconciliation(#[from] LedgerError),
}
