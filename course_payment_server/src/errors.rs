use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use course_payment_engine::{GatewayError, IdentityError, LedgerError, OrderError, PaymentFlowError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("The payment confirmation signature is invalid")]
    InvalidPaymentSignature,
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Insufficient Permissions. {0}")]
    InsufficientPermissions(String),
    #[error("The upstream provider could not complete the request. {0}")]
    UpstreamError(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPaymentSignature => StatusCode::BAD_REQUEST,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::ValidationError(_) => StatusCode::UNAUTHORIZED,
                AuthError::AccountNotFound => StatusCode::FORBIDDEN,
                AuthError::AccountBlocked => StatusCode::FORBIDDEN,
            },
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            Self::UpstreamError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No access token was provided.")]
    MissingToken,
    #[error("Access token is invalid. {0}")]
    ValidationError(String),
    #[error("User account not found.")]
    AccountNotFound,
    #[error("This account has been blocked.")]
    AccountBlocked,
}

impl From<PaymentFlowError> for ServerError {
    fn from(e: PaymentFlowError) -> Self {
        match e {
            PaymentFlowError::InvalidSignature => Self::InvalidPaymentSignature,
            PaymentFlowError::CourseNotFound(id) => Self::NoRecordFound(format!("Course {id} does not exist.")),
            PaymentFlowError::AccountBlocked(_) => Self::AuthenticationError(AuthError::AccountBlocked),
            PaymentFlowError::IdentityLookup(IdentityError::UnknownSubject(_)) => {
                Self::AuthenticationError(AuthError::AccountNotFound)
            },
            PaymentFlowError::IdentityLookup(e @ IdentityError::Unreachable(_)) => Self::UpstreamError(e.to_string()),
            PaymentFlowError::Reconciliation(e) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<OrderError> for ServerError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::CourseNotFound(id) => Self::NoRecordFound(format!("Course {id} does not exist.")),
            OrderError::Gateway(e @ GatewayError::Rejected(_)) => Self::UpstreamError(e.to_string()),
            OrderError::Gateway(e @ GatewayError::Unreachable(_)) => Self::UpstreamError(e.to_string()),
            OrderError::Ledger(e) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<LedgerError> for ServerError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::CourseNotFound(id) => Self::NoRecordFound(format!("Course {id} does not exist.")),
            LedgerError::ProfileNotFound(s) => Self::NoRecordFound(format!("No profile exists for {s}.")),
            e => Self::BackendError(e.to_string()),
        }
    }
}
