//! Bearer-token authentication.
//!
//! Access tokens are HS256 JWTs signed with a secret shared with the identity provider. The claims carry the
//! subject id and, optionally, a role. The role claim is advisory only: every authorization decision re-reads
//! the role stored on the learner profile, so a stale or tampered-with role claim never grants access.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use course_payment_engine::db_types::Role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

const DEFAULT_TOKEN_VALIDITY: Duration = Duration::hours(24);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The identity provider's subject id for the caller.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Advisory. Authorization uses the stored profile role, not this claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub iat: i64,
    pub exp: i64,
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_claims(req))
    }
}

fn extract_claims(req: &HttpRequest) -> Result<JwtClaims, ServerError> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or_else(|| ServerError::InitializeError("No token verifier is configured".to_string()))?;
    let header = req.headers().get("Authorization").ok_or(AuthError::MissingToken)?;
    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AuthError::ValidationError("The Authorization header is not a bearer token".to_string()))?;
    let claims = verifier.validate(token)?;
    trace!("💻️ Access token validated for {}", claims.sub);
    Ok(claims)
}

/// Validates access tokens. Shared as app data so the [`JwtClaims`] extractor can reach it.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let key = DecodingKey::from_secret(config.jwt_secret.expose().as_bytes());
        let validation = Validation::default();
        Self { key, validation }
    }

    pub fn validate(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let data = decode::<JwtClaims>(token, &self.key, &self.validation)
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;
        Ok(data.claims)
    }
}

/// Issues access tokens. The server itself never issues tokens on the wire (that is the identity provider's
/// job); this exists for tooling and the test suites.
pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self { key: EncodingKey::from_secret(config.jwt_secret.expose().as_bytes()) }
    }

    pub fn issue_token(
        &self,
        subject: &str,
        role: Option<Role>,
        validity: Option<Duration>,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let validity = validity.unwrap_or(DEFAULT_TOKEN_VALIDITY);
        let claims = JwtClaims {
            sub: subject.to_string(),
            name: None,
            role,
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
        };
        encode(&Header::default(), &claims, &self.key).map_err(|e| AuthError::ValidationError(e.to_string()))
    }
}
