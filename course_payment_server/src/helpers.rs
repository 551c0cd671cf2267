use course_payment_engine::{
    db_types::{LearnerProfile, Role},
    ProfileManagement,
};
use log::*;

use crate::{
    auth::JwtClaims,
    errors::{AuthError, ServerError},
};

/// Resolve the caller's stored profile from their token subject. Fails if no profile exists or if the account
/// has been blocked. The token's role claim is ignored here; only the stored role counts.
pub async fn authenticated_profile<B: ProfileManagement>(
    db: &B,
    claims: &JwtClaims,
) -> Result<LearnerProfile, ServerError> {
    let profile = db
        .fetch_profile_by_subject(&claims.sub)
        .await?
        .ok_or(ServerError::AuthenticationError(AuthError::AccountNotFound))?;
    if profile.is_blocked {
        info!("💻️ Blocked account {} attempted an authenticated call", claims.sub);
        return Err(AuthError::AccountBlocked.into());
    }
    if let Some(claimed) = claims.role {
        if claimed != profile.role {
            debug!(
                "💻️ Token role claim ({claimed}) differs from the stored role ({}) for {}. Using the stored role.",
                profile.role, claims.sub
            );
        }
    }
    Ok(profile)
}

pub async fn require_role<B: ProfileManagement>(
    db: &B,
    claims: &JwtClaims,
    allowed: &[Role],
) -> Result<LearnerProfile, ServerError> {
    let profile = authenticated_profile(db, claims).await?;
    if allowed.contains(&profile.role) {
        Ok(profile)
    } else {
        let wanted = allowed.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(" or ");
        Err(ServerError::InsufficientPermissions(format!("This endpoint requires the {wanted} role.")))
    }
}
