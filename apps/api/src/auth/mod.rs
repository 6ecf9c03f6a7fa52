pub mod authz;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::state::AppState;

/// The authenticated caller, resolved from a bearer session token.
///
/// Session rows are provisioned by the identity provider sync; this service
/// only ever reads them. A missing or expired token rejects with 401 before
/// the handler body runs.
pub struct CurrentUser(pub ProfileRow);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = bearer_token(header).ok_or(AppError::Unauthorized)?;

        let profile: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT p.*
            FROM sessions s
            JOIN profiles p ON p.id = s.profile_id
            WHERE s.token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&state.db)
        .await?;

        profile.map(CurrentUser).ok_or(AppError::Unauthorized)
    }
}

/// The authenticated caller, additionally required to hold the platform
/// `admin` role. Non-admins get 403 (not 404) so the admin surface is
/// distinguishable from a missing resource.
pub struct PlatformAdmin(pub ProfileRow);

#[async_trait]
impl FromRequestParts<AppState> for PlatformAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(profile) = CurrentUser::from_request_parts(parts, state).await?;
        if !profile.is_platform_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(PlatformAdmin(profile))
    }
}

/// Extracts the token from a `Bearer <token>` authorization header value.
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    if parts.next()? != "Bearer" {
        return None;
    }
    parts.next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_valid() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        assert_eq!(bearer_token("Basic abc123"), None);
    }

    #[test]
    fn test_bearer_token_missing_token() {
        assert_eq!(bearer_token("Bearer"), None);
    }

    #[test]
    fn test_bearer_token_extra_whitespace() {
        assert_eq!(bearer_token("Bearer   tok"), Some("tok"));
    }
}
