//! Request extractors for authenticated and admin-only routes.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use surrealdb::Connection;
use verdura_auth::error::AuthError;
use verdura_auth::token;
use verdura_core::VerduraError;
use verdura_core::models::user::Requester;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the requester from a `Authorization: Bearer <jwt>` header.
/// Rejects with 401 when the header is missing or the token invalid.
pub struct AuthUser(pub Requester);

/// Like [`AuthUser`] but additionally rejects non-admins with 403.
pub struct AdminUser(pub Requester);

impl<C: Connection> FromRequestParts<Arc<AppState<C>>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<C>>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError(AuthError::MissingToken.into()))?;

        let requester = token::validate_access_token(token, &state.auth_config)
            .map_err(|e| ApiError(e.into()))?
            .requester()
            .map_err(|e| ApiError(e.into()))?;

        Ok(AuthUser(requester))
    }
}

impl<C: Connection> FromRequestParts<Arc<AppState<C>>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<C>>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(requester) = AuthUser::from_request_parts(parts, state).await?;

        if !requester.is_admin() {
            return Err(ApiError(VerduraError::Forbidden {
                reason: "admin privileges required".into(),
            }));
        }

        Ok(AdminUser(requester))
    }
}
