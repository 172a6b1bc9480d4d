//! Signup and login endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use uuid::Uuid;
use verdura_auth::{LoginInput, SignupInput};
use verdura_core::models::user::{Role, User};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User representation safe to return to clients. Never carries the
/// password hash.
#[derive(Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
        }
    }
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: PublicUser,
}

pub async fn signup<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    Json(body): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .auth
        .signup(SignupInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

pub async fn login<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let out = state
        .auth
        .login(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: out.token,
        expires_in: out.expires_in,
        user: PublicUser::from(out.user),
    }))
}
