//! Review endpoints. Any authenticated user may add a review; only
//! the review owner or an admin may change or remove one.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use surrealdb::Connection;
use uuid::Uuid;
use verdura_catalog::service::{AddReview, ReviewPatch};

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

pub async fn add<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(plant_id): Path<Uuid>,
    Json(body): Json<AddReview>,
) -> ApiResult<impl IntoResponse> {
    let plant = state.catalog.add_review(plant_id, requester, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Review added", "plant": plant })),
    ))
}

pub async fn update<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path((plant_id, review_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<ReviewPatch>,
) -> ApiResult<impl IntoResponse> {
    let plant = state
        .catalog
        .update_review(plant_id, review_id, requester, body)
        .await?;
    Ok(Json(json!({ "message": "Review updated", "plant": plant })))
}

pub async fn remove<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path((plant_id, review_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    let plant = state
        .catalog
        .delete_review(plant_id, review_id, requester)
        .await?;
    Ok(Json(json!({ "message": "Review deleted", "plant": plant })))
}
