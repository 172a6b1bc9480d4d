//! Plant catalog endpoints. Reads are public; writes are admin-only.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use surrealdb::Connection;
use uuid::Uuid;
use verdura_core::VerduraError;
use verdura_core::models::plant::{CreatePlant, Plant, UpdatePlant};
use verdura_core::repository::UserRepository;

use crate::error::ApiResult;
use crate::extract::AdminUser;
use crate::state::AppState;

/// Create payload with every field optional, so missing required
/// fields surface as 400 validation errors instead of body-rejection
/// failures.
#[derive(Deserialize, Default)]
pub struct CreatePlantRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub origin: Option<String>,
    pub care_instructions: Option<String>,
}

impl CreatePlantRequest {
    fn into_input(self) -> Result<CreatePlant, VerduraError> {
        let name = self.name.ok_or_else(|| VerduraError::Validation {
            message: "name is required".into(),
        })?;
        let price = self.price.ok_or_else(|| VerduraError::Validation {
            message: "price is required".into(),
        })?;

        Ok(CreatePlant {
            name,
            price,
            categories: self.categories,
            in_stock: self.in_stock,
            description: self.description,
            image_url: self.image_url,
            origin: self.origin,
            care_instructions: self.care_instructions,
        })
    }
}

#[derive(Serialize)]
pub struct PlantListResponse {
    pub plants: Vec<Plant>,
}

/// Reviewer identity shown on the plant detail page.
#[derive(Serialize)]
pub struct ReviewerView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct ReviewDetail {
    pub id: Uuid,
    /// `None` when the reviewer's account no longer exists.
    pub user: Option<ReviewerView>,
    pub stars: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Plant with each review's author resolved to name and email.
#[derive(Serialize)]
pub struct PlantDetail {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub categories: Vec<String>,
    pub in_stock: bool,
    pub description: String,
    pub image_url: String,
    pub origin: String,
    pub care_instructions: String,
    pub rating: f64,
    pub reviews: Vec<ReviewDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub async fn list<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
) -> ApiResult<Json<PlantListResponse>> {
    Ok(Json(PlantListResponse {
        plants: state.catalog.list_plants().await?,
    }))
}

pub async fn get<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PlantDetail>> {
    let plant = state.catalog.get_plant(id).await?;

    let mut reviews = Vec::with_capacity(plant.reviews.len());
    for review in plant.reviews {
        let user = match state.users.get_by_id(review.user_id).await {
            Ok(u) => Some(ReviewerView {
                id: u.id,
                name: u.name,
                email: u.email,
            }),
            Err(VerduraError::NotFound { .. }) => None,
            Err(e) => return Err(e.into()),
        };
        reviews.push(ReviewDetail {
            id: review.id,
            user,
            stars: review.stars,
            comment: review.comment,
            created_at: review.created_at,
        });
    }

    Ok(Json(PlantDetail {
        id: plant.id,
        name: plant.name,
        price: plant.price,
        categories: plant.categories,
        in_stock: plant.in_stock,
        description: plant.description,
        image_url: plant.image_url,
        origin: plant.origin,
        care_instructions: plant.care_instructions,
        rating: plant.rating,
        reviews,
        created_at: plant.created_at,
        updated_at: plant.updated_at,
    }))
}

pub async fn create<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    _admin: AdminUser,
    Json(body): Json<CreatePlantRequest>,
) -> ApiResult<impl IntoResponse> {
    let plant = state.catalog.create_plant(body.into_input()?).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

pub async fn update<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePlant>,
) -> ApiResult<Json<Plant>> {
    Ok(Json(state.catalog.update_plant(id, body).await?))
}

pub async fn remove<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.catalog.delete_plant(id).await?;
    Ok(Json(json!({ "message": "Plant deleted" })))
}
