//! Catalog service — plant CRUD orchestration and review maintenance.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use verdura_core::error::{VerduraError, VerduraResult};
use verdura_core::models::plant::{CreatePlant, Plant, Review, UpdatePlant};
use verdura_core::models::user::Requester;
use verdura_core::repository::PlantRepository;

use crate::{authz, rating};

/// Input for adding a review.
///
/// `stars` is optional at this layer so a missing value surfaces as a
/// domain validation error rather than a deserialization failure, and
/// wide (`i64`) so out-of-range values do too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddReview {
    pub stars: Option<i64>,
    pub comment: Option<String>,
}

/// Partial update of an existing review. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPatch {
    pub stars: Option<i64>,
    pub comment: Option<String>,
}

/// Catalog service.
///
/// Generic over the plant repository so the domain layer has no
/// dependency on the database crate.
pub struct CatalogService<P: PlantRepository> {
    plants: P,
}

fn validate_stars(stars: i64) -> VerduraResult<u8> {
    if (1..=5).contains(&stars) {
        Ok(stars as u8)
    } else {
        Err(VerduraError::Validation {
            message: format!("stars must be between 1 and 5, got {stars}"),
        })
    }
}

fn validate_price(price: f64) -> VerduraResult<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(VerduraError::Validation {
            message: "price must be non-negative".into(),
        })
    }
}

impl<P: PlantRepository> CatalogService<P> {
    pub fn new(plants: P) -> Self {
        Self { plants }
    }

    // -------------------------------------------------------------------
    // Plant CRUD
    // -------------------------------------------------------------------

    pub async fn create_plant(&self, input: CreatePlant) -> VerduraResult<Plant> {
        if input.name.trim().is_empty() {
            return Err(VerduraError::Validation {
                message: "name is required".into(),
            });
        }
        validate_price(input.price)?;
        self.plants.create(input).await
    }

    pub async fn get_plant(&self, id: Uuid) -> VerduraResult<Plant> {
        self.plants.get_by_id(id).await
    }

    pub async fn list_plants(&self) -> VerduraResult<Vec<Plant>> {
        self.plants.list().await
    }

    pub async fn update_plant(&self, id: Uuid, input: UpdatePlant) -> VerduraResult<Plant> {
        if let Some(ref name) = input.name
            && name.trim().is_empty()
        {
            return Err(VerduraError::Validation {
                message: "name must not be empty".into(),
            });
        }
        if let Some(price) = input.price {
            validate_price(price)?;
        }
        self.plants.update(id, input).await
    }

    /// Deletes the plant and, with it, every embedded review.
    pub async fn delete_plant(&self, id: Uuid) -> VerduraResult<()> {
        self.plants.delete(id).await
    }

    // -------------------------------------------------------------------
    // Review maintenance
    // -------------------------------------------------------------------

    /// Append a review and restore the rating invariant.
    pub async fn add_review(
        &self,
        plant_id: Uuid,
        requester: Requester,
        input: AddReview,
    ) -> VerduraResult<Plant> {
        // 1. Validate before touching the store: a bad request must not
        //    mutate the plant.
        let stars = input.stars.ok_or_else(|| VerduraError::Validation {
            message: "stars is required".into(),
        })?;
        let stars = validate_stars(stars)?;

        // 2. Load the aggregate.
        let mut plant = self.plants.get_by_id(plant_id).await?;

        // 3. Append and recompute.
        plant.reviews.push(Review {
            id: Uuid::new_v4(),
            user_id: requester.id,
            stars,
            comment: input.comment.unwrap_or_default(),
            created_at: Utc::now(),
        });
        let new_rating = rating::recompute(&plant.reviews);

        // 4. Persist sequence and rating together.
        let plant = self
            .plants
            .save_reviews(plant_id, plant.reviews, new_rating)
            .await?;

        info!(%plant_id, rating = new_rating, "review added");
        Ok(plant)
    }

    /// Apply a partial update to an existing review and restore the
    /// rating invariant.
    pub async fn update_review(
        &self,
        plant_id: Uuid,
        review_id: Uuid,
        requester: Requester,
        patch: ReviewPatch,
    ) -> VerduraResult<Plant> {
        let stars = patch.stars.map(validate_stars).transpose()?;

        let mut plant = self.plants.get_by_id(plant_id).await?;
        let review = find_review(&mut plant.reviews, review_id)?;

        if !authz::can_modify_review(&requester, review.user_id) {
            return Err(VerduraError::Forbidden {
                reason: "not allowed to update this review".into(),
            });
        }

        if let Some(stars) = stars {
            review.stars = stars;
        }
        if let Some(comment) = patch.comment {
            review.comment = comment;
        }

        let new_rating = rating::recompute(&plant.reviews);
        let plant = self
            .plants
            .save_reviews(plant_id, plant.reviews, new_rating)
            .await?;

        info!(%plant_id, %review_id, rating = new_rating, "review updated");
        Ok(plant)
    }

    /// Remove a review and restore the rating invariant (`0.0` if the
    /// sequence is now empty).
    pub async fn delete_review(
        &self,
        plant_id: Uuid,
        review_id: Uuid,
        requester: Requester,
    ) -> VerduraResult<Plant> {
        let mut plant = self.plants.get_by_id(plant_id).await?;
        let review = find_review(&mut plant.reviews, review_id)?;

        if !authz::can_modify_review(&requester, review.user_id) {
            return Err(VerduraError::Forbidden {
                reason: "not allowed to delete this review".into(),
            });
        }

        plant.reviews.retain(|r| r.id != review_id);
        let new_rating = rating::recompute(&plant.reviews);
        let plant = self
            .plants
            .save_reviews(plant_id, plant.reviews, new_rating)
            .await?;

        info!(%plant_id, %review_id, rating = new_rating, "review deleted");
        Ok(plant)
    }
}

fn find_review(reviews: &mut [Review], review_id: Uuid) -> VerduraResult<&mut Review> {
    reviews
        .iter_mut()
        .find(|r| r.id == review_id)
        .ok_or_else(|| VerduraError::NotFound {
            entity: "review".into(),
            id: review_id.to_string(),
        })
}
