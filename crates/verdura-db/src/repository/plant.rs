//! SurrealDB implementation of [`PlantRepository`].
//!
//! Plants are stored as single documents with their reviews embedded,
//! so [`PlantRepository::save_reviews`] is one UPDATE statement: the
//! review sequence and the recomputed rating land together or not at
//! all. There is no optimistic-concurrency token — two concurrent
//! review mutations against the same plant race, last writer wins.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;
use verdura_core::error::VerduraResult;
use verdura_core::models::plant::{CreatePlant, Plant, Review, UpdatePlant};
use verdura_core::repository::PlantRepository;

use crate::error::DbError;

/// Embedded review object inside a plant row.
#[derive(Debug, Clone, SurrealValue)]
struct ReviewRow {
    id: String,
    user_id: String,
    stars: u32,
    comment: String,
    created_at: DateTime<Utc>,
}

impl ReviewRow {
    fn from_review(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            user_id: review.user_id.to_string(),
            stars: u32::from(review.stars),
            comment: review.comment.clone(),
            created_at: review.created_at,
        }
    }

    fn try_into_review(self) -> Result<Review, DbError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| DbError::Decode(format!("invalid review UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid review user UUID: {e}")))?;
        let stars = u8::try_from(self.stars)
            .map_err(|e| DbError::Decode(format!("stars out of range: {e}")))?;
        Ok(Review {
            id,
            user_id,
            stars,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct PlantRow {
    name: String,
    price: f64,
    categories: Vec<String>,
    in_stock: bool,
    description: String,
    image_url: String,
    origin: String,
    care_instructions: String,
    rating: f64,
    reviews: Vec<ReviewRow>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlantRow {
    fn into_plant(self, id: Uuid) -> Result<Plant, DbError> {
        let reviews = self
            .reviews
            .into_iter()
            .map(ReviewRow::try_into_review)
            .collect::<Result<Vec<_>, DbError>>()?;
        Ok(Plant {
            id,
            name: self.name,
            price: self.price,
            categories: self.categories,
            in_stock: self.in_stock,
            description: self.description,
            image_url: self.image_url,
            origin: self.origin,
            care_instructions: self.care_instructions,
            rating: self.rating,
            reviews,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct PlantRowWithId {
    record_id: String,
    name: String,
    price: f64,
    categories: Vec<String>,
    in_stock: bool,
    description: String,
    image_url: String,
    origin: String,
    care_instructions: String,
    rating: f64,
    reviews: Vec<ReviewRow>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlantRowWithId {
    fn try_into_plant(self) -> Result<Plant, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let row = PlantRow {
            name: self.name,
            price: self.price,
            categories: self.categories,
            in_stock: self.in_stock,
            description: self.description,
            image_url: self.image_url,
            origin: self.origin,
            care_instructions: self.care_instructions,
            rating: self.rating,
            reviews: self.reviews,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_plant(id)
    }
}

/// SurrealDB implementation of the Plant repository.
#[derive(Clone)]
pub struct SurrealPlantRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPlantRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PlantRepository for SurrealPlantRepository<C> {
    async fn create(&self, input: CreatePlant) -> VerduraResult<Plant> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('plant', $id) SET \
                 name = $name, price = $price, \
                 categories = $categories, in_stock = $in_stock, \
                 description = $description, image_url = $image_url, \
                 origin = $origin, \
                 care_instructions = $care_instructions, \
                 rating = 0, reviews = []",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("price", input.price))
            .bind(("categories", input.categories.unwrap_or_default()))
            .bind(("in_stock", input.in_stock.unwrap_or(true)))
            .bind(("description", input.description.unwrap_or_default()))
            .bind(("image_url", input.image_url.unwrap_or_default()))
            .bind(("origin", input.origin.unwrap_or_default()))
            .bind((
                "care_instructions",
                input.care_instructions.unwrap_or_default(),
            ))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<PlantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "plant".into(),
            id: id_str,
        })?;

        Ok(row.into_plant(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> VerduraResult<Plant> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('plant', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PlantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "plant".into(),
            id: id_str,
        })?;

        Ok(row.into_plant(id)?)
    }

    async fn list(&self) -> VerduraResult<Vec<Plant>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM plant \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PlantRowWithId> = result.take(0).map_err(DbError::from)?;

        let plants = rows
            .into_iter()
            .map(|row| row.try_into_plant())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(plants)
    }

    async fn update(&self, id: Uuid, input: UpdatePlant) -> VerduraResult<Plant> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.price.is_some() {
            sets.push("price = $price");
        }
        if input.categories.is_some() {
            sets.push("categories = $categories");
        }
        if input.in_stock.is_some() {
            sets.push("in_stock = $in_stock");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.image_url.is_some() {
            sets.push("image_url = $image_url");
        }
        if input.origin.is_some() {
            sets.push("origin = $origin");
        }
        if input.care_instructions.is_some() {
            sets.push("care_instructions = $care_instructions");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('plant', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(price) = input.price {
            builder = builder.bind(("price", price));
        }
        if let Some(categories) = input.categories {
            builder = builder.bind(("categories", categories));
        }
        if let Some(in_stock) = input.in_stock {
            builder = builder.bind(("in_stock", in_stock));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(image_url) = input.image_url {
            builder = builder.bind(("image_url", image_url));
        }
        if let Some(origin) = input.origin {
            builder = builder.bind(("origin", origin));
        }
        if let Some(care_instructions) = input.care_instructions {
            builder = builder.bind(("care_instructions", care_instructions));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<PlantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "plant".into(),
            id: id_str,
        })?;

        Ok(row.into_plant(id)?)
    }

    async fn delete(&self, id: Uuid) -> VerduraResult<()> {
        let id_str = id.to_string();

        // RETURN BEFORE yields the deleted record, so a missing plant
        // is distinguishable from a successful cascade delete.
        let mut result = self
            .db
            .query("DELETE type::record('plant', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PlantRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "plant".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn save_reviews(
        &self,
        id: Uuid,
        reviews: Vec<Review>,
        rating: f64,
    ) -> VerduraResult<Plant> {
        let id_str = id.to_string();
        let rows: Vec<ReviewRow> = reviews.iter().map(ReviewRow::from_review).collect();

        // Single UPDATE: the review sequence and the derived rating are
        // persisted together, never as two separate writes.
        let result = self
            .db
            .query(
                "UPDATE type::record('plant', $id) SET \
                 reviews = $reviews, rating = $rating, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("reviews", rows))
            .bind(("rating", rating))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<PlantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "plant".into(),
            id: id_str,
        })?;

        Ok(row.into_plant(id)?)
    }
}
