//! Plant and review domain models.
//!
//! Reviews are embedded in their plant — they have no independent
//! lifecycle and are deleted with the parent. `rating` is derived:
//! always the mean of the embedded review stars rounded to one
//! decimal, or `0.0` when there are no reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single user's star rating and optional comment on a plant.
///
/// `user_id` is set once at insertion and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Star rating, 1–5 inclusive.
    pub stars: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A catalog item being reviewed and rated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: Uuid,
    pub name: String,
    /// Non-negative.
    pub price: f64,
    pub categories: Vec<String>,
    pub in_stock: bool,
    pub description: String,
    pub image_url: String,
    pub origin: String,
    pub care_instructions: String,
    /// Derived mean of review stars, 0–5 with one decimal place.
    pub rating: f64,
    pub reviews: Vec<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlant {
    pub name: String,
    pub price: f64,
    pub categories: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub origin: Option<String>,
    pub care_instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlant {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub origin: Option<String>,
    pub care_instructions: Option<String>,
}
