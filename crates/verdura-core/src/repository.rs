//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. The plant repository is the
//! unit of atomicity for review mutations: [`PlantRepository::save_reviews`]
//! must persist the new review sequence and the recomputed rating in a
//! single write so an observer never sees one without the other.

use uuid::Uuid;

use crate::error::VerduraResult;
use crate::models::plant::{CreatePlant, Plant, Review, UpdatePlant};
use crate::models::user::{CreateUser, User};

pub trait PlantRepository: Send + Sync {
    fn create(&self, input: CreatePlant) -> impl Future<Output = VerduraResult<Plant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = VerduraResult<Plant>> + Send;
    /// The full catalog; filtering and pagination happen client-side.
    fn list(&self) -> impl Future<Output = VerduraResult<Vec<Plant>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdatePlant,
    ) -> impl Future<Output = VerduraResult<Plant>> + Send;
    /// Deleting a plant also deletes its embedded reviews.
    fn delete(&self, id: Uuid) -> impl Future<Output = VerduraResult<()>> + Send;

    /// Persist a plant's review sequence together with its recomputed
    /// rating as one atomic aggregate write.
    ///
    /// Callers perform read-modify-write without optimistic locking:
    /// two concurrent review mutations against the same plant race and
    /// the last writer wins. Preserved original behavior.
    fn save_reviews(
        &self,
        id: Uuid,
        reviews: Vec<Review>,
        rating: f64,
    ) -> impl Future<Output = VerduraResult<Plant>> + Send;
}

pub trait UserRepository: Send + Sync {
    /// Stores the caller-provided password hash verbatim.
    fn create(&self, input: CreateUser) -> impl Future<Output = VerduraResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = VerduraResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = VerduraResult<User>> + Send;
}
