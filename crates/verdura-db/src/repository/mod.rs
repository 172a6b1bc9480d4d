//! SurrealDB repository implementations.

mod plant;
mod user;

pub use plant::SurrealPlantRepository;
pub use user::SurrealUserRepository;
