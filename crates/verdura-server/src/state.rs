//! Shared application state.

use std::sync::Arc;

use surrealdb::engine::remote::ws::Client;
use surrealdb::{Connection, Surreal};
use verdura_auth::{AuthConfig, AuthService};
use verdura_catalog::CatalogService;
use verdura_db::DbError;
use verdura_db::repository::{SurrealPlantRepository, SurrealUserRepository};

use crate::config::Config;

/// Everything the handlers need, generic over the database engine so
/// tests can run against the in-memory one.
pub struct AppState<C: Connection> {
    pub catalog: CatalogService<SurrealPlantRepository<C>>,
    pub auth: AuthService<SurrealUserRepository<C>>,
    /// Direct user access for view assembly (reviewer identities on
    /// the plant detail endpoint).
    pub users: SurrealUserRepository<C>,
    pub auth_config: AuthConfig,
}

impl<C: Connection> AppState<C> {
    /// Build the state from an already-connected database handle.
    pub fn new(db: Surreal<C>, auth_config: AuthConfig) -> Arc<Self> {
        let plants = SurrealPlantRepository::new(db.clone());
        let users = SurrealUserRepository::new(db);

        Arc::new(Self {
            catalog: CatalogService::new(plants),
            auth: AuthService::new(users.clone(), auth_config.clone()),
            users,
            auth_config,
        })
    }
}

impl AppState<Client> {
    /// Connect to SurrealDB over WebSocket, run pending migrations,
    /// and build the state.
    pub async fn connect(config: &Config) -> Result<Arc<Self>, DbError> {
        let db = verdura_db::connect(&config.db).await?;
        verdura_db::run_migrations(&db).await?;
        Ok(Self::new(db, config.auth.clone()))
    }
}
