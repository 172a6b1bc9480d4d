//! Connecting the catalog to its SurrealDB backend.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error::DbError;

/// Where and how the catalog reaches SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Host and port of the SurrealDB endpoint, without a scheme.
    pub endpoint: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            endpoint: "127.0.0.1:8000".into(),
            namespace: "verdura".into(),
            database: "catalog".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Open a WebSocket connection, sign in as root, and select the
/// catalog namespace and database.
///
/// The returned handle is cheap to clone; every repository shares it.
pub async fn connect(config: &DbConfig) -> Result<Surreal<Client>, DbError> {
    let db = Surreal::new::<Ws>(&config.endpoint).await?;

    db.signin(Root {
        username: config.username.clone(),
        password: config.password.clone(),
    })
    .await?;

    db.use_ns(&config.namespace)
        .use_db(&config.database)
        .await?;

    info!(
        endpoint = %config.endpoint,
        namespace = %config.namespace,
        database = %config.database,
        "SurrealDB connection established"
    );

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_the_local_catalog() {
        let config = DbConfig::default();
        assert_eq!(config.endpoint, "127.0.0.1:8000");
        assert_eq!(config.namespace, "verdura");
        assert_eq!(config.database, "catalog");
    }
}
