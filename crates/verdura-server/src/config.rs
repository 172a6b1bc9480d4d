//! Environment-based server configuration.

use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};
use verdura_auth::AuthConfig;
use verdura_db::DbConfig;

pub struct Config {
    pub port: u16,
    /// Origin allowed by CORS (the SPA dev server by default).
    pub cors_origin: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

impl Config {
    pub fn load() -> Self {
        let db = DbConfig {
            endpoint: try_load("VERDURA_DB_ENDPOINT", "127.0.0.1:8000"),
            namespace: try_load("VERDURA_DB_NAMESPACE", "verdura"),
            database: try_load("VERDURA_DB_NAME", "catalog"),
            username: try_load("VERDURA_DB_USER", "root"),
            password: try_load("VERDURA_DB_PASSWORD", "root"),
        };

        let auth = AuthConfig {
            jwt_private_key_pem: read_pem("VERDURA_JWT_PRIVATE_KEY_PATH"),
            jwt_public_key_pem: read_pem("VERDURA_JWT_PUBLIC_KEY_PATH"),
            access_token_lifetime_secs: try_load("VERDURA_TOKEN_LIFETIME_SECS", "86400"),
            jwt_issuer: try_load("VERDURA_JWT_ISSUER", "verdura"),
            pepper: env::var("VERDURA_PASSWORD_PEPPER").ok(),
            min_password_length: try_load("VERDURA_MIN_PASSWORD_LENGTH", "8"),
        };

        Self {
            port: try_load("VERDURA_PORT", "5000"),
            cors_origin: try_load("VERDURA_CORS_ORIGIN", "http://localhost:5173"),
            db,
            auth,
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// Read a PEM key from the file named by the given environment
/// variable. JWT keys are required; there is no usable default.
fn read_pem(key: &str) -> String {
    let path = env::var(key)
        .map_err(|_| {
            warn!("Environment variable {key} not set");
        })
        .expect("JWT keys misconfigured!");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {path}: {e}");
        })
        .expect("JWT keys misconfigured!")
}
