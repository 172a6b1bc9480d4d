//! User domain model and the authenticated-requester view of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role is a capability flag, not a type hierarchy: admins may bypass
/// review-ownership checks and manage the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Argon2id PHC string. Repositories never see raw passwords;
    /// hashing happens in the auth layer.
    pub password_hash: String,
    pub role: Role,
}

/// The authenticated principal acting on a request, derived from
/// validated token claims. Only `id` and `role` are consumed by the
/// catalog's authorization checks.
#[derive(Debug, Clone, Copy)]
pub struct Requester {
    pub id: Uuid,
    pub role: Role,
}

impl Requester {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
