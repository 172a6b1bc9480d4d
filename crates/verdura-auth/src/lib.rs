//! Verdura Auth — password verification, JWT issuance/validation, and
//! the signup/login service.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput, SignupInput};
pub use token::AccessTokenClaims;
