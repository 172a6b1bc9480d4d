//! Authentication error types.

use thiserror::Error;
use verdura_core::error::VerduraError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for VerduraError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => VerduraError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => VerduraError::Crypto(msg),
        }
    }
}
