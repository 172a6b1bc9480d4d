//! Authentication service — signup and login orchestration.

use verdura_core::error::{VerduraError, VerduraResult};
use verdura_core::models::user::{CreateUser, Role, User};
use verdura_core::repository::UserRepository;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the signup flow.
#[derive(Debug)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: User,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the user repository so the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    users: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: U, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Register a new account with the default `user` role.
    pub async fn signup(&self, input: SignupInput) -> VerduraResult<User> {
        // 1. Validate input.
        if input.name.trim().is_empty() {
            return Err(VerduraError::Validation {
                message: "name is required".into(),
            });
        }
        let email = input.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(VerduraError::Validation {
                message: "a valid email is required".into(),
            });
        }
        if input.password.len() < self.config.min_password_length {
            return Err(VerduraError::Validation {
                message: format!(
                    "password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        // 2. Reject duplicate emails.
        match self.users.get_by_email(&email).await {
            Ok(_) => {
                return Err(VerduraError::AlreadyExists {
                    entity: "user".into(),
                });
            }
            Err(VerduraError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        // 3. Hash here; the repository stores the PHC string verbatim.
        let password_hash =
            password::hash_password(&input.password, self.config.pepper.as_deref())?;

        self.users
            .create(CreateUser {
                name: input.name,
                email,
                password_hash,
                role: Role::User,
            })
            .await
    }

    /// Authenticate with email + password and issue a bearer token.
    pub async fn login(&self, input: LoginInput) -> VerduraResult<LoginOutput> {
        // 1. Look up user by email. An unknown email and a wrong
        //    password are indistinguishable to the caller.
        let user = self
            .users
            .get_by_email(input.email.trim().to_lowercase().as_str())
            .await
            .map_err(|e| match e {
                VerduraError::NotFound { .. } => AuthError::InvalidCredentials.into(),
                other => other,
            })?;

        // 2. Verify password.
        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )
        .map_err(|e| VerduraError::Crypto(e.to_string()))?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Issue JWT bearer token.
        let token = token::issue_access_token(user.id, user.role, &self.config)?;

        Ok(LoginOutput {
            token,
            user,
            expires_in: self.config.access_token_lifetime_secs,
        })
    }
}
