//! Verdura Core — domain models, repository traits, and the shared
//! error type used across the workspace.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{VerduraError, VerduraResult};
