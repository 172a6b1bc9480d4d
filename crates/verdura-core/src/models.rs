//! Domain models for the verdura catalog.

pub mod plant;
pub mod user;
