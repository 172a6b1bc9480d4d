//! Verdura Catalog — plant CRUD and the review-rating maintainer.
//!
//! The one piece of real domain logic in the system lives here: every
//! review insert, update, or delete recomputes the owning plant's
//! aggregate rating from the full current review sequence and persists
//! both in a single store write.

pub mod authz;
pub mod rating;
pub mod service;

pub use service::{AddReview, CatalogService, ReviewPatch};
