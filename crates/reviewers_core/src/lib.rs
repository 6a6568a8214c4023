//! Core domain logic for the reviewer registry.
//! This crate is the single source of truth for reviewer invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::reviewer::{Reviewer, ReviewerId, ReviewerPatch, ReviewerValidationError};
pub use repo::reviewer_repo::{
    count_reviewers, RepoError, RepoResult, ReviewerRepository, SqliteReviewerRepository,
};
pub use service::reviewer_service::{ReviewerService, ServiceError, ServiceResult};

/// Plain-text greeting served by the liveness probe.
pub fn greeting() -> &'static str {
    "Hello Sachin"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
