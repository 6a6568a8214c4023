//! Reviewer use-case service.
//!
//! # Responsibility
//! - Provide list/get/create/replace/patch/delete entry points.
//! - Distinguish "not found" from "found but conflicting" on writes.
//!
//! # Invariants
//! - Create never trusts a client-supplied id.
//! - Replace overwrites every mutable field; patch merges supplied keys only.
//! - Update and delete paths check existence before writing.
//! - Service layer remains storage-agnostic.

use crate::model::reviewer::{Reviewer, ReviewerId, ReviewerPatch, ReviewerValidationError};
use crate::repo::reviewer_repo::{RepoError, ReviewerRepository};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for reviewer use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target reviewer does not exist.
    NotFound(ReviewerId),
    /// Write would violate email uniqueness.
    Conflict(String),
    /// Required field missing or malformed.
    Validation(ReviewerValidationError),
    /// Any other persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Reviewer with id {id} not found"),
            Self::Conflict(_) => write!(f, "Email already exists"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::DuplicateEmail(email) => Self::Conflict(email),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for reviewer CRUD operations.
pub struct ReviewerService<R: ReviewerRepository> {
    repo: R,
}

impl<R: ReviewerRepository> ReviewerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all reviewers ordered by ascending id.
    pub fn list_reviewers(&self) -> ServiceResult<Vec<Reviewer>> {
        Ok(self.repo.find_all()?)
    }

    /// Gets one reviewer by id. `Ok(None)` when absent.
    pub fn get_reviewer(&self, id: ReviewerId) -> ServiceResult<Option<Reviewer>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Persists a new reviewer and returns it with its assigned id.
    ///
    /// # Contract
    /// - Any `id` on the input is discarded.
    /// - Duplicate email yields `ServiceError::Conflict` and no row.
    pub fn create_reviewer(&self, reviewer: &Reviewer) -> ServiceResult<Reviewer> {
        let candidate = Reviewer {
            id: None,
            ..reviewer.clone()
        };
        let saved = self.repo.save(&candidate)?;
        info!(
            "event=reviewer_create module=service status=ok id={}",
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Replaces every mutable field of reviewer `id`.
    ///
    /// # Contract
    /// - The path `id` wins over any id in `reviewer`.
    /// - Optional fields omitted from `reviewer` become `None`.
    pub fn replace_reviewer(&self, id: ReviewerId, reviewer: &Reviewer) -> ServiceResult<Reviewer> {
        let existing = self.require(id)?;
        debug!(
            "event=reviewer_replace module=service status=start id={id} previous_email={}",
            existing.email
        );

        let replacement = Reviewer {
            id: Some(id),
            ..reviewer.clone()
        };
        let saved = self.repo.save(&replacement)?;
        info!("event=reviewer_replace module=service status=ok id={id}");
        Ok(saved)
    }

    /// Merges the supplied keys of `patch` into reviewer `id`.
    pub fn patch_reviewer(&self, id: ReviewerId, patch: &ReviewerPatch) -> ServiceResult<Reviewer> {
        let mut existing = self.require(id)?;
        patch.apply_to(&mut existing);

        let saved = self.repo.save(&existing)?;
        info!("event=reviewer_patch module=service status=ok id={id}");
        Ok(saved)
    }

    /// Deletes reviewer `id`.
    pub fn delete_reviewer(&self, id: ReviewerId) -> ServiceResult<()> {
        self.require(id)?;
        self.repo.delete_by_id(id)?;
        info!("event=reviewer_delete module=service status=ok id={id}");
        Ok(())
    }

    fn require(&self, id: ReviewerId) -> ServiceResult<Reviewer> {
        match self.repo.find_by_id(id)? {
            Some(reviewer) => Ok(reviewer),
            None => {
                warn!("event=reviewer_lookup module=service status=not_found id={id}");
                Err(ServiceError::NotFound(id))
            }
        }
    }
}
