//! Reviewer domain model.
//!
//! # Responsibility
//! - Define the persisted reviewer record and its JSON shape.
//! - Define the partial-update payload used by merge-style updates.
//! - Validate required fields before any write reaches storage.
//!
//! # Invariants
//! - `id` is `None` until storage assigns one on insert.
//! - `name` and `email` are non-blank; `email` is syntactically valid.
//! - Email uniqueness is owned by the storage layer, not by this model.

use email_address::{EmailAddress, Options};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned primary key of a reviewer row.
pub type ReviewerId = i64;

/// A person who can review papers.
///
/// Missing `name`/`email` keys decode as empty strings so the request reaches
/// validation and fails there with a field-specific message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    /// Assigned on insert. Ignored on input for create and full update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ReviewerId>,
    #[serde(default)]
    pub name: String,
    /// Unique across all reviewers.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
}

impl Reviewer {
    /// Creates an unsaved reviewer with required fields only.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            affiliation: None,
            expertise: None,
        }
    }

    /// Builder-style setter for `affiliation`.
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    /// Builder-style setter for `expertise`.
    pub fn with_expertise(mut self, expertise: impl Into<String>) -> Self {
        self.expertise = Some(expertise.into());
        self
    }

    /// Validates field-level invariants.
    ///
    /// Checks run in declaration order and the first failure wins.
    pub fn validate(&self) -> Result<(), ReviewerValidationError> {
        if self.name.trim().is_empty() {
            return Err(ReviewerValidationError::NameRequired);
        }

        if self.email.trim().is_empty() {
            return Err(ReviewerValidationError::EmailRequired);
        }
        // The stored value is the raw string, so padding would slip past UNIQUE.
        if self.email.trim() != self.email || !is_bare_email(&self.email) {
            return Err(ReviewerValidationError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }
}

/// Field-level validation failure for a reviewer write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewerValidationError {
    NameRequired,
    EmailRequired,
    InvalidEmail(String),
}

impl Display for ReviewerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name is required"),
            Self::EmailRequired => write!(f, "Email is required"),
            Self::InvalidEmail(_) => write!(f, "Email should be valid"),
        }
    }
}

impl Error for ReviewerValidationError {}

/// Merge payload for partial updates.
///
/// Each field is tri-state: `None` leaves the stored value untouched,
/// `Some(None)` clears it, `Some(Some(v))` overwrites it. Keys other than the
/// four mutable fields are ignored, `id` included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReviewerPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub affiliation: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub expertise: Option<Option<String>>,
}

impl ReviewerPatch {
    /// Returns `true` when no known key was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.affiliation.is_none()
            && self.expertise.is_none()
    }

    /// Merges supplied keys into `reviewer`.
    ///
    /// A `null` name or email becomes an empty string and is rejected later by
    /// [`Reviewer::validate`].
    pub fn apply_to(&self, reviewer: &mut Reviewer) {
        if let Some(name) = &self.name {
            reviewer.name = name.clone().unwrap_or_default();
        }
        if let Some(email) = &self.email {
            reviewer.email = email.clone().unwrap_or_default();
        }
        if let Some(affiliation) = &self.affiliation {
            reviewer.affiliation = affiliation.clone();
        }
        if let Some(expertise) = &self.expertise {
            reviewer.expertise = expertise.clone();
        }
    }
}

fn is_bare_email(value: &str) -> bool {
    EmailAddress::parse_with_options(value, Options::default().without_display_text()).is_ok()
}

// Distinguishes an explicit `null` from an absent key.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::{Reviewer, ReviewerPatch, ReviewerValidationError};

    #[test]
    fn validate_accepts_minimal_reviewer() {
        Reviewer::new("Ada Lovelace", "ada@example.org")
            .validate()
            .expect("minimal reviewer should be valid");
    }

    #[test]
    fn validate_rejects_blank_name_before_email() {
        let err = Reviewer::new("   ", "not-an-email").validate().unwrap_err();
        assert_eq!(err, ReviewerValidationError::NameRequired);
    }

    #[test]
    fn validate_rejects_blank_and_malformed_email() {
        let blank = Reviewer::new("Ada", " ").validate().unwrap_err();
        assert_eq!(blank, ReviewerValidationError::EmailRequired);

        let malformed = Reviewer::new("Ada", "ada.example.org")
            .validate()
            .unwrap_err();
        assert!(matches!(malformed, ReviewerValidationError::InvalidEmail(_)));
        assert_eq!(malformed.to_string(), "Email should be valid");
    }

    #[test]
    fn validate_rejects_display_text_form() {
        let err = Reviewer::new("Ada", "Ada Lovelace <ada@example.org>")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ReviewerValidationError::InvalidEmail(_)));
    }

    #[test]
    fn validate_rejects_padded_email() {
        for padded in [" ada@example.org", "ada@example.org ", "\tada@example.org\n"] {
            let err = Reviewer::new("Ada", padded).validate().unwrap_err();
            assert!(
                matches!(err, ReviewerValidationError::InvalidEmail(_)),
                "`{padded}` should be rejected"
            );
        }
    }

    #[test]
    fn patch_apply_only_touches_supplied_fields() {
        let mut reviewer = Reviewer::new("Ada", "ada@example.org")
            .with_affiliation("Analytical Society")
            .with_expertise("computing");
        let patch = ReviewerPatch {
            expertise: Some(Some("mathematics".to_string())),
            affiliation: Some(None),
            ..ReviewerPatch::default()
        };

        patch.apply_to(&mut reviewer);

        assert_eq!(reviewer.name, "Ada");
        assert_eq!(reviewer.email, "ada@example.org");
        assert_eq!(reviewer.affiliation, None);
        assert_eq!(reviewer.expertise.as_deref(), Some("mathematics"));
    }

    #[test]
    fn empty_patch_reports_empty() {
        assert!(ReviewerPatch::default().is_empty());
    }
}
